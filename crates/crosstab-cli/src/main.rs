//! crosstab command-line interface.
//!
//! Two ways in: serve the HTTP API, or run a single request document and
//! print the result record.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "crosstab")]
#[command(about = "Chi-square family hypothesis tests, served or one-shot")]
#[command(version = crosstab_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP test server
    Serve {
        /// Bind address (overrides CROSSTAB_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides CROSSTAB_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one request document and print the result record
    Run {
        /// Path to a request JSON file; reads stdin when omitted
        #[arg(long)]
        input: Option<String>,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { host, port } => commands::serve::run(host.as_deref(), port),
        Commands::Run { input, compact } => commands::run::run(input.as_deref(), compact),
    }
}
