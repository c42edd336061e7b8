use crosstab_server::Config;

pub fn run(host: Option<&str>, port: Option<u16>) {
    let env_config = Config::from_env();
    let host = host.map(str::to_string).unwrap_or(env_config.host);
    let port = port.unwrap_or(env_config.port);
    let base = format!("http://{host}:{port}");

    println!("📊 Crosstab Server v{}", crosstab_core::VERSION);
    println!("   {base}");
    println!();
    println!("   Endpoints:");
    println!("     POST /         Run a test (JSON body)");
    println!("     GET  /         API index");
    println!("     GET  /health   Liveness check");
    println!();
    println!("   Subtypes (testType \"chi-square\"):");
    println!("     goodness-of-fit   1-D counts vs a uniform or custom distribution");
    println!("     independence      association in a 2-D contingency table");
    println!("     homogeneity       distribution equality across groups");
    println!("     fishers-exact     exact test for 2x2 tables");
    println!();
    println!("   Example:");
    println!("     curl -X POST {base} -H 'Content-Type: application/json' \\");
    println!(
        "       -d '{{\"testType\":\"chi-square\",\"subtype\":\"independence\",\
         \"observed\":[[30,10],[20,40]]}}'"
    );
    println!();

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(crosstab_server::run_server(&host, port));
}
