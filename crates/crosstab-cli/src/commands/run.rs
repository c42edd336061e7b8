use std::fs;
use std::io::Read;

use crosstab_core::{EngineError, TestRequest, dispatch, sanitize};

pub fn run(input: Option<&str>, compact: bool) {
    let raw = match read_input(input) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let request: TestRequest = match serde_json::from_str(&raw) {
        Ok(request) => request,
        Err(e) => fail(&EngineError::Validation(e.to_string())),
    };

    match dispatch(&request).and_then(|report| sanitize::to_wire(&report)) {
        Ok(wire) => {
            let rendered = if compact {
                wire.to_string()
            } else {
                serde_json::to_string_pretty(&wire).unwrap_or_else(|_| wire.to_string())
            };
            println!("{rendered}");
        }
        Err(err) => fail(&err),
    }
}

fn fail(err: &EngineError) -> ! {
    eprintln!("{}", err.to_wire());
    std::process::exit(1);
}

fn read_input(input: Option<&str>) -> std::io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
