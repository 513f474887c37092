//! Thin smoke-test binary: reads a query from a file argument or stdin,
//! parses it, and prints its canonical form. Not a supported CLI surface —
//! the library is the product; this exists to exercise the pipeline
//! end to end without a test harness.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use biblio_query::{log_error, log_success};

fn main() -> ExitCode {
    let _ = biblio_query::logging::init_global_logging();

    let input = match read_input() {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error reading input: {err}");
            return ExitCode::FAILURE;
        }
    };

    match biblio_query::parse(&input) {
        Ok(outcome) => {
            log_success!(
                biblio_query::logging::codes::Code::new("I000"),
                "compiled query"
            );
            println!("{}", outcome.canonical);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = biblio_query::logging::codes::parse::code_for_kind(err.kind());
            log_error!(code, err.to_string().as_str());
            eprintln!("{} ({})", err, err.kind());
            ExitCode::FAILURE
        }
    }
}

fn read_input() -> io::Result<String> {
    match env::args().nth(1) {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
