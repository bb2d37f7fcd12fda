//! Binary entrypoint for the `partcart` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match partcart::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
