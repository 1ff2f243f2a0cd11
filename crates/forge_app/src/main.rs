mod config;
mod logging;
mod runner;
mod wizard;

use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::initialize(logging::LogDestination::File);
    let config = config::load_or_default(Path::new("studio.ron"));

    match wizard::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("studio: {err}");
            ExitCode::FAILURE
        }
    }
}
