use std::process::ExitCode;
use clap::Parser;
use env_logger::Env;
use log::error;

use fillgrid::cli::{run, Cli};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{}", err);
            ExitCode::from(2)
        }
    }
}
