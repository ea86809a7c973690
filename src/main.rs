//! CLI entry point for rendering PAE figures of a prediction directory

use clap::Parser;
use paeviz::io::cli::{Cli, FigureProcessor, USAGE_EXIT_CODE};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version requests also arrive here and are not failures
            if err.print().is_err() {
                return ExitCode::FAILURE;
            }
            return if err.use_stderr() {
                ExitCode::from(USAGE_EXIT_CODE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let processor = FigureProcessor::new(cli);
    match processor.process() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
