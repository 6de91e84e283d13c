//! Tableau dimension mapper CLI.

use clap::Parser;
use twb_cli::logging::init_logging;
use twb_core::OperationError;

mod cli;
mod commands;
mod summary;

use crate::cli::Cli;
use crate::commands::run;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli.command) {
        Ok(()) => 0,
        Err(error) => match error.downcast_ref::<OperationError>() {
            Some(operation) if operation.is_hard() => {
                eprintln!("error: {operation}");
                2
            }
            Some(operation) => {
                eprintln!("{}", operation.user_message());
                1
            }
            None => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}
