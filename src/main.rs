//! Binary entry point for zbctl-rs.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::Parser;
use std::io;
use std::process::ExitCode;
use zbctl_rs::cli::{Cli, execute};
use zbctl_rs::{HttpGateway, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let gateway = match HttpGateway::new(&cli.gateway_config()) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    let mut stdout = io::stdout();
    match execute(&cli, &gateway, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
