pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "haggle",
    about = "Haggle operator CLI",
    long_about = "Run the console negotiation simulation, inspect effective configuration, and bootstrap the hosted voice agent.",
    after_help = "Examples:\n  haggle simulate\n  haggle config\n  haggle provision"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run one negotiation pass over the catalog and print the call transcript")]
    Simulate,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Provision the hosted voice agent once and print the resulting agent id")]
    Provision,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Simulate => commands::simulate::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Provision => commands::provision::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
