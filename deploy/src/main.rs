use std::process::ExitCode;

use clap::Parser;
use rental_agreement_contracts::command_line::CommandLine;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cmd = CommandLine::parse();
    cmd.execute().await
}
