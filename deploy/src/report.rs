//! Operator-facing reporting. The single place where the process exit
//! status is decided: exit 0 only when a deployment result exists.

use std::process::ExitCode;

use crate::{deploy::DeploymentResult, error::DeployError};

pub fn report(contract: &str, outcome: &Result<DeploymentResult, DeployError>) -> ExitCode {
    match outcome {
        Ok(result) => println!("{}", success_line(contract, result)),
        Err(error) => eprintln!("{}", failure_line(error)),
    }
    ExitCode::from(exit_status(outcome))
}

fn success_line(contract: &str, result: &DeploymentResult) -> String {
    format!(
        "{contract} deployed to {:?} (tx {:?}, {} confirmation(s))",
        result.address, result.transaction_hash, result.confirmations
    )
}

fn failure_line(error: &DeployError) -> String {
    format!("deploy failed: {error}")
}

fn exit_status(outcome: &Result<DeploymentResult, DeployError>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
