use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{Args, Parser, Subcommand};

use crate::{
    artifact::ContractArtifact,
    credential::Credential,
    deploy::{ConfirmationPolicy, Deploy, DeploymentResult},
    error::DeployError,
    profile::Profiles,
    report,
};

#[derive(Debug, Parser)]
#[clap(about = "Deploys the rental agreement contracts to a configured network")]
pub struct CommandLine {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Deploy a compiled contract and report its on-chain address
    Deploy(DeployArgs),
}

#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Network profile to deploy against
    #[clap(short, long, env = "RENTAL_PROFILE", default_value = "local")]
    profile: String,

    /// Name of the compiled contract to deploy
    #[clap(short, long, default_value = "RentalAgreement")]
    contract: String,

    /// Directory holding the compiled artifacts
    #[clap(long, env = "RENTAL_ARTIFACTS_DIR", default_value = "build")]
    artifacts: PathBuf,

    /// Constructor arguments, positional, in declaration order
    #[clap(long, num_args(0..), value_name = "VALUE")]
    args: Vec<String>,

    /// Maximum confirmation polls before giving up
    #[clap(long, default_value_t = 60)]
    max_attempts: usize,

    /// Overall confirmation timeout in seconds
    #[clap(long, default_value_t = 120)]
    timeout: u64,
}

impl CommandLine {
    pub async fn execute(self) -> ExitCode {
        match self.command {
            Command::Deploy(args) => args.execute().await,
        }
    }
}

impl DeployArgs {
    pub async fn execute(self) -> ExitCode {
        let outcome = self.run().await;
        report::report(&self.contract, &outcome)
    }

    /// The deployment pipeline, strictly sequential: profile → credential →
    /// artifact → bound factory → creation transaction → confirmation.
    async fn run(&self) -> Result<DeploymentResult, DeployError> {
        let profiles = Profiles::from_env()?;
        let profile = profiles.resolve(&self.profile)?;
        let credential = Credential::from_env(&profile.signing_key_var)?;
        let artifact = ContractArtifact::load(&self.artifacts, &self.contract)?;

        let deploy = Deploy::bind(artifact, profile, &credential)
            .await?
            .with_policy(ConfirmationPolicy {
                max_attempts: self.max_attempts,
                timeout: Duration::from_secs(self.timeout),
                ..ConfirmationPolicy::default()
            });
        deploy.run(&self.args).await
    }
}
