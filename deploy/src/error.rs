//! Failure taxonomy for the deployment pipeline.
//!
//! Every error is terminal for the current invocation: nothing here is
//! retried internally, because resubmitting a creation transaction risks
//! deploying the contract twice. Re-running the tool is an operator decision.

use ethers::types::H256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    /// The requested profile name is not in the enumerated profile table.
    #[error("unknown network profile `{name}`")]
    UnknownProfile { name: String },

    /// The signing credential source is unset, empty, or unusable.
    /// The reason string never contains key material.
    #[error("missing signing credential: environment variable `{var}` {reason}")]
    MissingCredential { var: String, reason: &'static str },

    /// No compiled artifact could be loaded for the named contract.
    #[error("artifact for contract `{name}` not found: {reason}")]
    ArtifactNotFound { name: String, reason: String },

    /// The network endpoint is unusable or unreachable.
    #[error("cannot use network endpoint `{endpoint}`: {reason}")]
    ConnectionError { endpoint: String, reason: String },

    /// The supplied constructor arguments do not match the constructor
    /// signature declared in the artifact's ABI.
    #[error("constructor argument mismatch: {detail}")]
    ArgumentMismatch { detail: String },

    /// The network refused the creation transaction, or the transaction
    /// was mined but did not create a contract.
    #[error("submission failed: {reason}")]
    SubmissionError { reason: String },

    /// The network did not confirm the creation transaction within the
    /// configured bound. The hash is kept so the run can be reconciled
    /// manually before any retry.
    #[error(
        "transaction {tx_hash:?} unconfirmed after {attempts} poll(s); \
         reconcile manually before retrying"
    )]
    ConfirmationTimeout { tx_hash: H256, attempts: usize },
}
