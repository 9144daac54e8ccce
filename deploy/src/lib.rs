//! Deployment tooling for the rental agreement contracts: resolves a named
//! network profile and its signing credential, loads a compiled artifact,
//! submits the creation transaction, and reports the deployed address.

pub mod artifact;
pub mod command_line;
pub mod credential;
pub mod deploy;
pub mod error;
pub mod profile;
pub mod report;
