//! Loading of precompiled contract artifacts.
//!
//! Compilation is someone else's job: this module only consumes the hardhat
//! artifact JSON (`abi` + `bytecode`) that the contract toolchain writes,
//! one file per contract under the artifacts directory.

use std::{fs, path::Path};

use ethers::{abi::Abi, types::Bytes};
use serde::Deserialize;

use crate::error::DeployError;

#[derive(Debug, Deserialize)]
struct ArtifactFile {
    abi: Abi,
    bytecode: Bytes,
}

/// A compiled contract interface, ready to be bound to a network.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    pub fn load(dir: &Path, name: &str) -> Result<Self, DeployError> {
        let path = dir.join(format!("{name}.json"));
        let raw = fs::read_to_string(&path).map_err(|e| DeployError::ArtifactNotFound {
            name: name.to_owned(),
            reason: format!("cannot read `{}`: {e}", path.display()),
        })?;

        let parsed: ArtifactFile =
            serde_json::from_str(&raw).map_err(|e| DeployError::ArtifactNotFound {
                name: name.to_owned(),
                reason: format!("`{}` is not a compiled artifact: {e}", path.display()),
            })?;

        if parsed.bytecode.is_empty() {
            return Err(DeployError::ArtifactNotFound {
                name: name.to_owned(),
                reason: format!("`{}` carries no deployable bytecode", path.display()),
            });
        }

        Ok(Self {
            name: name.to_owned(),
            abi: parsed.abi,
            bytecode: parsed.bytecode,
        })
    }
}
