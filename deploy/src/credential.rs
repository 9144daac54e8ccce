//! Signing credential resolution.
//!
//! The key is read from the environment at process start, lives only in
//! memory, and is dropped at exit. Nothing in this module (or anywhere
//! downstream) may echo the value: parse failures discard the underlying
//! error wholesale so no fragment of a partially read key can reach a log
//! line or error message.

use std::{env, fmt};

use ethers::{
    signers::{LocalWallet, Signer},
    types::H160,
    utils::hex,
};

use crate::error::DeployError;

pub struct Credential {
    wallet: LocalWallet,
}

impl Credential {
    pub fn from_env(var: &str) -> Result<Self, DeployError> {
        Self::from_lookup(var, env::var(var).ok())
    }

    pub fn from_lookup(var: &str, value: Option<String>) -> Result<Self, DeployError> {
        let raw = match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                return Err(DeployError::MissingCredential {
                    var: var.to_owned(),
                    reason: "is not set or empty",
                })
            }
        };
        let raw = raw.trim();

        let bytes = hex::decode(raw.strip_prefix("0x").unwrap_or(raw)).map_err(|_| {
            DeployError::MissingCredential {
                var: var.to_owned(),
                reason: "is not valid hex",
            }
        })?;
        let wallet =
            LocalWallet::from_bytes(&bytes).map_err(|_| DeployError::MissingCredential {
                var: var.to_owned(),
                reason: "is not a usable signing key",
            })?;

        Ok(Self { wallet })
    }

    /// Address of the deploying account.
    pub fn address(&self) -> H160 {
        self.wallet.address()
    }

    pub(crate) fn wallet(&self) -> &LocalWallet {
        &self.wallet
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
