//! Named network profiles and their resolution.
//!
//! The profile set is closed: it is enumerated once at startup, with every
//! endpoint validated before anything attempts a connection. Endpoints and
//! chain ids can be overridden through the environment so no connection
//! parameter is baked into the binary.

use std::env;

use url::Url;

use crate::error::DeployError;

const LOCAL_RPC_VAR: &str = "RENTAL_LOCAL_RPC_URL";
const LOCAL_CHAIN_ID_VAR: &str = "RENTAL_LOCAL_CHAIN_ID";
const TESTNET_RPC_VAR: &str = "RENTAL_TESTNET_RPC_URL";
const TESTNET_CHAIN_ID_VAR: &str = "RENTAL_TESTNET_CHAIN_ID";

const LOCAL_RPC_DEFAULT: &str = "http://127.0.0.1:8545";
const TESTNET_RPC_DEFAULT: &str = "https://rpc.sepolia.org";
const TESTNET_CHAIN_ID_DEFAULT: u64 = 11155111;

/// Connection parameters for one named network, plus the name of the
/// environment variable its signing credential is read from.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    pub name: String,
    pub rpc_endpoint: Url,
    pub chain_id: Option<u64>,
    pub signing_key_var: String,
}

/// The enumerated profile table.
#[derive(Debug)]
pub struct Profiles {
    entries: Vec<NetworkProfile>,
}

impl Profiles {
    pub fn from_env() -> Result<Self, DeployError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the table through an arbitrary variable lookup so tests can
    /// substitute configuration without touching process state.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, DeployError> {
        let local = NetworkProfile {
            name: "local".to_owned(),
            rpc_endpoint: parse_endpoint(
                &lookup(LOCAL_RPC_VAR).unwrap_or_else(|| LOCAL_RPC_DEFAULT.to_owned()),
            )?,
            // Local node ids vary (hardhat, ganache); adopt whatever the
            // node reports at bind time.
            chain_id: parse_chain_id(LOCAL_CHAIN_ID_VAR, lookup(LOCAL_CHAIN_ID_VAR))?,
            signing_key_var: "PRIVATE_KEY".to_owned(),
        };

        let testnet = NetworkProfile {
            name: "testnet".to_owned(),
            rpc_endpoint: parse_endpoint(
                &lookup(TESTNET_RPC_VAR).unwrap_or_else(|| TESTNET_RPC_DEFAULT.to_owned()),
            )?,
            chain_id: parse_chain_id(TESTNET_CHAIN_ID_VAR, lookup(TESTNET_CHAIN_ID_VAR))?
                .or(Some(TESTNET_CHAIN_ID_DEFAULT)),
            signing_key_var: "TESTNET_PRIVATE_KEY".to_owned(),
        };

        Ok(Self {
            entries: vec![local, testnet],
        })
    }

    /// Pure lookup: no side effect, no network call.
    pub fn resolve(&self, name: &str) -> Result<&NetworkProfile, DeployError> {
        self.entries
            .iter()
            .find(|profile| profile.name == name)
            .ok_or_else(|| DeployError::UnknownProfile {
                name: name.to_owned(),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|p| p.name.as_str()).collect()
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, DeployError> {
    Url::parse(raw).map_err(|e| DeployError::ConnectionError {
        endpoint: raw.to_owned(),
        reason: format!("invalid RPC URL: {e}"),
    })
}

fn parse_chain_id(var: &str, raw: Option<String>) -> Result<Option<u64>, DeployError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| DeployError::ConnectionError {
                endpoint: var.to_owned(),
                reason: format!("`{value}` is not a valid chain id"),
            }),
    }
}
