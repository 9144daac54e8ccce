use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use ethers::{
    abi::{
        token::{LenientTokenizer, Tokenizer},
        Abi, Token,
    },
    contract::ContractFactory,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{transaction::eip2718::TypedTransaction, TransactionRequest, H160, H256, U64},
};

use crate::{
    artifact::ContractArtifact, credential::Credential, error::DeployError,
    profile::NetworkProfile,
};

pub type Client = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Upper bound on the confirmation wait: the poll loop stops at whichever
/// of `max_attempts` or `timeout` is exhausted first.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationPolicy {
    pub max_attempts: usize,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Outcome of one confirmed deployment. Produced once, consumed once by
/// the reporter.
#[derive(Debug, Clone)]
pub struct DeploymentResult {
    pub address: H160,
    pub transaction_hash: H256,
    pub confirmations: u64,
}

/// A contract artifact bound to a network and a signing account.
pub struct Deploy {
    client: Arc<Client>,
    endpoint: String,
    artifact: ContractArtifact,
    policy: ConfirmationPolicy,
}

impl Deploy {
    /// Binds the artifact to the profile's endpoint with the resolved
    /// credential. Probes the endpoint once; an unreachable node, or a node
    /// contradicting the profile's pinned chain id, is refused here rather
    /// than at submission time.
    pub async fn bind(
        artifact: ContractArtifact,
        profile: &NetworkProfile,
        credential: &Credential,
    ) -> Result<Self, DeployError> {
        let endpoint = profile.rpc_endpoint.as_str().to_owned();
        let provider = Provider::<Http>::try_from(endpoint.as_str()).map_err(|e| {
            DeployError::ConnectionError {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            }
        })?;

        let reported = provider
            .get_chainid()
            .await
            .map_err(|e| DeployError::ConnectionError {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?
            .as_u64();
        let chain_id = match profile.chain_id {
            Some(pinned) if pinned != reported => {
                return Err(DeployError::ConnectionError {
                    endpoint,
                    reason: format!(
                        "profile `{}` expects chain id {pinned}, node reports {reported}",
                        profile.name
                    ),
                })
            }
            Some(pinned) => pinned,
            None => reported,
        };

        let client = Arc::new(SignerMiddleware::new(
            provider,
            credential.wallet().clone().with_chain_id(chain_id),
        ));

        Ok(Self {
            client,
            endpoint,
            artifact,
            policy: ConfirmationPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: ConfirmationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Deploys the bound artifact: validates the constructor arguments,
    /// submits exactly one creation transaction, and waits for the network
    /// to confirm code at the computed address.
    pub async fn run(&self, args: &[String]) -> Result<DeploymentResult, DeployError> {
        let params = tokenize_constructor_args(&self.artifact.abi, args)?;
        let transaction_hash = self.submit(params).await?;
        self.await_confirmation(transaction_hash).await
    }

    async fn submit(&self, params: Vec<Token>) -> Result<H256, DeployError> {
        let factory = ContractFactory::new(
            self.artifact.abi.clone(),
            self.artifact.bytecode.clone(),
            self.client.clone(),
        );
        let deployer = factory
            .deploy_tokens(params)
            .map_err(|e| DeployError::ArgumentMismatch {
                detail: e.to_string(),
            })?;
        let init_code = deployer
            .tx
            .data()
            .cloned()
            .ok_or_else(|| DeployError::SubmissionError {
                reason: "creation transaction has no init code".to_owned(),
            })?;

        let from = self.client.signer().address();
        let nonce = self
            .client
            .get_transaction_count(from, None)
            .await
            .map_err(submission)?;
        let gas_price = self.client.get_gas_price().await.map_err(submission)?;

        let tx = TransactionRequest::new()
            .from(from)
            .data(init_code)
            .nonce(nonce)
            .gas_price(gas_price);
        let mut tx = TypedTransaction::Legacy(tx);
        let gas = self
            .client
            .estimate_gas(&tx, None)
            .await
            .map_err(submission)?;
        tx.set_gas(gas);

        let transaction_hash = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(submission)?
            .tx_hash();
        // Known from this point on; an interrupted run may already be on
        // chain, so the hash must be visible for manual reconciliation.
        log::info!("creation transaction hash:{:?}", transaction_hash);
        Ok(transaction_hash)
    }

    async fn await_confirmation(&self, tx_hash: H256) -> Result<DeploymentResult, DeployError> {
        let deadline = Instant::now() + self.policy.timeout;
        let mut attempts = 0;

        while attempts < self.policy.max_attempts && Instant::now() < deadline {
            attempts += 1;
            tokio::time::sleep(self.policy.poll_interval).await;

            let receipt = match self
                .client
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| self.connection(e))?
            {
                Some(receipt) => receipt,
                None => {
                    log::debug!("poll {attempts}: transaction {tx_hash:?} not yet mined");
                    continue;
                }
            };

            if receipt.status == Some(U64::zero()) {
                return Err(DeployError::SubmissionError {
                    reason: format!("creation transaction {tx_hash:?} reverted"),
                });
            }
            let address = match receipt.contract_address {
                Some(address) => address,
                None => {
                    return Err(DeployError::SubmissionError {
                        reason: format!("receipt for {tx_hash:?} carries no contract address"),
                    })
                }
            };

            // Mined is not enough: the contract only exists once its code
            // is observable at the computed address.
            let code = self
                .client
                .get_code(address, None)
                .await
                .map_err(|e| self.connection(e))?;
            if code.is_empty() {
                log::debug!("poll {attempts}: no code at {address:?} yet");
                continue;
            }

            let confirmations = match receipt.block_number {
                Some(mined) => {
                    let head = self
                        .client
                        .get_block_number()
                        .await
                        .map_err(|e| self.connection(e))?;
                    head.saturating_sub(mined).as_u64() + 1
                }
                None => 1,
            };

            return Ok(DeploymentResult {
                address,
                transaction_hash: tx_hash,
                confirmations,
            });
        }

        Err(DeployError::ConfirmationTimeout { tx_hash, attempts })
    }

    fn connection(&self, e: impl std::fmt::Display) -> DeployError {
        DeployError::ConnectionError {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        }
    }
}

fn submission(e: impl std::fmt::Display) -> DeployError {
    DeployError::SubmissionError {
        reason: e.to_string(),
    }
}

/// Checks the supplied argument strings against the constructor signature
/// declared in the ABI, count first, then type by type. Pure validation:
/// called before anything touches the network.
pub fn tokenize_constructor_args(abi: &Abi, args: &[String]) -> Result<Vec<Token>, DeployError> {
    let inputs = abi
        .constructor
        .as_ref()
        .map(|c| c.inputs.as_slice())
        .unwrap_or_default();

    if inputs.len() != args.len() {
        return Err(DeployError::ArgumentMismatch {
            detail: format!(
                "constructor takes {} argument(s), {} supplied",
                inputs.len(),
                args.len()
            ),
        });
    }

    inputs
        .iter()
        .zip(args)
        .map(|(input, arg)| {
            LenientTokenizer::tokenize(&input.kind, arg).map_err(|_| {
                DeployError::ArgumentMismatch {
                    detail: format!(
                        "`{arg}` is not a valid `{}` for `{}`",
                        input.kind, input.name
                    ),
                }
            })
        })
        .collect()
}
