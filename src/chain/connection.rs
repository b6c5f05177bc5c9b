//! Network connection seam.
//!
//! Services talk to the cluster only through [`ChainConnection`], so the
//! Solana RPC client can be swapped for an in-memory ledger in tests.

use crate::error::ContractError;
use async_trait::async_trait;
use moka::future::Cache;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Read and submit operations against a cluster.
#[async_trait]
pub trait ChainConnection: Send + Sync {
    /// Endpoint description for logs.
    fn endpoint(&self) -> String;

    /// Lamports an account of `data_len` bytes must hold to be rent-exempt.
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, ContractError>;

    async fn latest_blockhash(&self) -> Result<Hash, ContractError>;

    /// Submit a fully signed transaction and wait for confirmation.
    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature, ContractError>;

    /// Account metadata, `None` if the account does not exist.
    async fn account(&self, address: &Pubkey) -> Result<Option<Account>, ContractError>;
}

/// [`ChainConnection`] backed by the nonblocking Solana RPC client.
pub struct RpcConnection {
    client: Arc<RpcClient>,
    commitment: CommitmentConfig,
    /// Rent minimums only depend on data length for a given cluster
    rent_cache: Cache<usize, u64>,
}

impl RpcConnection {
    pub fn new(rpc_url: String, timeout: Duration, commitment: CommitmentConfig) -> Self {
        let client = RpcClient::new_with_timeout_and_commitment(rpc_url, timeout, commitment);
        Self::from_client(Arc::new(client), commitment)
    }

    pub fn from_client(client: Arc<RpcClient>, commitment: CommitmentConfig) -> Self {
        Self {
            client,
            commitment,
            rent_cache: Cache::new(64),
        }
    }
}

#[async_trait]
impl ChainConnection for RpcConnection {
    fn endpoint(&self) -> String {
        self.client.url()
    }

    #[instrument(skip(self))]
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, ContractError> {
        if let Some(lamports) = self.rent_cache.get(&data_len).await {
            return Ok(lamports);
        }

        let lamports = self
            .client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await?;
        self.rent_cache.insert(data_len, lamports).await;

        debug!("Rent-exempt minimum for {} bytes: {} lamports", data_len, lamports);
        Ok(lamports)
    }

    async fn latest_blockhash(&self) -> Result<Hash, ContractError> {
        Ok(self.client.get_latest_blockhash().await?)
    }

    #[instrument(skip(self, transaction), fields(instructions = transaction.message.instructions.len()))]
    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature, ContractError> {
        let signature = self.client.send_and_confirm_transaction(transaction).await?;
        debug!("Transaction confirmed: {}", signature);
        Ok(signature)
    }

    async fn account(&self, address: &Pubkey) -> Result<Option<Account>, ContractError> {
        let response = self
            .client
            .get_account_with_commitment(address, self.commitment)
            .await?;
        Ok(response.value)
    }
}
