//! Shared fixtures for service tests.

#![allow(dead_code)]

use async_trait::async_trait;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Keypair, signature::Signature,
    transaction::Transaction,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use token2022_launchpad::chain::{ChainConnection, KeypairWallet, Provider};
use token2022_launchpad::config::{ServiceConfig, ServiceConfigBuilder, SimulatedLatency};
use token2022_launchpad::types::TokenCreationRequest;
use token2022_launchpad::ContractError;

pub const RENT_LAMPORTS: u64 = 2_039_280;

/// In-memory cluster that records everything sent to it.
#[derive(Default)]
pub struct FakeConnection {
    calls: AtomicUsize,
    sent: Mutex<Vec<Transaction>>,
    /// Failures keyed by submission index
    failures: Mutex<HashMap<usize, ContractError>>,
    accounts: Mutex<HashMap<Pubkey, Account>>,
}

impl FakeConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the next submission fail with `error`.
    pub fn fail_next_send(&self, error: ContractError) {
        let next = self.sent.lock().unwrap().len();
        self.fail_send_at(next, error);
    }

    /// Make the `index`th submission (0-based, counting all attempts) fail.
    pub fn fail_send_at(&self, index: usize, error: ContractError) {
        self.failures.lock().unwrap().insert(index, error);
    }

    pub fn insert_account(&self, address: Pubkey, account: Account) {
        self.accounts.lock().unwrap().insert(address, account);
    }

    /// Total number of network calls of any kind.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Submissions attempted, including failed ones.
    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChainConnection for FakeConnection {
    fn endpoint(&self) -> String {
        "memory://test".to_string()
    }

    async fn minimum_balance_for_rent_exemption(&self, _data_len: usize) -> Result<u64, ContractError> {
        self.record_call();
        Ok(RENT_LAMPORTS)
    }

    async fn latest_blockhash(&self) -> Result<Hash, ContractError> {
        self.record_call();
        Ok(Hash::new_unique())
    }

    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature, ContractError> {
        self.record_call();
        let index = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(transaction.clone());
            sent.len() - 1
        };

        if let Some(error) = self.failures.lock().unwrap().remove(&index) {
            return Err(error);
        }
        transaction
            .verify()
            .map_err(|e| ContractError::Rpc(format!("signature verification failed: {}", e)))?;
        Ok(transaction.signatures[0])
    }

    async fn account(&self, address: &Pubkey) -> Result<Option<Account>, ContractError> {
        self.record_call();
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }
}

pub fn test_config() -> ServiceConfig {
    ServiceConfigBuilder::new()
        .with_latency(SimulatedLatency::none())
        .build()
}

/// A provider with a fresh keypair wallet, returning the wallet's pubkey too.
pub fn test_provider(connection: Arc<FakeConnection>) -> (Arc<Provider>, Pubkey) {
    let keypair = Keypair::new();
    let wallet = KeypairWallet::new(keypair);
    let provider = Provider::new(connection, Arc::new(wallet));
    let pubkey = provider.pubkey();
    (Arc::new(provider), pubkey)
}

pub fn demo_token_request() -> TokenCreationRequest {
    TokenCreationRequest {
        name: "Demo".to_string(),
        symbol: "DEMO".to_string(),
        decimals: 6,
        supply: 1_000_000,
        enable_transfer_hook: true,
        enable_whitelist: true,
    }
}
