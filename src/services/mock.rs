//! Simulated contract service.
//!
//! Every operation returns freshly generated placeholder identifiers after a
//! fixed artificial delay. Nothing is persisted between calls: a mint created
//! here is unknown to the balance lookup.

use crate::chain::provider::Provider;
use crate::config::{ServiceConfig, SimulatedLatency};
use crate::error::ContractError;
use crate::quote;
use crate::services::latency::Delay;
use crate::types::{
    PoolCreationRequest, PoolCreationResult, ProgramInfo, SwapRequest, SwapResult,
    TokenCreationRequest, TokenCreationResult, TransactionHistoryEntry, WhitelistInitResult,
};
use rand::Rng;
use solana_sdk::signature::{Keypair, Signer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Demo balances keyed by token address.
const MOCK_BALANCES: [(&str, f64); 3] = [
    ("SOL", 50.25),
    ("COMP123abc", 1000.0),
    ("TEST456def", 500.0),
];

/// Addresses reported as whitelisted.
const MOCK_WHITELIST: [&str; 3] = [
    "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8", // Raydium
    "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc",  // Orca
    "COMP123abc",
];

pub struct MockContractService {
    provider: Option<Arc<Provider>>,
    program_info: ProgramInfo,
    latency: SimulatedLatency,
    delay: Arc<dyn Delay>,
}

impl MockContractService {
    pub fn new(config: &ServiceConfig, delay: Arc<dyn Delay>) -> Self {
        Self {
            provider: None,
            program_info: program_info(config),
            latency: config.latency.clone(),
            delay,
        }
    }

    /// Attach a wallet session. The mock only checks that one is present.
    pub fn set_provider(&mut self, provider: Arc<Provider>) {
        debug!("Mock contract service bound to {}", provider.pubkey());
        self.provider = Some(provider);
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    fn ensure_provider(&self) -> Result<(), ContractError> {
        if self.provider.is_none() {
            return Err(ContractError::NotReady);
        }
        Ok(())
    }

    async fn simulate(&self, millis: u64) {
        self.delay.sleep(Duration::from_millis(millis)).await;
    }

    #[instrument(skip(self, request), fields(symbol = %request.symbol))]
    pub async fn create_token(&self, request: &TokenCreationRequest) -> Result<TokenCreationResult, ContractError> {
        self.ensure_provider()?;

        let mint_address = placeholder_address();
        let transaction_signature = placeholder_signature("mock_signature_");
        self.simulate(self.latency.create_token_ms).await;

        debug!("Simulated token {} at {}", request.symbol, mint_address);
        Ok(TokenCreationResult {
            mint_address,
            transaction_signature,
        })
    }

    #[instrument(skip(self, request), fields(platform = %request.amm_platform))]
    pub async fn create_pool(&self, request: &PoolCreationRequest) -> Result<PoolCreationResult, ContractError> {
        self.ensure_provider()?;

        let pool_address = placeholder_address();
        let transaction_signature = placeholder_signature("pool_create_");
        self.simulate(self.latency.create_pool_ms).await;

        Ok(PoolCreationResult {
            pool_address,
            transaction_signature,
        })
    }

    /// Output is the input less a fixed 2% spread, whatever the route or slippage.
    #[instrument(skip(self, request), fields(amount = request.from_amount))]
    pub async fn swap_tokens(&self, request: &SwapRequest) -> Result<SwapResult, ContractError> {
        self.ensure_provider()?;

        let transaction_signature = placeholder_signature("swap_");
        let output_amount = request.from_amount * quote::SIMULATED_OUTPUT_RATE;
        self.simulate(self.latency.swap_ms).await;

        Ok(SwapResult {
            transaction_signature,
            output_amount,
        })
    }

    #[instrument(skip(self))]
    pub async fn initialize_whitelist(&self) -> Result<WhitelistInitResult, ContractError> {
        self.ensure_provider()?;

        let transaction_signature = placeholder_signature("whitelist_init_");
        self.simulate(self.latency.initialize_whitelist_ms).await;

        Ok(WhitelistInitResult {
            whitelist_address: None,
            transaction_signature,
        })
    }

    #[instrument(skip(self))]
    pub async fn add_to_whitelist(&self, address: &str) -> Result<String, ContractError> {
        self.ensure_provider()?;

        let signature = placeholder_signature("whitelist_add_");
        self.simulate(self.latency.add_to_whitelist_ms).await;
        Ok(signature)
    }

    /// Demo balance for a token; unknown tokens hold nothing.
    pub fn token_balance(&self, token_address: &str, _wallet_address: &str) -> f64 {
        MOCK_BALANCES
            .iter()
            .find(|(token, _)| *token == token_address)
            .map(|(_, balance)| *balance)
            .unwrap_or(0.0)
    }

    pub async fn is_whitelisted(&self, address: &str) -> Result<bool, ContractError> {
        Ok(MOCK_WHITELIST.contains(&address))
    }

    pub async fn transaction_history(&self, _wallet_address: &str) -> Vec<TransactionHistoryEntry> {
        Vec::new()
    }

    pub fn program_info(&self) -> ProgramInfo {
        self.program_info.clone()
    }
}

/// Constant description of the deployed program.
pub(crate) fn program_info(config: &ServiceConfig) -> ProgramInfo {
    ProgramInfo {
        program_id: config.program_id.clone(),
        network: config.cluster.to_string(),
        status: "deployed".to_string(),
        version: "0.1.0".to_string(),
    }
}

/// A random address that is a valid public key but owns nothing.
pub(crate) fn placeholder_address() -> String {
    Keypair::new().pubkey().to_string()
}

/// `prefix` followed by nine random base-36 characters.
pub(crate) fn placeholder_signature(prefix: &str) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}{}", prefix, suffix)
}
