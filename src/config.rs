//! Service configuration.

use crate::error::ContractError;
use crate::explorer::Cluster;
use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::time::Duration;

/// Address of the deployed whitelist / transfer hook program.
pub const DEFAULT_PROGRAM_ID: &str = "4zdEwmyscfRwbnzKWAaQA61HNp2uxCxyij3Sz9JxLSiK";

/// Artificial latencies used by simulated operations, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedLatency {
    pub create_token_ms: u64,
    pub create_pool_ms: u64,
    pub swap_ms: u64,
    pub initialize_whitelist_ms: u64,
    pub add_to_whitelist_ms: u64,
    /// Pool creation stub on the real path
    pub real_create_pool_ms: u64,
    /// Swap stub on the real path
    pub real_swap_ms: u64,
}

impl SimulatedLatency {
    /// All delays set to zero.
    pub fn none() -> Self {
        Self {
            create_token_ms: 0,
            create_pool_ms: 0,
            swap_ms: 0,
            initialize_whitelist_ms: 0,
            add_to_whitelist_ms: 0,
            real_create_pool_ms: 0,
            real_swap_ms: 0,
        }
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            create_token_ms: 2000,
            create_pool_ms: 3000,
            swap_ms: 2500,
            initialize_whitelist_ms: 1500,
            add_to_whitelist_ms: 1000,
            real_create_pool_ms: 3000,
            real_swap_ms: 2000,
        }
    }
}

/// Configuration shared by the contract services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// RPC endpoint
    pub rpc_url: String,
    /// Cluster used for explorer links and program info
    pub cluster: Cluster,
    /// Commitment level name ("processed", "confirmed", "finalized")
    pub commitment: String,
    /// Deployed program address
    pub program_id: String,
    /// RPC timeout in seconds
    pub rpc_timeout_seconds: u64,
    /// Simulated latencies
    pub latency: SimulatedLatency,
    /// Fall back to the mock path when the network rejects a real operation.
    /// When false, rejections are returned to the caller.
    pub fallback_on_rejection: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            rpc_url: Cluster::Devnet.default_rpc_url().to_string(),
            cluster: Cluster::Devnet,
            commitment: "confirmed".to_string(),
            program_id: DEFAULT_PROGRAM_ID.to_string(),
            rpc_timeout_seconds: 30,
            latency: SimulatedLatency::default(),
            fallback_on_rejection: true,
        }
    }
}

impl ServiceConfig {
    /// Defaults overlaid with `LAUNCHPAD_*` environment variables.
    pub fn from_env() -> Result<Self, ContractError> {
        let mut config = Self::default();

        if let Ok(cluster) = std::env::var("LAUNCHPAD_CLUSTER") {
            config.cluster = cluster.parse().map_err(ContractError::InvalidRequest)?;
            config.rpc_url = config.cluster.default_rpc_url().to_string();
        }
        if let Ok(rpc_url) = std::env::var("LAUNCHPAD_RPC_URL") {
            config.rpc_url = rpc_url;
        }
        if let Ok(program_id) = std::env::var("LAUNCHPAD_PROGRAM_ID") {
            config.program_id = program_id;
        }
        if let Ok(commitment) = std::env::var("LAUNCHPAD_COMMITMENT") {
            config.commitment = commitment;
        }

        config.program_pubkey()?;
        config.commitment_config()?;
        Ok(config)
    }

    pub fn program_pubkey(&self) -> Result<Pubkey, ContractError> {
        Pubkey::from_str(&self.program_id)
            .map_err(|_| ContractError::InvalidAddress(self.program_id.clone()))
    }

    pub fn commitment_config(&self) -> Result<CommitmentConfig, ContractError> {
        let level = CommitmentLevel::from_str(&self.commitment).map_err(|_| {
            ContractError::InvalidRequest(format!("unknown commitment `{}`", self.commitment))
        })?;
        Ok(CommitmentConfig { commitment: level })
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_seconds)
    }
}

/// Builder for [`ServiceConfig`].
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
        }
    }

    /// Target a cluster and its public RPC endpoint.
    pub fn with_cluster(mut self, cluster: Cluster) -> Self {
        self.config.cluster = cluster;
        self.config.rpc_url = cluster.default_rpc_url().to_string();
        self
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.config.rpc_url = rpc_url.into();
        self
    }

    pub fn with_program_id(mut self, program_id: impl Into<String>) -> Self {
        self.config.program_id = program_id.into();
        self
    }

    pub fn with_commitment(mut self, commitment: impl Into<String>) -> Self {
        self.config.commitment = commitment.into();
        self
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.config.latency = latency;
        self
    }

    pub fn with_fallback_on_rejection(mut self, enabled: bool) -> Self {
        self.config.fallback_on_rejection = enabled;
        self
    }

    pub fn build(self) -> ServiceConfig {
        self.config
    }
}

impl Default for ServiceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
