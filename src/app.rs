//! Application context owning the connection and contract service.

use crate::chain::connection::{ChainConnection, RpcConnection};
use crate::chain::provider::{Provider, WalletSigner};
use crate::config::ServiceConfig;
use crate::error::ContractError;
use crate::explorer::{self, Cluster};
use crate::services::{Delay, HybridContractService, ServiceMode, TokioDelay};
use std::sync::Arc;
use tracing::info;

/// Top-level state handed to the token, pool and trading workflows.
pub struct AppContext {
    config: ServiceConfig,
    connection: Arc<dyn ChainConnection>,
    contracts: HybridContractService,
}

impl AppContext {
    /// Context talking to the configured RPC endpoint with real timers.
    pub fn connect(config: ServiceConfig) -> Result<Self, ContractError> {
        let connection: Arc<dyn ChainConnection> = Arc::new(RpcConnection::new(
            config.rpc_url.clone(),
            config.rpc_timeout(),
            config.commitment_config()?,
        ));
        Self::with_connection(config, connection, Arc::new(TokioDelay))
    }

    pub fn with_connection(
        config: ServiceConfig,
        connection: Arc<dyn ChainConnection>,
        delay: Arc<dyn Delay>,
    ) -> Result<Self, ContractError> {
        let contracts = HybridContractService::new(connection.clone(), &config, delay)?;
        info!("Contract services ready on {}", connection.endpoint());
        Ok(Self {
            config,
            connection,
            contracts,
        })
    }

    /// Attach a wallet to the contract services.
    pub fn connect_wallet(&mut self, wallet: Arc<dyn WalletSigner>) -> ServiceMode {
        let provider = Arc::new(Provider::new(self.connection.clone(), wallet));
        self.contracts.set_provider(provider)
    }

    pub fn contracts(&self) -> &HybridContractService {
        &self.contracts
    }

    pub fn connection(&self) -> &Arc<dyn ChainConnection> {
        &self.connection
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn cluster(&self) -> Cluster {
        self.config.cluster
    }

    pub fn token_link(&self, mint_address: &str) -> String {
        explorer::token_explorer_url(mint_address, self.config.cluster)
    }

    pub fn transaction_link(&self, signature: &str) -> String {
        explorer::transaction_explorer_url(signature, self.config.cluster)
    }
}
