//! Contract service that prefers the real path and falls back to the mock.
//!
//! Each call tries the real service first once a provider is bound and, if
//! that fails, serves the same call from the mock. A failed call never
//! demotes the service: the next call tries the real path again. A token
//! creation that confirmed its mint before failing is never replaced by a
//! simulated one.

use crate::chain::connection::ChainConnection;
use crate::chain::provider::Provider;
use crate::config::ServiceConfig;
use crate::error::ContractError;
use crate::services::latency::Delay;
use crate::services::mock::MockContractService;
use crate::services::real::RealContractService;
use crate::services::routing::{Operation, RealSupport, Route, Routed};
use crate::types::{
    PoolCreationRequest, PoolCreationResult, ProgramInfo, SwapRequest, SwapResult,
    TokenCreationRequest, TokenCreationResult, TransactionHistoryEntry, WhitelistInitResult,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

/// Which implementation the service presents, for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMode {
    /// No wallet attached
    Disconnected,
    /// Wallet attached, mock contract only
    Demo,
    /// Wallet attached, deployed program bound
    Live,
}

pub struct HybridContractService {
    real: RealContractService,
    mock: MockContractService,
    use_real: bool,
    fallback_on_rejection: bool,
}

impl HybridContractService {
    pub fn new(
        connection: Arc<dyn ChainConnection>,
        config: &ServiceConfig,
        delay: Arc<dyn Delay>,
    ) -> Result<Self, ContractError> {
        let real = RealContractService::new(connection, config, delay.clone())?;
        let mock = MockContractService::new(config, delay);
        Ok(Self::from_services(real, mock, config.fallback_on_rejection))
    }

    pub fn from_services(
        real: RealContractService,
        mock: MockContractService,
        fallback_on_rejection: bool,
    ) -> Self {
        Self {
            real,
            mock,
            use_real: false,
            fallback_on_rejection,
        }
    }

    /// Bind both services. If the real binding fails the mock still gets the
    /// provider and the real path stays disabled.
    pub fn set_provider(&mut self, provider: Arc<Provider>) -> ServiceMode {
        match self.real.set_provider(provider.clone()) {
            Ok(()) => {
                self.mock.set_provider(provider);
                self.use_real = true;
                info!("Real contract service initialized successfully");
            }
            Err(e) => {
                warn!("Failed to initialize real contract service, using mock: {}", e);
                self.mock.set_provider(provider);
                self.use_real = false;
            }
        }
        self.mode()
    }

    pub fn is_using_real_service(&self) -> bool {
        self.use_real
    }

    pub fn mode(&self) -> ServiceMode {
        if self.use_real {
            ServiceMode::Live
        } else if self.mock.has_provider() {
            ServiceMode::Demo
        } else {
            ServiceMode::Disconnected
        }
    }

    /// Run `real` if the real path is enabled, otherwise or on failure run `mock`.
    ///
    /// Both futures are inert until awaited, so an unused path costs nothing.
    async fn route<T, R, M>(&self, operation: Operation, real: R, mock: M) -> Result<Routed<T>, ContractError>
    where
        R: Future<Output = Result<T, ContractError>>,
        M: Future<Output = Result<T, ContractError>>,
    {
        if !self.use_real {
            return mock.await.map(|value| Routed::new(value, Route::Mock));
        }

        match real.await {
            Ok(value) => {
                let route = match RealContractService::support(operation) {
                    RealSupport::Live => Route::Real,
                    RealSupport::Stub => Route::RealStub,
                };
                Ok(Routed::new(value, route))
            }
            // The confirmed part must reach the caller
            Err(e @ ContractError::PartialTokenCreation { .. }) => {
                warn!("Real {} partially succeeded, not falling back: {}", operation, e);
                Err(e)
            }
            Err(e @ ContractError::ExternalRejection { .. }) if !self.fallback_on_rejection => {
                warn!("Real {} rejected, not falling back: {}", operation, e);
                Err(e)
            }
            Err(e) => {
                warn!("Real {} failed, using mock: {}", operation, e);
                let value = mock.await?;
                Ok(Routed::new(value, Route::Fallback { real_error: e }))
            }
        }
    }

    pub async fn create_token(&self, request: &TokenCreationRequest) -> Result<Routed<TokenCreationResult>, ContractError> {
        self.route(
            Operation::CreateToken,
            self.real.create_token(request),
            self.mock.create_token(request),
        )
        .await
    }

    pub async fn create_pool(&self, request: &PoolCreationRequest) -> Result<Routed<PoolCreationResult>, ContractError> {
        self.route(
            Operation::CreatePool,
            self.real.create_pool(request),
            self.mock.create_pool(request),
        )
        .await
    }

    pub async fn swap_tokens(&self, request: &SwapRequest) -> Result<Routed<SwapResult>, ContractError> {
        self.route(
            Operation::SwapTokens,
            self.real.swap_tokens(request),
            self.mock.swap_tokens(request),
        )
        .await
    }

    pub async fn is_whitelisted(&self, address: &str) -> Result<Routed<bool>, ContractError> {
        self.route(
            Operation::IsWhitelisted,
            self.real.is_whitelisted(address),
            self.mock.is_whitelisted(address),
        )
        .await
    }

    pub async fn initialize_whitelist(&self) -> Result<Routed<WhitelistInitResult>, ContractError> {
        self.route(
            Operation::InitializeWhitelist,
            self.real.initialize_whitelist(),
            self.mock.initialize_whitelist(),
        )
        .await
    }

    pub async fn add_to_whitelist(&self, address: &str) -> Result<Routed<String>, ContractError> {
        self.route(
            Operation::AddToWhitelist,
            self.real.add_to_whitelist(address),
            self.mock.add_to_whitelist(address),
        )
        .await
    }

    /// Always served by the mock; the real service has no balance lookup.
    pub fn token_balance(&self, token_address: &str, wallet_address: &str) -> Routed<f64> {
        Routed::new(self.mock.token_balance(token_address, wallet_address), Route::Mock)
    }

    /// Always served by the mock; the real service has no history lookup.
    pub async fn transaction_history(&self, wallet_address: &str) -> Routed<Vec<TransactionHistoryEntry>> {
        Routed::new(self.mock.transaction_history(wallet_address).await, Route::Mock)
    }

    pub fn program_info(&self) -> ProgramInfo {
        if self.use_real {
            self.real.program_info()
        } else {
            self.mock.program_info()
        }
    }
}
