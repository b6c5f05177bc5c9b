//! token2022-launchpad - client services for a Token-2022 launch and trading platform
//!
//! This crate provides the contract-service layer behind the token creation,
//! pool creation and trading workflows: a simulated service, a service backed
//! by the deployed whitelist program, and a hybrid that falls back from the
//! former to the latter per call.

pub mod app;
pub mod chain;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod explorer;
pub mod quote;
pub mod services;
pub mod types;

// Re-export main types for convenience
pub use app::AppContext;
pub use config::{ServiceConfig, ServiceConfigBuilder, SimulatedLatency};
pub use error::ContractError;
pub use explorer::{Cluster, ExplorerKind};
pub use services::{HybridContractService, Route, Routed, ServiceMode};
pub use types::{PoolCreationRequest, SwapRequest, TokenCreationRequest};
