//! Core request/result records exchanged with the contract services.

use crate::error::ContractError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base58 account address or placeholder identifier as shown to users.
///
/// Kept as a string because simulated results and demo token identifiers
/// (e.g. "COMP123abc") are not valid public keys.
pub type Address = String;

/// Maximum token symbol length accepted by the creation workflow.
pub const MAX_SYMBOL_LEN: usize = 10;

/// Maximum decimal precision for a mint.
pub const MAX_DECIMALS: u8 = 18;

/// Parameters for creating a Token-2022 mint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCreationRequest {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Whole-token supply; scaled by `10^decimals` when minted.
    pub supply: u64,
    pub enable_transfer_hook: bool,
    pub enable_whitelist: bool,
}

impl TokenCreationRequest {
    /// Check the same constraints the token creation form enforces.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.name.trim().is_empty() {
            return Err(ContractError::InvalidRequest("token name is required".to_string()));
        }
        let symbol_len = self.symbol.chars().count();
        if symbol_len == 0 || symbol_len > MAX_SYMBOL_LEN {
            return Err(ContractError::InvalidRequest(format!(
                "symbol must be 1-{} characters, got {}",
                MAX_SYMBOL_LEN, symbol_len
            )));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(ContractError::InvalidRequest(format!(
                "decimals must be at most {}, got {}",
                MAX_DECIMALS, self.decimals
            )));
        }
        if self.supply == 0 {
            return Err(ContractError::InvalidRequest("supply must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Outcome of a token creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCreationResult {
    pub mint_address: Address,
    pub transaction_signature: String,
}

/// AMM venues a pool can be created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmmPlatform {
    /// Dominant Solana AMM with highest liquidity
    Raydium,
    /// Concentrated liquidity AMM
    Orca,
    /// Dynamic liquidity (DLMM) pools
    Meteora,
}

impl AmmPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmmPlatform::Raydium => "raydium",
            AmmPlatform::Orca => "orca",
            AmmPlatform::Meteora => "meteora",
        }
    }
}

impl fmt::Display for AmmPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pool curve model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolType {
    /// Constant product (x*y=k)
    Cpmm,
    /// Concentrated liquidity with price ranges
    Clmm,
}

impl PoolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolType::Cpmm => "cpmm",
            PoolType::Clmm => "clmm",
        }
    }
}

/// Parameters for seeding a SOL/token liquidity pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCreationRequest {
    pub token_address: Address,
    pub sol_amount: f64,
    pub token_amount: f64,
    pub amm_platform: AmmPlatform,
    pub pool_type: PoolType,
    /// Fee rate in percent (0.25 = 0.25%)
    pub fee_rate: f64,
}

impl PoolCreationRequest {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.token_address.trim().is_empty() {
            return Err(ContractError::InvalidRequest("token address is required".to_string()));
        }
        if !(self.sol_amount > 0.0) || !(self.token_amount > 0.0) {
            return Err(ContractError::InvalidRequest(
                "pool amounts must be greater than zero".to_string(),
            ));
        }
        if !(self.fee_rate >= 0.0) {
            return Err(ContractError::InvalidRequest("fee rate cannot be negative".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCreationResult {
    pub pool_address: Address,
    pub transaction_signature: String,
}

/// Parameters for a token swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub from_token_address: Address,
    pub to_token_address: Address,
    pub from_amount: f64,
    /// Slippage tolerance in percent
    pub slippage: f64,
    /// Venues the order is routed through, in order
    pub route: Vec<String>,
}

impl SwapRequest {
    pub fn validate(&self) -> Result<(), ContractError> {
        if !(self.from_amount > 0.0) {
            return Err(ContractError::InvalidRequest(
                "swap amount must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.slippage) {
            return Err(ContractError::InvalidRequest(format!(
                "slippage must be between 0 and 100, got {}",
                self.slippage
            )));
        }
        if self.from_token_address == self.to_token_address {
            return Err(ContractError::InvalidRequest(
                "cannot swap a token for itself".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResult {
    pub transaction_signature: String,
    pub output_amount: f64,
}

/// Outcome of initializing a whitelist.
///
/// Only the real path knows the derived whitelist account; the mock path
/// leaves `whitelist_address` empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistInitResult {
    pub whitelist_address: Option<Address>,
    pub transaction_signature: String,
}

/// A past transaction for a wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistoryEntry {
    pub signature: String,
    pub description: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Static description of the deployed program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramInfo {
    pub program_id: String,
    pub network: String,
    pub status: String,
    pub version: String,
}
