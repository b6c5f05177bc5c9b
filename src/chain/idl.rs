//! Program interface-description document.
//!
//! Only the parts needed to build instructions are modelled: the program
//! address, instruction names, discriminators and account lists.

use crate::error::ContractError;
use serde::Deserialize;
use solana_sdk::hash::hashv;

const BUNDLED_IDL: &str = include_str!("../../idl/token2022_amm.json");

#[derive(Debug, Clone, Deserialize)]
pub struct IdlMetadata {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlAccount {
    pub name: String,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub signer: bool,
    /// Fixed address, for well-known programs
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlArg {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    /// Older documents omit it; it is then derived from the name.
    #[serde(default)]
    pub discriminator: Option<Vec<u8>>,
    #[serde(default)]
    pub accounts: Vec<IdlAccount>,
    #[serde(default)]
    pub args: Vec<IdlArg>,
}

impl IdlInstruction {
    /// 8-byte instruction selector.
    pub fn discriminator(&self) -> Result<[u8; 8], ContractError> {
        match &self.discriminator {
            Some(bytes) => bytes.as_slice().try_into().map_err(|_| {
                ContractError::Interface(format!(
                    "instruction `{}` has a {}-byte discriminator",
                    self.name,
                    bytes.len()
                ))
            }),
            None => Ok(sighash(&self.name)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramIdl {
    pub address: String,
    pub metadata: IdlMetadata,
    pub instructions: Vec<IdlInstruction>,
}

impl ProgramIdl {
    pub fn from_json(json: &str) -> Result<Self, ContractError> {
        serde_json::from_str(json)
            .map_err(|e| ContractError::Interface(format!("malformed interface document: {}", e)))
    }

    /// Document for the deployed whitelist program, shipped with the crate.
    pub fn bundled() -> Result<Self, ContractError> {
        Self::from_json(BUNDLED_IDL)
    }

    pub fn instruction(&self, name: &str) -> Result<&IdlInstruction, ContractError> {
        self.instructions
            .iter()
            .find(|ix| ix.name == name)
            .ok_or_else(|| {
                ContractError::Interface(format!(
                    "instruction `{}` not found in {}",
                    name, self.metadata.name
                ))
            })
    }
}

/// Anchor's global instruction selector: first 8 bytes of sha256("global:<name>").
pub fn sighash(name: &str) -> [u8; 8] {
    let hash = hashv(&[b"global:", name.as_bytes()]);
    let mut selector = [0u8; 8];
    selector.copy_from_slice(&hash.to_bytes()[..8]);
    selector
}
