//! Solana Explorer link construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const EXPLORER_BASE_URL: &str = "https://explorer.solana.com";

/// Network cluster an address or signature lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
}

impl Cluster {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::MainnetBeta => "mainnet-beta",
        }
    }

    /// Public RPC endpoint for the cluster.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "mainnet-beta" | "mainnet" => Ok(Cluster::MainnetBeta),
            other => Err(format!("unknown cluster `{}`", other)),
        }
    }
}

/// What an explorer link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplorerKind {
    #[default]
    Address,
    Tx,
}

impl ExplorerKind {
    fn path(&self) -> &'static str {
        match self {
            ExplorerKind::Address => "address",
            ExplorerKind::Tx => "tx",
        }
    }
}

/// Build an explorer URL. Mainnet links carry no cluster parameter.
pub fn explorer_url(target: &str, kind: ExplorerKind, cluster: Cluster) -> String {
    let cluster_param = match cluster {
        Cluster::MainnetBeta => String::new(),
        other => format!("?cluster={}", other),
    };
    format!("{}/{}/{}{}", EXPLORER_BASE_URL, kind.path(), target, cluster_param)
}

pub fn token_explorer_url(mint_address: &str, cluster: Cluster) -> String {
    explorer_url(mint_address, ExplorerKind::Address, cluster)
}

pub fn transaction_explorer_url(signature: &str, cluster: Cluster) -> String {
    explorer_url(signature, ExplorerKind::Tx, cluster)
}
