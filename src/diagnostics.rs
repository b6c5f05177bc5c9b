//! Manual connectivity check for the deployed program.

use crate::chain::connection::ChainConnection;
use anyhow::{Context, Result};
use solana_sdk::pubkey::Pubkey;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{info, instrument, warn};

/// What the cluster reports about the program account.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentReport {
    pub program_id: Pubkey,
    pub found: bool,
    pub owner: Option<Pubkey>,
    pub executable: bool,
    pub data_len: usize,
}

/// Look up the program account and log what was found.
#[instrument(skip(connection), fields(endpoint = %connection.endpoint()))]
pub async fn check_program_deployment(
    connection: &dyn ChainConnection,
    program_id: &Pubkey,
) -> Result<DeploymentReport> {
    let retry_strategy = ExponentialBackoff::from_millis(200)
        .max_delay(Duration::from_secs(2))
        .take(3);

    let account = Retry::spawn(retry_strategy, || connection.account(program_id))
        .await
        .with_context(|| format!("Failed to fetch program account {}", program_id))?;

    let report = match account {
        Some(account) => {
            info!("Contract found on {}", connection.endpoint());
            info!("Program ID: {}", program_id);
            info!("Owner: {}", account.owner);
            info!("Executable: {}", account.executable);
            info!("Data length: {}", account.data.len());
            DeploymentReport {
                program_id: *program_id,
                found: true,
                owner: Some(account.owner),
                executable: account.executable,
                data_len: account.data.len(),
            }
        }
        None => {
            warn!("Contract {} not found on {}", program_id, connection.endpoint());
            DeploymentReport {
                program_id: *program_id,
                found: false,
                owner: None,
                executable: false,
                data_len: 0,
            }
        }
    };

    Ok(report)
}
