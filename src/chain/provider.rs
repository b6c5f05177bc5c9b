//! Signing sessions.

use crate::chain::connection::ChainConnection;
use crate::error::ContractError;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::sync::Arc;
use tracing::debug;

/// A connected wallet: an identity that can sign transactions.
pub trait WalletSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Add this wallet's signature, keeping signatures already present.
    fn sign_transaction(&self, transaction: &mut Transaction) -> Result<(), ContractError>;

    fn sign_all_transactions(&self, transactions: &mut [Transaction]) -> Result<(), ContractError> {
        for transaction in transactions.iter_mut() {
            self.sign_transaction(transaction)?;
        }
        Ok(())
    }
}

/// Wallet backed by a local keypair.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

impl WalletSigner for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn sign_transaction(&self, transaction: &mut Transaction) -> Result<(), ContractError> {
        let blockhash = transaction.message.recent_blockhash;
        transaction.try_partial_sign(&[&self.keypair], blockhash)?;
        Ok(())
    }
}

/// A bound signing session: wallet plus the connection it submits through.
pub struct Provider {
    connection: Arc<dyn ChainConnection>,
    wallet: Arc<dyn WalletSigner>,
}

impl Provider {
    pub fn new(connection: Arc<dyn ChainConnection>, wallet: Arc<dyn WalletSigner>) -> Self {
        Self { connection, wallet }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    pub fn connection(&self) -> &Arc<dyn ChainConnection> {
        &self.connection
    }

    /// Attach a fresh blockhash, co-sign with `signers`, sign with the wallet
    /// and submit.
    ///
    /// `signers` are accounts that must authorize the transaction besides the
    /// wallet, e.g. a new account being created.
    pub async fn send_and_confirm(
        &self,
        mut transaction: Transaction,
        signers: &[&Keypair],
    ) -> Result<Signature, ContractError> {
        let blockhash = self.connection.latest_blockhash().await?;

        if signers.is_empty() {
            transaction.message.recent_blockhash = blockhash;
        } else {
            transaction.try_partial_sign(signers, blockhash)?;
        }
        self.wallet.sign_transaction(&mut transaction)?;

        debug!(
            "Submitting transaction with {} instructions as {}",
            transaction.message.instructions.len(),
            self.pubkey()
        );
        self.connection.send_and_confirm_transaction(&transaction).await
    }
}
