//! Error taxonomy for contract service operations.

use solana_client::client_error::ClientError;
use solana_sdk::program_error::ProgramError;
use solana_sdk::signer::SignerError;
use thiserror::Error;

/// Errors surfaced by the contract services.
///
/// Messages are rendered verbatim to users, so variants carry plain text
/// rather than the underlying client error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    /// Mock path called before a wallet was attached.
    #[error("Provider not set. Please connect wallet first.")]
    NotReady,

    /// Real path called before a provider and program handle were bound.
    #[error("Provider or program not initialized")]
    NotInitialized,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid address `{0}`")]
    InvalidAddress(String),

    /// The program interface document could not be used for binding.
    #[error("program interface error: {0}")]
    Interface(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("rpc error: {0}")]
    Rpc(String),

    /// The network or program rejected a submitted operation.
    #[error("Failed to {operation}: {message}")]
    ExternalRejection {
        operation: &'static str,
        message: String,
    },

    /// The mint confirmed on-chain but the chained whitelist setup failed.
    /// The mint is not rolled back.
    #[error("Token {mint_address} created ({transaction_signature}) but whitelist setup failed: {whitelist_error}")]
    PartialTokenCreation {
        mint_address: String,
        transaction_signature: String,
        whitelist_error: Box<ContractError>,
    },
}

impl ContractError {
    /// Attribute a network or signing failure to a high-level operation.
    ///
    /// Precondition and request errors pass through untouched.
    pub fn during(self, operation: &'static str) -> Self {
        match self {
            ContractError::Rpc(message) | ContractError::Signing(message) => {
                ContractError::ExternalRejection { operation, message }
            }
            other => other,
        }
    }

    /// Whether the error came from the external collaborator rather than this client.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            ContractError::ExternalRejection { .. } | ContractError::Rpc(_)
        )
    }

    /// Whether part of the operation already took effect on-chain.
    pub fn is_partial(&self) -> bool {
        matches!(self, ContractError::PartialTokenCreation { .. })
    }
}

impl From<ClientError> for ContractError {
    fn from(err: ClientError) -> Self {
        ContractError::Rpc(err.to_string())
    }
}

impl From<SignerError> for ContractError {
    fn from(err: SignerError) -> Self {
        ContractError::Signing(err.to_string())
    }
}

impl From<ProgramError> for ContractError {
    fn from(err: ProgramError) -> Self {
        ContractError::InvalidRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_during_wraps_network_errors() {
        let err = ContractError::Rpc("insufficient funds for rent".to_string()).during("create token");
        assert_eq!(
            err,
            ContractError::ExternalRejection {
                operation: "create token",
                message: "insufficient funds for rent".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Failed to create token: insufficient funds for rent");
        assert!(err.is_external());
    }

    #[test]
    fn test_during_keeps_preconditions() {
        assert_eq!(
            ContractError::NotInitialized.during("create token"),
            ContractError::NotInitialized
        );
        assert_eq!(
            ContractError::NotReady.to_string(),
            "Provider not set. Please connect wallet first."
        );
    }

    #[test]
    fn test_partial_creation_keeps_mint() {
        let err = ContractError::PartialTokenCreation {
            mint_address: "Mint111".to_string(),
            transaction_signature: "sig111".to_string(),
            whitelist_error: Box::new(ContractError::Rpc("account already in use".to_string()).during("initialize whitelist")),
        };

        assert!(err.is_partial());
        assert!(!err.is_external());
        assert_eq!(err.clone().during("create token"), err);
        assert_eq!(
            err.to_string(),
            "Token Mint111 created (sig111) but whitelist setup failed: Failed to initialize whitelist: account already in use"
        );
    }
}
