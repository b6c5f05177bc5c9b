//! Handle to the deployed program.

use crate::chain::idl::ProgramIdl;
use crate::chain::provider::Provider;
use crate::error::ContractError;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use std::str::FromStr;
use std::sync::Arc;

/// Instructions the client needs from the program.
const REQUIRED_INSTRUCTIONS: [&str; 2] = ["initialize_whitelist", "add_to_whitelist"];

/// A program bound to a signing session.
pub struct Program {
    id: Pubkey,
    idl: ProgramIdl,
    provider: Arc<Provider>,
}

impl Program {
    /// Bind `idl` to `provider`.
    ///
    /// Fails if the document describes a different program than `program_id`
    /// or lacks an instruction this client calls.
    pub fn new(program_id: Pubkey, idl: ProgramIdl, provider: Arc<Provider>) -> Result<Self, ContractError> {
        let declared = Pubkey::from_str(&idl.address)
            .map_err(|_| ContractError::Interface(format!("invalid program address `{}`", idl.address)))?;
        if declared != program_id {
            return Err(ContractError::Interface(format!(
                "interface document describes {}, expected {}",
                declared, program_id
            )));
        }
        for name in REQUIRED_INSTRUCTIONS {
            idl.instruction(name)?;
        }

        Ok(Self {
            id: program_id,
            idl,
            provider,
        })
    }

    pub fn id(&self) -> Pubkey {
        self.id
    }

    /// Build an instruction: discriminator followed by borsh-encoded `args`.
    ///
    /// `accounts` must be given in the order the document lists them.
    pub fn instruction(
        &self,
        name: &str,
        accounts: Vec<AccountMeta>,
        args: &[u8],
    ) -> Result<Instruction, ContractError> {
        let described = self.idl.instruction(name)?;
        if described.accounts.len() != accounts.len() {
            return Err(ContractError::Interface(format!(
                "`{}` takes {} accounts, {} given",
                name,
                described.accounts.len(),
                accounts.len()
            )));
        }

        let mut data = Vec::with_capacity(8 + args.len());
        data.extend_from_slice(&described.discriminator()?);
        data.extend_from_slice(args);

        Ok(Instruction {
            program_id: self.id,
            accounts,
            data,
        })
    }

    /// Submit a single instruction signed by the provider's wallet.
    pub async fn rpc(&self, instruction: Instruction) -> Result<Signature, ContractError> {
        let payer = self.provider.pubkey();
        let transaction = Transaction::new_with_payer(&[instruction], Some(&payer));
        self.provider.send_and_confirm(transaction, &[]).await
    }
}
