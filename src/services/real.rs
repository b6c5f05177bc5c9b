//! Contract service backed by the deployed program.
//!
//! Token creation and whitelist management submit real transactions. Pool
//! creation, swaps and whitelist queries are placeholders that fabricate
//! results; [`RealContractService::support`] reports which is which.

use crate::chain::connection::ChainConnection;
use crate::chain::idl::ProgramIdl;
use crate::chain::program::Program;
use crate::chain::provider::Provider;
use crate::config::{ServiceConfig, SimulatedLatency};
use crate::error::ContractError;
use crate::services::latency::Delay;
use crate::services::mint::{self, MintPlan};
use crate::services::mock::{placeholder_address, placeholder_signature, program_info};
use crate::services::routing::{Operation, RealSupport};
use crate::types::{
    PoolCreationRequest, PoolCreationResult, ProgramInfo, SwapRequest, SwapResult,
    TokenCreationRequest, TokenCreationResult, WhitelistInitResult,
};
use solana_sdk::{
    instruction::AccountMeta,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use solana_system_interface::program as system_program;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Seed tag for the per-authority whitelist account.
pub const WHITELIST_SEED: &[u8] = b"whitelist";

/// Output fraction reported by the swap placeholder.
const STUB_SWAP_OUTPUT_RATE: f64 = 0.99;

/// Whitelist account owned by `program_id` for `authority`.
///
/// Deterministic: the same authority always maps to the same address.
pub fn derive_whitelist_address(authority: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[WHITELIST_SEED, authority.as_ref()], program_id)
}

pub struct RealContractService {
    connection: Arc<dyn ChainConnection>,
    program_id: Pubkey,
    idl: ProgramIdl,
    provider: Option<Arc<Provider>>,
    program: Option<Program>,
    program_info: ProgramInfo,
    latency: SimulatedLatency,
    delay: Arc<dyn Delay>,
}

impl RealContractService {
    /// Service using the bundled program interface document.
    pub fn new(
        connection: Arc<dyn ChainConnection>,
        config: &ServiceConfig,
        delay: Arc<dyn Delay>,
    ) -> Result<Self, ContractError> {
        Self::with_idl(connection, config, ProgramIdl::bundled()?, delay)
    }

    pub fn with_idl(
        connection: Arc<dyn ChainConnection>,
        config: &ServiceConfig,
        idl: ProgramIdl,
        delay: Arc<dyn Delay>,
    ) -> Result<Self, ContractError> {
        Ok(Self {
            connection,
            program_id: config.program_pubkey()?,
            idl,
            provider: None,
            program: None,
            program_info: program_info(config),
            latency: config.latency.clone(),
            delay,
        })
    }

    /// How this service implements `operation`.
    pub fn support(operation: Operation) -> RealSupport {
        match operation {
            Operation::CreateToken | Operation::InitializeWhitelist | Operation::AddToWhitelist => {
                RealSupport::Live
            }
            Operation::CreatePool | Operation::SwapTokens | Operation::IsWhitelisted => {
                RealSupport::Stub
            }
        }
    }

    /// Bind a signing session and construct the program handle.
    ///
    /// On failure the service is left without a provider.
    pub fn set_provider(&mut self, provider: Arc<Provider>) -> Result<(), ContractError> {
        let program = Program::new(self.program_id, self.idl.clone(), provider.clone())?;
        info!("Real contract service bound to {} for program {}", provider.pubkey(), self.program_id);
        self.provider = Some(provider);
        self.program = Some(program);
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.provider.is_some() && self.program.is_some()
    }

    fn bound(&self) -> Result<(&Arc<Provider>, &Program), ContractError> {
        match (&self.provider, &self.program) {
            (Some(provider), Some(program)) => Ok((provider, program)),
            _ => Err(ContractError::NotInitialized),
        }
    }

    /// Whitelist address for the bound authority.
    pub fn whitelist_address(&self) -> Result<Pubkey, ContractError> {
        let (provider, program) = self.bound()?;
        Ok(derive_whitelist_address(&provider.pubkey(), &program.id()).0)
    }

    #[instrument(skip(self))]
    pub async fn initialize_whitelist(&self) -> Result<WhitelistInitResult, ContractError> {
        let (provider, program) = self.bound()?;
        let authority = provider.pubkey();
        let (whitelist, _bump) = derive_whitelist_address(&authority, &program.id());

        let instruction = program.instruction(
            "initialize_whitelist",
            vec![
                AccountMeta::new(whitelist, false),
                AccountMeta::new(authority, true),
                AccountMeta::new_readonly(system_program::id(), false),
            ],
            &[],
        )?;
        let signature = program
            .rpc(instruction)
            .await
            .map_err(|e| e.during(Operation::InitializeWhitelist.as_str()))?;

        info!("Initialized whitelist {} ({})", whitelist, signature);
        Ok(WhitelistInitResult {
            whitelist_address: Some(whitelist.to_string()),
            transaction_signature: signature.to_string(),
        })
    }

    /// Existence of the whitelist account is left to the program to check.
    #[instrument(skip(self))]
    pub async fn add_to_whitelist(&self, address: &str) -> Result<String, ContractError> {
        let (provider, program) = self.bound()?;
        let member = Pubkey::from_str(address)
            .map_err(|_| ContractError::InvalidAddress(address.to_string()))?;
        let authority = provider.pubkey();
        let (whitelist, _bump) = derive_whitelist_address(&authority, &program.id());

        let instruction = program.instruction(
            "add_to_whitelist",
            vec![
                AccountMeta::new(whitelist, false),
                AccountMeta::new_readonly(authority, true),
            ],
            member.as_ref(),
        )?;
        let signature = program
            .rpc(instruction)
            .await
            .map_err(|e| e.during(Operation::AddToWhitelist.as_str()))?;

        debug!("Added {} to whitelist {}", member, whitelist);
        Ok(signature.to_string())
    }

    /// Create a Token-2022 mint and mint the full supply to the authority.
    ///
    /// When a whitelist is requested it is initialized afterwards in a
    /// separate transaction. If that fails the confirmed mint stays and is
    /// reported through [`ContractError::PartialTokenCreation`].
    #[instrument(skip(self, request), fields(symbol = %request.symbol, decimals = request.decimals))]
    pub async fn create_token(&self, request: &TokenCreationRequest) -> Result<TokenCreationResult, ContractError> {
        let (provider, _program) = self.bound()?;
        request.validate()?;
        let amount = mint::mint_amount(request.supply, request.decimals)?;

        let authority = provider.pubkey();
        let mint_keypair = Keypair::new();
        let space = mint::mint_account_len(request.enable_transfer_hook)?;

        let operation = Operation::CreateToken.as_str();
        let rent_lamports = self
            .connection
            .minimum_balance_for_rent_exemption(space)
            .await
            .map_err(|e| e.during(operation))?;

        let plan = MintPlan {
            authority,
            mint: mint_keypair.pubkey(),
            decimals: request.decimals,
            amount,
            space,
            rent_lamports,
        };
        let transaction = Transaction::new_with_payer(&plan.instructions()?, Some(&authority));

        // The new mint account must co-sign its own creation
        let signature = provider
            .send_and_confirm(transaction, &[&mint_keypair])
            .await
            .map_err(|e| e.during(operation))?;
        info!("Created mint {} ({})", plan.mint, signature);

        let created = TokenCreationResult {
            mint_address: plan.mint.to_string(),
            transaction_signature: signature.to_string(),
        };

        if request.enable_whitelist {
            if let Err(e) = self.initialize_whitelist().await {
                warn!("Mint {} created but whitelist initialization failed: {}", plan.mint, e);
                return Err(ContractError::PartialTokenCreation {
                    mint_address: created.mint_address,
                    transaction_signature: created.transaction_signature,
                    whitelist_error: Box::new(e),
                });
            }
        }

        Ok(created)
    }

    /// Placeholder: no AMM integration yet.
    #[instrument(skip(self, request), fields(platform = %request.amm_platform))]
    pub async fn create_pool(&self, request: &PoolCreationRequest) -> Result<PoolCreationResult, ContractError> {
        self.delay
            .sleep(Duration::from_millis(self.latency.real_create_pool_ms))
            .await;

        Ok(PoolCreationResult {
            pool_address: placeholder_address(),
            transaction_signature: placeholder_signature("pool_creation_"),
        })
    }

    /// Placeholder: no swap routing yet.
    #[instrument(skip(self, request), fields(amount = request.from_amount))]
    pub async fn swap_tokens(&self, request: &SwapRequest) -> Result<SwapResult, ContractError> {
        self.delay
            .sleep(Duration::from_millis(self.latency.real_swap_ms))
            .await;

        Ok(SwapResult {
            transaction_signature: placeholder_signature("swap_"),
            output_amount: request.from_amount * STUB_SWAP_OUTPUT_RATE,
        })
    }

    /// Placeholder: reports every address as whitelisted once a program is bound.
    pub async fn is_whitelisted(&self, address: &str) -> Result<bool, ContractError> {
        if !self.is_bound() {
            return Ok(false);
        }
        debug!("Checking whitelist status for {}", address);
        Ok(true)
    }

    pub fn program_info(&self) -> ProgramInfo {
        self.program_info.clone()
    }
}
