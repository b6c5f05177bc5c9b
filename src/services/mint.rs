//! Building blocks for the Token-2022 creation transaction.

use crate::error::ContractError;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use solana_system_interface::instruction as system_instruction;
use spl_associated_token_account::{
    get_associated_token_address_with_program_id,
    instruction::create_associated_token_account,
};
use spl_token_2022::{extension::ExtensionType, state::Mint};

/// Size in bytes of a mint account, including the transfer hook extension
/// when requested.
pub fn mint_account_len(enable_transfer_hook: bool) -> Result<usize, ContractError> {
    let extensions: &[ExtensionType] = if enable_transfer_hook {
        &[ExtensionType::TransferHook]
    } else {
        &[]
    };
    Ok(ExtensionType::try_calculate_account_len::<Mint>(extensions)?)
}

/// `supply * 10^decimals` as exact base units.
pub fn base_units(supply: u64, decimals: u8) -> Result<u128, ContractError> {
    10u128
        .checked_pow(u32::from(decimals))
        .and_then(|scale| u128::from(supply).checked_mul(scale))
        .ok_or_else(|| {
            ContractError::InvalidRequest(format!(
                "supply {} with {} decimals overflows",
                supply, decimals
            ))
        })
}

/// Base units as the on-chain `u64` amount.
pub fn mint_amount(supply: u64, decimals: u8) -> Result<u64, ContractError> {
    let units = base_units(supply, decimals)?;
    u64::try_from(units).map_err(|_| {
        ContractError::InvalidRequest(format!(
            "supply {} with {} decimals is {} base units, above the on-chain maximum of {}",
            supply,
            decimals,
            units,
            u64::MAX
        ))
    })
}

/// Accounts and sizing for a new mint.
#[derive(Debug, Clone)]
pub struct MintPlan {
    pub authority: Pubkey,
    pub mint: Pubkey,
    pub decimals: u8,
    pub amount: u64,
    pub space: usize,
    pub rent_lamports: u64,
}

impl MintPlan {
    /// Authority's associated holding account for the new mint.
    pub fn holding_account(&self) -> Pubkey {
        get_associated_token_address_with_program_id(
            &self.authority,
            &self.mint,
            &spl_token_2022::id(),
        )
    }

    /// The four instructions that must land atomically, in order:
    /// create the mint account, initialize it, create the holding account,
    /// mint the supply into it.
    pub fn instructions(&self) -> Result<Vec<Instruction>, ContractError> {
        let token_program = spl_token_2022::id();
        let holding_account = self.holding_account();

        let create_mint_account = system_instruction::create_account(
            &self.authority,
            &self.mint,
            self.rent_lamports,
            self.space as u64,
            &token_program,
        );

        let initialize_mint = spl_token_2022::instruction::initialize_mint(
            &token_program,
            &self.mint,
            &self.authority,
            None,
            self.decimals,
        )?;

        let create_holding_account = create_associated_token_account(
            &self.authority,
            &self.authority,
            &self.mint,
            &token_program,
        );

        let mint_supply = spl_token_2022::instruction::mint_to(
            &token_program,
            &self.mint,
            &holding_account,
            &self.authority,
            &[],
            self.amount,
        )?;

        Ok(vec![
            create_mint_account,
            initialize_mint,
            create_holding_account,
            mint_supply,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::program_pack::Pack;
    use spl_token_2022::instruction::TokenInstruction;

    #[test]
    fn test_mint_len_grows_with_transfer_hook() {
        let plain = mint_account_len(false).unwrap();
        let hooked = mint_account_len(true).unwrap();

        assert_eq!(plain, Mint::LEN);
        assert!(hooked > plain);
    }

    #[test]
    fn test_base_units_exact_for_all_decimals() {
        for decimals in 0..=18u8 {
            for supply in [1u64, 7, 1_000_000, 123_456_789] {
                let expected = u128::from(supply) * 10u128.pow(u32::from(decimals));
                assert_eq!(base_units(supply, decimals).unwrap(), expected);
            }
        }

        assert_eq!(
            base_units(1_000_000, 18).unwrap(),
            1_000_000_000_000_000_000_000_000u128
        );
    }

    #[test]
    fn test_mint_amount_has_no_float_rounding() {
        // 2^53 + 1 is not representable as an f64
        let supply = 9_007_199_254_740_993u64;
        assert_eq!(mint_amount(supply, 0).unwrap(), supply);
        assert_eq!((supply as f64) as u64, supply - 1);

        assert_eq!(mint_amount(1_000_000_000, 9).unwrap(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn test_mint_amount_rejects_u64_overflow() {
        assert!(matches!(
            mint_amount(1_000_000, 18),
            Err(ContractError::InvalidRequest(_))
        ));
        assert!(mint_amount(u64::MAX, 0).is_ok());
        assert!(mint_amount(u64::MAX, 1).is_err());
    }

    #[test]
    fn test_plan_instruction_order() {
        let plan = MintPlan {
            authority: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            decimals: 6,
            amount: 1_000_000_000_000,
            space: mint_account_len(true).unwrap(),
            rent_lamports: 2_500_000,
        };

        let instructions = plan.instructions().unwrap();
        assert_eq!(instructions.len(), 4);
        assert_eq!(instructions[0].program_id, solana_system_interface::program::id());
        assert_eq!(instructions[1].program_id, spl_token_2022::id());
        assert_eq!(instructions[2].program_id, spl_associated_token_account::id());
        assert_eq!(instructions[3].program_id, spl_token_2022::id());

        match TokenInstruction::unpack(&instructions[3].data).unwrap() {
            TokenInstruction::MintTo { amount } => assert_eq!(amount, 1_000_000_000_000),
            other => panic!("expected MintTo, got {:?}", other),
        }
        assert_eq!(instructions[3].accounts[1].pubkey, plan.holding_account());
    }
}
