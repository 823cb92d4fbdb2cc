use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::{invoke, invoke_signed};
use anchor_lang::solana_program::system_instruction;
use crate::errors::ErrorCode;

/// The vault holds no data, so it only needs the zero-byte rent minimum.
/// Fails when a deposit would leave it non-zero but below that minimum.
pub fn check_vault_rent(vault_balance: u64, amount: u64, rent_minimum: u64) -> Result<()> {
    let after = vault_balance
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    require!(after == 0 || after >= rent_minimum, ErrorCode::VaultBelowRentExempt);
    Ok(())
}

/// Move lamports from a signing funder into the vault
#[inline(never)]
pub fn transfer_to_vault<'info>(
    funder: &AccountInfo<'info>,
    vault: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    invoke(
        &system_instruction::transfer(funder.key, vault.key, amount),
        &[
            funder.to_account_info(),
            vault.to_account_info(),
            system_program.to_account_info(),
        ],
    )?;
    Ok(())
}

/// Move lamports out of the vault PDA, signing with its seeds.
/// Any rejection surfaces as TransferFailed.
#[inline(never)]
pub fn transfer_from_vault<'info>(
    vault: &AccountInfo<'info>,
    recipient: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
    seeds: &[&[u8]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    invoke_signed(
        &system_instruction::transfer(vault.key, recipient.key, amount),
        &[
            vault.to_account_info(),
            recipient.to_account_info(),
            system_program.to_account_info(),
        ],
        &[seeds],
    )
    .map_err(|e| {
        msg!("Vault transfer rejected: {:?}", e);
        error!(ErrorCode::TransferFailed)
    })
}
