use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::*;

// ACCOUNTS - Instruction account validation structs

/// Initialize - Create the ledger and bind owner and price feed
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(init, payer = owner, space = 8 + FundMeState::LEN, seeds = [FUND_ME_SEED], bump)]
    pub fund_me: Account<'info, FundMeState>,
    /// CHECK: Vault PDA - system-owned, holds contributed lamports
    #[account(seeds = [VAULT_SEED, fund_me.key().as_ref()], bump)]
    pub vault: AccountInfo<'info>,
    /// CHECK: Price feed - null key and data length validated in initialize()
    pub price_feed: AccountInfo<'info>,
    #[account(mut)]
    pub owner: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// Fund - Contribute lamports above the USD floor
#[derive(Accounts)]
pub struct Fund<'info> {
    #[account(mut, seeds = [FUND_ME_SEED], bump = fund_me.bump)]
    pub fund_me: Account<'info, FundMeState>,
    /// CHECK: Vault PDA - system-owned, receives the contribution
    #[account(mut, seeds = [VAULT_SEED, fund_me.key().as_ref()], bump = fund_me.vault_bump)]
    pub vault: AccountInfo<'info>,
    /// CHECK: Price feed - must be the configured price reference, decoded in fund()
    #[account(address = fund_me.price_feed @ ErrorCode::PriceFeedMismatch)]
    pub price_feed: AccountInfo<'info>,
    #[account(mut)]
    pub funder: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// Withdraw - Sweep the vault to the owner and reset the ledger
///
/// Ownership is checked in withdraw() before any transfer, so a non-owner
/// signer fails with NotOwner rather than a constraint error.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut, seeds = [FUND_ME_SEED], bump = fund_me.bump)]
    pub fund_me: Account<'info, FundMeState>,
    /// CHECK: Vault PDA - signs the outgoing transfer with its seeds
    #[account(mut, seeds = [VAULT_SEED, fund_me.key().as_ref()], bump = fund_me.vault_bump)]
    pub vault: AccountInfo<'info>,
    #[account(mut)]
    pub caller: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// ViewLedger - Read-only queries returned through return data
#[derive(Accounts)]
pub struct ViewLedger<'info> {
    #[account(seeds = [FUND_ME_SEED], bump = fund_me.bump)]
    pub fund_me: Account<'info, FundMeState>,
}
