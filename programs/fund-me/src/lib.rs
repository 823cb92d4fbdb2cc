use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod state;

mod formal_verification;

pub use constants::*;
pub use contexts::*;
pub use errors::ErrorCode;
pub use events::*;
pub use state::*;

use helpers::cpi::{check_vault_rent, transfer_from_vault, transfer_to_vault};
use helpers::math::format_native;
use helpers::oracle::{read_validated_price, PriceFeedAccount};

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Log the floor in lamports for the price just read
#[cfg(feature = "verbose")]
#[inline(never)]
fn log_minimum(minimum_usd: u64, price: &helpers::oracle::PriceReading) {
    match helpers::math::required_native_amount(minimum_usd, price.answer, price.decimals, NATIVE_DECIMALS) {
        Ok(required) => msg!(
            "Minimum contribution at price {} ({} decimals): {} lamports",
            price.answer, price.decimals, required
        ),
        Err(_) => msg!("Minimum contribution at price {} ({} decimals) exceeds u64", price.answer, price.decimals),
    }
}

/// Plain-transfer receive path (extracted from the fallback handler).
///
/// Account order: [funder (signer), fund_me (writable), vault, price_feed].
/// Credits lamports already sitting in the vault above `total_funded`, so
/// a transaction of {system transfer to vault, any unrecognised instruction}
/// is accounted exactly like `fund`.
#[inline(never)]
fn receive_funds<'info>(
    program_id: &Pubkey,
    accounts: &'info [AccountInfo<'info>],
) -> Result<()> {
    let [funder, fund_me_info, vault, price_feed, ..] = accounts else {
        return err!(ErrorCode::MissingAccounts);
    };
    require!(funder.is_signer, ErrorCode::MissingSignature);

    let (expected_state, _) = Pubkey::find_program_address(&[FUND_ME_SEED], program_id);
    require_keys_eq!(fund_me_info.key(), expected_state, ErrorCode::InvalidLedgerAccount);
    require!(fund_me_info.is_writable, ErrorCode::InvalidLedgerAccount);

    let mut fund_me: Account<'info, FundMeState> = Account::try_from(fund_me_info)?;

    let expected_vault = Pubkey::create_program_address(
        &[VAULT_SEED, fund_me_info.key.as_ref(), &[fund_me.vault_bump]],
        program_id,
    )
    .map_err(|_| ErrorCode::InvalidVault)?;
    require_keys_eq!(vault.key(), expected_vault, ErrorCode::InvalidVault);
    require_keys_eq!(price_feed.key(), fund_me.price_feed, ErrorCode::PriceFeedMismatch);

    let clock = Clock::get()?;
    let price = read_validated_price(&PriceFeedAccount::new(price_feed), clock.unix_timestamp)?;
    #[cfg(feature = "verbose")]
    log_minimum(fund_me.minimum_usd, &price);

    let receipt = fund_me.record_unattributed_deposit(
        funder.key(),
        vault.lamports(),
        &price,
        NATIVE_DECIMALS,
    )?;
    fund_me.exit(program_id)?;

    let (whole, frac) = format_native(receipt.amount, NATIVE_DECIMALS);
    msg!("Received {}.{:09} SOL from {} via fallback", whole, frac, funder.key());

    emit!(Funded {
        funder: funder.key(),
        amount: receipt.amount,
        usd_value: receipt.usd_value.min(u64::MAX as u128) as u64,
        total_funded_by: receipt.total_funded_by,
        funders_count: receipt.funders_count,
        via_fallback: true,
        timestamp: clock.unix_timestamp,
    });
    Ok(())
}

#[program]
pub mod fund_me {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        let clock = Clock::get()?;
        let price_feed = &ctx.accounts.price_feed;

        FundMeState::validate_price_feed(price_feed.key, price_feed.data_len())?;
        let state = FundMeState::new(
            ctx.accounts.owner.key(),
            price_feed.key(),
            clock.unix_timestamp,
            ctx.bumps.fund_me,
            ctx.bumps.vault,
        )?;

        let minimum_usd = state.minimum_usd;
        ctx.accounts.fund_me.set_inner(state);

        msg!("FundMe initialized: owner={}, price_feed={}", ctx.accounts.owner.key(), price_feed.key());

        emit!(LedgerInitialized {
            owner: ctx.accounts.owner.key(),
            price_feed: price_feed.key(),
            vault: ctx.accounts.vault.key(),
            minimum_usd,
            timestamp: clock.unix_timestamp,
        });
        Ok(())
    }

    pub fn fund(ctx: Context<Fund>, amount: u64) -> Result<()> {
        let clock = Clock::get()?;
        let price = read_validated_price(
            &PriceFeedAccount::new(&ctx.accounts.price_feed),
            clock.unix_timestamp,
        )?;
        #[cfg(feature = "verbose")]
        log_minimum(ctx.accounts.fund_me.minimum_usd, &price);

        check_vault_rent(
            ctx.accounts.vault.lamports(),
            amount,
            Rent::get()?.minimum_balance(0),
        )?;

        let funder = ctx.accounts.funder.key();
        let receipt = ctx.accounts.fund_me.record_contribution(funder, amount, &price, NATIVE_DECIMALS)?;

        transfer_to_vault(
            &ctx.accounts.funder.to_account_info(),
            &ctx.accounts.vault,
            &ctx.accounts.system_program.to_account_info(),
            amount,
        )?;

        let (whole, frac) = format_native(amount, NATIVE_DECIMALS);
        msg!("Funded {}.{:09} SOL from {} ({} events this round)", whole, frac, funder, receipt.funders_count);

        emit!(Funded {
            funder,
            amount,
            usd_value: receipt.usd_value.min(u64::MAX as u128) as u64,
            total_funded_by: receipt.total_funded_by,
            funders_count: receipt.funders_count,
            via_fallback: false,
            timestamp: clock.unix_timestamp,
        });
        Ok(())
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        let fund_me_key = ctx.accounts.fund_me.key();
        let vault_bump = [ctx.accounts.fund_me.vault_bump];
        let seeds: &[&[u8]] = &[VAULT_SEED, fund_me_key.as_ref(), &vault_bump];

        let vault = ctx.accounts.vault.to_account_info();
        let caller = ctx.accounts.caller.to_account_info();
        let system_program = ctx.accounts.system_program.to_account_info();
        let balance = vault.lamports();

        let receipt = ctx.accounts.fund_me.settle_withdrawal(caller.key, balance, |_owner, amount| {
            transfer_from_vault(&vault, &caller, &system_program, amount, seeds)
        })?;

        let (whole, frac) = format_native(receipt.amount, NATIVE_DECIMALS);
        msg!("Withdrawn {}.{:09} SOL to owner, {} funder entries cleared", whole, frac, receipt.funders_cleared);

        emit!(Withdrawn {
            owner: caller.key(),
            amount: receipt.amount,
            funders_cleared: receipt.funders_cleared,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn owner_of(ctx: Context<ViewLedger>) -> Result<Pubkey> {
        Ok(ctx.accounts.fund_me.owner_of())
    }

    pub fn price_reference_of(ctx: Context<ViewLedger>) -> Result<Pubkey> {
        Ok(ctx.accounts.fund_me.price_reference_of())
    }

    pub fn amount_funded_by(ctx: Context<ViewLedger>, funder: Pubkey) -> Result<u64> {
        Ok(ctx.accounts.fund_me.amount_funded_by(&funder))
    }

    pub fn funder_at(ctx: Context<ViewLedger>, index: u32) -> Result<Pubkey> {
        ctx.accounts.fund_me.funder_at(index)
    }

    pub fn funders_count(ctx: Context<ViewLedger>) -> Result<u32> {
        Ok(ctx.accounts.fund_me.funders_count())
    }

    /// Any unrecognised instruction is a plain value receipt
    pub fn fallback<'info>(
        program_id: &Pubkey,
        accounts: &'info [AccountInfo<'info>],
        _data: &[u8],
    ) -> Result<()> {
        receive_funds(program_id, accounts)
    }
}
