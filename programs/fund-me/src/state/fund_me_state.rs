use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::helpers::math::{minimum_usd_value, native_to_usd};
use crate::helpers::oracle::PriceReading;

/// Cumulative amount contributed by one funder in the current round
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub funder: Pubkey,
    pub amount: u64,
}

impl Contribution {
    pub const LEN: usize = 32 + 8;
}

/// Result of a recorded contribution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContributionReceipt {
    pub amount: u64,
    /// USD value of `amount`, scaled by USD_DECIMALS
    pub usd_value: u128,
    pub total_funded_by: u64,
    pub funders_count: u32,
}

/// Result of a completed withdrawal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalReceipt {
    pub amount: u64,
    pub funders_cleared: u32,
}

/// FundMe ledger
///
/// Owner and price feed are fixed at initialization. The contribution ledger
/// and funders list grow with each contribution and are cleared together by
/// a withdrawal. Only one FundMeState account exists per program instance.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct FundMeState {
    /// Sole identity allowed to withdraw
    pub owner: Pubkey,

    /// Price feed used to convert contributions to USD
    pub price_feed: Pubkey,

    /// Minimum contribution in whole USD
    pub minimum_usd: u64,

    /// Sum of all contribution amounts in the current round
    pub total_funded: u64,

    /// Per-funder cumulative amounts, one entry per distinct funder
    pub contributions: Vec<Contribution>,

    /// One entry per contribution event, in order
    pub funders: Vec<Pubkey>,

    /// Timestamp when the ledger was initialized
    pub created_at: i64,

    /// PDA bump for the state account
    pub bump: u8,

    /// PDA bump for the vault
    pub vault_bump: u8,
}

impl FundMeState {
    /// Account size calculation:
    /// - owner: 32 bytes (Pubkey)
    /// - price_feed: 32 bytes (Pubkey)
    /// - minimum_usd: 8 bytes (u64)
    /// - total_funded: 8 bytes (u64)
    /// - contributions: 4 + MAX_FUNDERS * 40 bytes (Vec<Contribution>)
    /// - funders: 4 + MAX_FUNDERS * 32 bytes (Vec<Pubkey>)
    /// - created_at: 8 bytes (i64)
    /// - bump: 1 byte
    /// - vault_bump: 1 byte
    pub const LEN: usize = 32 + 32 + 8 + 8
        + 4 + MAX_FUNDERS * Contribution::LEN
        + 4 + MAX_FUNDERS * 32
        + 8 + 1 + 1;

    /// The price reference must be a real key backed by a decodable feed
    pub fn validate_price_feed(price_feed: &Pubkey, data_len: usize) -> Result<()> {
        require!(*price_feed != Pubkey::default(), ErrorCode::InvalidConfiguration);
        require!(data_len >= PRICE_FEED_LEN, ErrorCode::InvalidConfiguration);
        Ok(())
    }

    pub fn new(
        owner: Pubkey,
        price_feed: Pubkey,
        created_at: i64,
        bump: u8,
        vault_bump: u8,
    ) -> Result<Self> {
        require!(price_feed != Pubkey::default(), ErrorCode::InvalidConfiguration);

        Ok(Self {
            owner,
            price_feed,
            minimum_usd: MINIMUM_USD,
            total_funded: 0,
            contributions: Vec::new(),
            funders: Vec::new(),
            created_at,
            bump,
            vault_bump,
        })
    }

    // ── Contributions ────────────────────────────────────────────────────

    /// Single accounting path behind `fund` and the fallback receive.
    /// Every check runs before the first mutation.
    pub fn record_contribution(
        &mut self,
        funder: Pubkey,
        amount: u64,
        price: &PriceReading,
        native_decimals: u8,
    ) -> Result<ContributionReceipt> {
        let usd_value = native_to_usd(amount, price.answer, price.decimals, native_decimals)?;
        require!(
            usd_value >= minimum_usd_value(self.minimum_usd)?,
            ErrorCode::InsufficientValue
        );

        require!(self.funders.len() < MAX_FUNDERS, ErrorCode::FundersListFull);

        let new_total = self.total_funded
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        let position = self.contributions.iter().position(|c| c.funder == funder);
        let total_funded_by = match position {
            Some(i) => self.contributions[i].amount
                .checked_add(amount)
                .ok_or(ErrorCode::MathOverflow)?,
            None => amount,
        };

        // Effects
        match position {
            Some(i) => self.contributions[i].amount = total_funded_by,
            None => self.contributions.push(Contribution { funder, amount }),
        }
        self.funders.push(funder);
        self.total_funded = new_total;

        Ok(ContributionReceipt {
            amount,
            usd_value,
            total_funded_by,
            funders_count: self.funders_count(),
        })
    }

    /// Credit the vault balance above `total_funded` to `funder`.
    /// Used when lamports reach the vault by a plain transfer.
    ///
    /// The whole surplus goes to whoever calls first. A plain transfer must
    /// share a transaction with the receive instruction, otherwise any other
    /// signer can claim it.
    pub fn record_unattributed_deposit(
        &mut self,
        funder: Pubkey,
        vault_balance: u64,
        price: &PriceReading,
        native_decimals: u8,
    ) -> Result<ContributionReceipt> {
        let amount = vault_balance.saturating_sub(self.total_funded);
        self.record_contribution(funder, amount, price, native_decimals)
    }

    // ── Withdrawal ───────────────────────────────────────────────────────

    /// Sweep `balance` to the owner, then reset the round.
    ///
    /// `transfer` performs the value movement; the ledger is cleared only if
    /// it succeeds, so a rejected transfer leaves every entry in place.
    pub fn settle_withdrawal<F>(
        &mut self,
        caller: &Pubkey,
        balance: u64,
        transfer: F,
    ) -> Result<WithdrawalReceipt>
    where
        F: FnOnce(&Pubkey, u64) -> Result<()>,
    {
        require_keys_eq!(*caller, self.owner, ErrorCode::NotOwner);

        transfer(&self.owner, balance).map_err(|_| error!(ErrorCode::TransferFailed))?;

        let funders_cleared = self.funders_count();
        self.reset();

        Ok(WithdrawalReceipt { amount: balance, funders_cleared })
    }

    /// Return to the genesis accounting state; owner and price feed persist
    pub fn reset(&mut self) {
        self.contributions.clear();
        self.funders.clear();
        self.total_funded = 0;
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn owner_of(&self) -> Pubkey {
        self.owner
    }

    pub fn price_reference_of(&self) -> Pubkey {
        self.price_feed
    }

    pub fn amount_funded_by(&self, funder: &Pubkey) -> u64 {
        self.contributions
            .iter()
            .find(|c| c.funder == *funder)
            .map_or(0, |c| c.amount)
    }

    pub fn funder_at(&self, index: u32) -> Result<Pubkey> {
        self.funders
            .get(index as usize)
            .copied()
            .ok_or_else(|| error!(ErrorCode::IndexOutOfRange))
    }

    pub fn funders_count(&self) -> u32 {
        self.funders.len() as u32
    }
}
