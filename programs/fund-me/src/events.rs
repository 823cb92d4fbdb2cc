use anchor_lang::prelude::*;

// ══════════════════════════════════════════════════════════════════════════════
// INITIALIZATION EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when the ledger is initialized
#[event]
pub struct LedgerInitialized {
    pub owner: Pubkey,
    pub price_feed: Pubkey,
    pub vault: Pubkey,
    pub minimum_usd: u64,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// FUNDING EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted for every accepted contribution, from `fund` or the fallback path
#[event]
pub struct Funded {
    pub funder: Pubkey,
    pub amount: u64,
    /// USD value of `amount`, scaled by USD_DECIMALS
    pub usd_value: u64,
    /// Funder's cumulative amount for the current round
    pub total_funded_by: u64,
    pub funders_count: u32,
    pub via_fallback: bool,
    pub timestamp: i64,
}

/// Emitted when the owner sweeps the vault
#[event]
pub struct Withdrawn {
    pub owner: Pubkey,
    pub amount: u64,
    /// Contribution events cleared from the funders list
    pub funders_cleared: u32,
    pub timestamp: i64,
}
