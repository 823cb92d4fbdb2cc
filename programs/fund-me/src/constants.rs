// ══════════════════════════════════════════════════════════════════════════════
// PDA SEEDS
// ══════════════════════════════════════════════════════════════════════════════

/// FundMe ledger state PDA seed
pub const FUND_ME_SEED: &[u8] = b"fund_me";

/// Vault PDA seed (system-owned, holds the pooled lamports)
/// Seeds: ["vault", fund_me]
pub const VAULT_SEED: &[u8] = b"vault";

// ══════════════════════════════════════════════════════════════════════════════
// FUNDING THRESHOLDS
// ══════════════════════════════════════════════════════════════════════════════

/// Minimum contribution, in whole USD
pub const MINIMUM_USD: u64 = 1;

/// Fixed-point precision used for every USD value the ledger computes
/// (8 decimals: 100_000_000 = $1.00)
pub const USD_DECIMALS: u8 = 8;

/// Lamports per SOL exponent
pub const NATIVE_DECIMALS: u8 = 9;

/// Upper bound on the decimals a price feed may report
pub const MAX_PRICE_DECIMALS: u8 = 18;

/// Maximum age of a price update before it is rejected (1 hour)
pub const MAX_PRICE_AGE: i64 = 3_600;

/// Maximum contribution events per funding round.
/// Bounds the state account; a withdrawal frees the capacity.
pub const MAX_FUNDERS: usize = 64;

// ══════════════════════════════════════════════════════════════════════════════
// PRICE FEED ACCOUNT LAYOUT
// ══════════════════════════════════════════════════════════════════════════════
// [0..8)   header / discriminator (ignored)
// [8]      decimals: u8
// [9..17)  answer: i64 (LE)
// [17..25) updated_at: i64 (LE, unix seconds)

pub const PRICE_FEED_HEADER_LEN: usize = 8;
pub const PRICE_FEED_DECIMALS_OFFSET: usize = PRICE_FEED_HEADER_LEN;
pub const PRICE_FEED_ANSWER_OFFSET: usize = 9;
pub const PRICE_FEED_UPDATED_AT_OFFSET: usize = 17;
pub const PRICE_FEED_LEN: usize = 25;

// ══════════════════════════════════════════════════════════════════════════════
// TESTING MODE CONFIGURATION
// ══════════════════════════════════════════════════════════════════════════════
// SECURITY: Use feature flag instead of runtime constant
// Build with: anchor build -- --features testing (for localnet mock feeds)
// Build with: anchor build (for mainnet - testing disabled by default)
//
// When true (TESTING):
//   - Disables the MAX_PRICE_AGE staleness check
// When false (PRODUCTION):
//   - Rejects price updates older than MAX_PRICE_AGE
#[cfg(feature = "testing")]
pub const TESTING_MODE: bool = true;
#[cfg(not(feature = "testing"))]
pub const TESTING_MODE: bool = false;
