use anchor_lang::prelude::*;

/// FundMe Error Codes
///
/// Each error has a unique code and descriptive message.
#[error_code]
pub enum ErrorCode {
    #[msg("Invalid configuration: price feed missing or malformed")]
    InvalidConfiguration,

    #[msg("Not enough SOL sent!")]
    InsufficientValue,

    #[msg("Only withdrawable to owner!")]
    NotOwner,

    #[msg("Transfer to owner failed")]
    TransferFailed,

    #[msg("Funder index out of range")]
    IndexOutOfRange,

    #[msg("Price feed returned a non-positive price or unsupported decimals")]
    InvalidPrice,

    #[msg("Price feed update is too old")]
    StalePrice,

    #[msg("Invalid price feed account data")]
    InvalidPriceFeed,

    #[msg("Price feed does not match the configured price reference")]
    PriceFeedMismatch,

    #[msg("Funders list is full, withdraw before accepting more funding")]
    FundersListFull,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Missing accounts")]
    MissingAccounts,

    #[msg("Funder must sign")]
    MissingSignature,

    #[msg("Invalid ledger account")]
    InvalidLedgerAccount,

    #[msg("Invalid vault account")]
    InvalidVault,

    #[msg("Contribution would leave the vault below the rent-exempt minimum")]
    VaultBelowRentExempt,
}
