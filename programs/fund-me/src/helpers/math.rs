use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;

fn pow10(exp: u32) -> Result<u128> {
    Ok(10u128.checked_pow(exp).ok_or(ErrorCode::MathOverflow)?)
}

/// Convert a native amount to USD at `price`, scaled by USD_DECIMALS.
///
/// `amount * price` carries `native_decimals + price_decimals` decimals; the
/// product is rescaled to USD_DECIMALS, rounding down.
pub fn native_to_usd(
    amount: u64,
    price: i64,
    price_decimals: u8,
    native_decimals: u8,
) -> Result<u128> {
    require!(price > 0, ErrorCode::InvalidPrice);
    require!(price_decimals <= MAX_PRICE_DECIMALS, ErrorCode::InvalidPrice);

    let raw = (amount as u128)
        .checked_mul(price as u128)
        .ok_or(ErrorCode::MathOverflow)?;

    let source_scale = native_decimals as u32 + price_decimals as u32;
    let target_scale = USD_DECIMALS as u32;

    #[cfg(feature = "verbose")]
    msg!("native_to_usd: amount={}, price={}, price_decimals={}, native_decimals={}",
         amount, price, price_decimals, native_decimals);

    let usd = if source_scale >= target_scale {
        raw / pow10(source_scale - target_scale)?
    } else {
        raw.checked_mul(pow10(target_scale - source_scale)?)
            .ok_or(ErrorCode::MathOverflow)?
    };

    #[cfg(feature = "verbose")]
    msg!("native_to_usd: usd_value={}", usd);

    Ok(usd)
}

/// USD floor scaled by USD_DECIMALS
pub fn minimum_usd_value(minimum_usd: u64) -> Result<u128> {
    Ok((minimum_usd as u128)
        .checked_mul(pow10(USD_DECIMALS as u32)?)
        .ok_or(ErrorCode::MathOverflow)?)
}

/// Smallest native amount whose USD value meets `minimum_usd` at `price`.
/// Inverse of `native_to_usd` under its round-down rule.
pub fn required_native_amount(
    minimum_usd: u64,
    price: i64,
    price_decimals: u8,
    native_decimals: u8,
) -> Result<u64> {
    require!(price > 0, ErrorCode::InvalidPrice);
    require!(price_decimals <= MAX_PRICE_DECIMALS, ErrorCode::InvalidPrice);

    let floor = minimum_usd_value(minimum_usd)?;
    let price = price as u128;
    let source_scale = native_decimals as u32 + price_decimals as u32;
    let target_scale = USD_DECIMALS as u32;

    // amount * price must reach `needed` in source-scale units
    let needed = if source_scale >= target_scale {
        floor.checked_mul(pow10(source_scale - target_scale)?)
            .ok_or(ErrorCode::MathOverflow)?
    } else {
        floor.div_ceil(pow10(target_scale - source_scale)?)
    };

    let amount = needed.div_ceil(price);
    Ok(u64::try_from(amount).map_err(|_| ErrorCode::MathOverflow)?)
}

/// Split a native amount into whole and fractional parts for readable logs
pub fn format_native(amount: u64, native_decimals: u8) -> (u64, u64) {
    let unit = 10u64.saturating_pow(native_decimals as u32);
    (amount / unit, amount % unit)
}
