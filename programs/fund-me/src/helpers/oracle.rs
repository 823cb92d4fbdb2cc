use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;

/// One price observation: `answer` carries `decimals` decimals
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceReading {
    pub answer: i64,
    pub decimals: u8,
    pub updated_at: i64,
}

impl PriceReading {
    /// Fail closed on prices the conversion cannot use.
    /// The staleness check is skipped in TESTING_MODE.
    pub fn validate(&self, now: i64) -> Result<()> {
        require!(self.answer > 0, ErrorCode::InvalidPrice);
        require!(self.decimals <= MAX_PRICE_DECIMALS, ErrorCode::InvalidPrice);

        if !TESTING_MODE {
            require!(
                now.saturating_sub(self.updated_at) <= MAX_PRICE_AGE,
                ErrorCode::StalePrice
            );
        }
        Ok(())
    }
}

/// Read-only source of the latest price and its decimals
pub trait PriceOracle {
    fn latest_price(&self) -> Result<PriceReading>;
}

/// Price feed backed by an on-chain account (see PRICE_FEED_* layout)
pub struct PriceFeedAccount<'a, 'info> {
    info: &'a AccountInfo<'info>,
}

impl<'a, 'info> PriceFeedAccount<'a, 'info> {
    pub fn new(info: &'a AccountInfo<'info>) -> Self {
        Self { info }
    }
}

impl PriceOracle for PriceFeedAccount<'_, '_> {
    fn latest_price(&self) -> Result<PriceReading> {
        let data = self.info.try_borrow_data()?;
        deserialize_price_feed(&data[..])
    }
}

/// Manually decode a price feed account (fixed little-endian layout)
pub fn deserialize_price_feed(data: &[u8]) -> Result<PriceReading> {
    require!(data.len() >= PRICE_FEED_LEN, ErrorCode::InvalidPriceFeed);

    let decimals = data[PRICE_FEED_DECIMALS_OFFSET];

    let answer = i64::from_le_bytes(
        data[PRICE_FEED_ANSWER_OFFSET..PRICE_FEED_ANSWER_OFFSET + 8]
            .try_into()
            .map_err(|_| ErrorCode::InvalidPriceFeed)?
    );

    let updated_at = i64::from_le_bytes(
        data[PRICE_FEED_UPDATED_AT_OFFSET..PRICE_FEED_UPDATED_AT_OFFSET + 8]
            .try_into()
            .map_err(|_| ErrorCode::InvalidPriceFeed)?
    );

    #[cfg(feature = "verbose")]
    msg!("Price feed: answer={}, decimals={}, updated_at={}", answer, decimals, updated_at);

    Ok(PriceReading { answer, decimals, updated_at })
}

/// Read the latest price and reject it if unusable at `now`
pub fn read_validated_price(oracle: &impl PriceOracle, now: i64) -> Result<PriceReading> {
    let reading = oracle.latest_price()?;
    reading.validate(now)?;
    Ok(reading)
}
