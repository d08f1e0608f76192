use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::DomainError;

/// Fractional digits kept for every persisted price.
pub const PRICE_SCALE: u32 = 2;

/// Total significant digits a persisted price may carry, fraction included.
pub const PRICE_PRECISION: u32 = 10;

/// Rounds `price` half away from zero to exactly two fractional digits.
///
/// Fails when the rounded value needs more than `PRICE_PRECISION` digits.
pub fn normalize_price(price: Decimal) -> Result<Decimal, DomainError> {
    let mut rounded =
        price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_SCALE);

    if rounded.abs() >= max_exclusive() {
        return Err(DomainError::PriceOutOfRange { price: rounded });
    }

    Ok(rounded)
}

fn max_exclusive() -> Decimal {
    Decimal::from(10_i64.pow(PRICE_PRECISION - PRICE_SCALE))
}
