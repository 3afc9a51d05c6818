use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::U256;

use crate::error::{RouterError, RouterResult};

/// One hundred percent in basis points
pub const MAX_SLIPPAGE_BPS: u16 = 10_000;

/// Converts a human decimal string such as `"1.5"` into the token's smallest unit.
///
/// # Errors
/// * `InvalidAmount` if the string is malformed, negative or zero
pub fn parse_amount(amount: &str, decimals: u8) -> RouterResult<U256> {
    let parsed = parse_units(amount.trim(), decimals)
        .map_err(|err| RouterError::InvalidAmount(format!("{amount}: {err}")))?;
    match parsed {
        ParseUnits::U256(value) if !value.is_zero() => Ok(value),
        ParseUnits::U256(_) => Err(RouterError::InvalidAmount(format!(
            "{amount}: must be positive"
        ))),
        ParseUnits::I256(_) => Err(RouterError::InvalidAmount(format!(
            "{amount}: must not be negative"
        ))),
    }
}

/// Renders a smallest-unit amount as a human decimal string without trailing zeros.
///
/// # Errors
/// * `InvalidAmount` if `decimals` is out of range for a unit
pub fn format_amount(amount: U256, decimals: u8) -> RouterResult<String> {
    let formatted = format_units(amount, decimals)
        .map_err(|err| RouterError::InvalidAmount(format!("{amount}: {err}")))?;
    if formatted.contains('.') {
        Ok(formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string())
    } else {
        Ok(formatted)
    }
}

/// Lowest acceptable output when `expected` may slip by `slippage_bps`, rounded down.
///
/// # Arguments
///
/// * `expected` - Output the router reports for the trade
/// * `slippage_bps` - Tolerated shortfall in basis points, at most [`MAX_SLIPPAGE_BPS`]
///
/// # Returns
///
/// `floor(expected * (10000 - slippage_bps) / 10000)`
///
/// # Errors
/// * `InvalidRequest` if `slippage_bps` exceeds [`MAX_SLIPPAGE_BPS`]
pub fn min_amount_out(expected: U256, slippage_bps: u16) -> RouterResult<U256> {
    let kept = MAX_SLIPPAGE_BPS.checked_sub(slippage_bps).ok_or_else(|| {
        RouterError::InvalidRequest(format!("slippage {slippage_bps} bps exceeds 100%"))
    })?;
    let (kept, whole) = (U256::from(kept), U256::from(MAX_SLIPPAGE_BPS));
    // split so the product cannot overflow
    Ok(expected / whole * kept + expected % whole * kept / whole)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.5", 6).unwrap(), U256::from(1_500_000));
        assert_eq!(parse_amount(" 100 ", 2).unwrap(), U256::from(10_000));
        assert_eq!(
            parse_amount("1", 18).unwrap(),
            U256::from(1_000_000_000_000_000_000_u64)
        );
    }

    #[test]
    fn test_parse_rejects_bad_amounts() {
        for amount in ["-1", "0", "abc", ""] {
            assert!(
                matches!(parse_amount(amount, 18), Err(RouterError::InvalidAmount(_))),
                "{amount} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(U256::from(1_500_000), 6).unwrap(), "1.5");
        assert_eq!(format_amount(U256::from(82), 2).unwrap(), "0.82");
        assert_eq!(format_amount(U256::from(100), 2).unwrap(), "1");
        assert_eq!(format_amount(U256::ZERO, 18).unwrap(), "0");
    }

    #[test]
    fn test_min_amount_out() {
        assert_eq!(min_amount_out(U256::from(82), 0).unwrap(), U256::from(82));
        assert_eq!(min_amount_out(U256::from(82), 50).unwrap(), U256::from(81));
        assert_eq!(min_amount_out(U256::from(10_000), 100).unwrap(), U256::from(9_900));
        assert_eq!(min_amount_out(U256::from(82), 10_000).unwrap(), U256::ZERO);
        assert_eq!(min_amount_out(U256::MAX, 0).unwrap(), U256::MAX);
        assert!(matches!(
            min_amount_out(U256::from(82), 10_001),
            Err(RouterError::InvalidRequest(_))
        ));
    }
}
