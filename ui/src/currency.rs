// ui/src/currency.rs
use api::fiat_currency::FiatCurrency;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use std::str::FromStr;
use thiserror::Error;

/// Fractional digits of a converted coin amount.
pub const BASE_DECIMALS: u32 = 8;
/// Fractional digits of a converted fiat amount.
pub const FIAT_DECIMALS: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("{0:?} is not a number")]
    InvalidInput(String),
    #[error("exchange rate is zero")]
    ZeroRate,
    #[error("converted amount is out of range")]
    Overflow,
    #[error("no exchange rate for {0}")]
    MissingRate(FiatCurrency),
}

/// Parses a raw input field.
///
/// Empty (or blank) input yields `Ok(None)`: there is nothing to convert.
/// Anything else must be plain unsigned decimal text.
pub fn parse_input(raw: &str) -> Result<Option<Decimal>, ConversionError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let plain = raw.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    match Decimal::from_str(raw) {
        Ok(value) if plain => Ok(Some(value)),
        _ => Err(ConversionError::InvalidInput(raw.to_string())),
    }
}

/// Converts a fiat amount to coins: `fiat / rate`, rounded half away from
/// zero to 8 decimals.
pub fn fiat_to_base(fiat: Decimal, rate: Decimal) -> Result<Decimal, ConversionError> {
    if rate.is_zero() {
        return Err(ConversionError::ZeroRate);
    }
    let mut coins = fiat
        .checked_div(rate)
        .ok_or(ConversionError::Overflow)?
        .round_dp_with_strategy(BASE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    coins.rescale(BASE_DECIMALS);
    Ok(coins)
}

/// Converts coins to a fiat amount: `coins * rate`, cut to 2 decimals
/// (truncated at scale 100, never rounded up).
pub fn base_to_fiat(coins: Decimal, rate: Decimal) -> Result<Decimal, ConversionError> {
    let mut fiat = coins
        .checked_mul(rate)
        .ok_or(ConversionError::Overflow)?
        .round_dp_with_strategy(FIAT_DECIMALS, RoundingStrategy::ToZero);
    fiat.rescale(FIAT_DECIMALS);
    Ok(fiat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn round_trip_scenario_at_ten_thousand() {
        let rate = dec("10000");
        assert_eq!(fiat_to_base(dec("100"), rate).unwrap().to_string(), "0.01000000");
        assert_eq!(base_to_fiat(dec("0.01"), rate).unwrap().to_string(), "100.00");
    }

    #[test]
    fn fiat_to_base_rounds_to_eight_places() {
        // 1 / 3 = 0.333333333...
        assert_eq!(fiat_to_base(dec("1"), dec("3")).unwrap().to_string(), "0.33333333");
        // 2 / 3 = 0.666666666... rounds up
        assert_eq!(fiat_to_base(dec("2"), dec("3")).unwrap().to_string(), "0.66666667");
        // exact midpoint 0.000000005 rounds away from zero
        assert_eq!(
            fiat_to_base(dec("0.00000001"), dec("2")).unwrap().to_string(),
            "0.00000001"
        );
    }

    #[test]
    fn base_to_fiat_truncates_to_two_places() {
        assert_eq!(base_to_fiat(dec("0.123456"), dec("100")).unwrap().to_string(), "12.34");
        assert_eq!(base_to_fiat(dec("0.00009999"), dec("100")).unwrap().to_string(), "0.00");
        assert_eq!(base_to_fiat(dec("1.5"), dec("3")).unwrap().to_string(), "4.50");
    }

    #[test]
    fn fiat_of_base_never_exceeds_two_decimals() {
        let rates = ["0.5", "1", "3", "7.77", "12345.678", "61234.5"];
        let amounts = ["0.00000001", "0.1", "0.33333333", "1", "2.71828182", "21"];
        for rate in rates {
            for amount in amounts {
                let fiat = base_to_fiat(dec(amount), dec(rate)).unwrap();
                assert_eq!(fiat.scale(), FIAT_DECIMALS, "{} at {}", amount, rate);
            }
        }
    }

    #[test]
    fn fiat_to_base_recovers_coin_amount() {
        let rates = ["0.5", "3", "7.77", "10000", "12345.678", "61234.5"];
        let amounts = ["0.00000001", "0.1", "0.33333333", "1", "2.71828182", "21"];
        let tolerance = dec("0.00000001");
        for rate in rates {
            for amount in amounts {
                let x = dec(amount);
                let fiat = x * dec(rate);
                let back = fiat_to_base(fiat, dec(rate)).unwrap();
                assert!((back - x).abs() <= tolerance, "{} at {} gave {}", amount, rate, back);
            }
        }
    }

    #[test]
    fn zero_rate_is_an_error() {
        assert_eq!(fiat_to_base(dec("1"), Decimal::ZERO), Err(ConversionError::ZeroRate));
    }

    #[test]
    fn parse_input_skips_empty_and_rejects_text() {
        assert_eq!(parse_input(""), Ok(None));
        assert_eq!(parse_input("   "), Ok(None));
        assert_eq!(parse_input("12.5"), Ok(Some(dec("12.5"))));
        assert_eq!(parse_input(" 7 "), Ok(Some(dec("7"))));
        for bad in ["abc", "1.2.3", "-4", "1e3", "1,000"] {
            assert!(
                matches!(parse_input(bad), Err(ConversionError::InvalidInput(_))),
                "{:?}",
                bad
            );
        }
    }
}
