//! Provides a safe, self-contained type for representing coin amounts.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use num_traits::CheckedAdd;
use num_traits::Zero;
use rust_decimal::Decimal;
use thiserror::Error;

/// Number of fractional digits of the coin's display unit.
pub const COIN_DECIMALS: u32 = 8;

/// Number of base units in one whole coin.
pub const BASE_UNITS_PER_COIN: u64 = 100_000_000;

/// An error that can occur when parsing a string into an `Amount`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    /// The string is not a plain decimal number (e.g., "abc", "1.2.3", "-1").
    #[error("invalid amount format")]
    InvalidFormat,
    /// The string has more fractional digits than the coin supports.
    #[error("too many decimal places, at most {COIN_DECIMALS} are allowed")]
    TooManyDecimals,
    /// The value does not fit in the base-unit range.
    #[error("amount is too large")]
    Overflow,
}

/// A quantity of coins.
///
/// Internally, the amount is stored as an unsigned 64-bit integer in the smallest
/// unit (1 coin = 100 000 000 base units), so no floating point value ever
/// takes part in amount arithmetic. The `Display` implementation prints the
/// amount in whole coins with exactly eight decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    // --- Constructors ---

    /// Creates an amount directly from base units.
    ///
    /// # Example
    /// ```
    /// use api::amount::Amount;
    /// let amount = Amount::from_sats(1_000);
    /// assert_eq!(amount.to_string(), "0.00001000");
    /// ```
    pub const fn from_sats(sats: u64) -> Self {
        Self(sats)
    }

    /// Parses a user-entered coin amount such as `"0.001"`.
    ///
    /// Only plain, unsigned decimal text is accepted: no sign, no exponent, no
    /// grouping separators. Either side of the decimal point may be empty
    /// (`".5"`, `"1."`) but not both.
    ///
    /// # Examples
    /// ```
    /// use api::amount::{Amount, ParseAmountError};
    /// let amount = Amount::coins_from_str("0.001")?;
    /// assert_eq!(amount.to_sats(), 100_000);
    ///
    /// let err = Amount::coins_from_str("0.000000001").unwrap_err();
    /// assert_eq!(err, ParseAmountError::TooManyDecimals);
    /// # Ok::<(), ParseAmountError>(())
    /// ```
    pub fn coins_from_str(s: &str) -> Result<Self, ParseAmountError> {
        let mut parts = s.split('.');
        let whole_str = parts.next().unwrap_or("");
        let frac_str = parts.next().unwrap_or("");

        if parts.next().is_some() || (whole_str.is_empty() && frac_str.is_empty()) {
            return Err(ParseAmountError::InvalidFormat);
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole_str) || !all_digits(frac_str) {
            return Err(ParseAmountError::InvalidFormat);
        }
        if frac_str.len() > COIN_DECIMALS as usize {
            return Err(ParseAmountError::TooManyDecimals);
        }

        let whole = if whole_str.is_empty() {
            0
        } else {
            whole_str
                .parse::<u64>()
                .map_err(|_| ParseAmountError::Overflow)?
        };
        let frac = if frac_str.is_empty() {
            0
        } else {
            // at most eight digits, always fits
            frac_str
                .parse::<u64>()
                .map_err(|_| ParseAmountError::InvalidFormat)?
        };
        let frac_scale = 10_u64.pow(COIN_DECIMALS - frac_str.len() as u32);

        whole
            .checked_mul(BASE_UNITS_PER_COIN)
            .and_then(|w| w.checked_add(frac * frac_scale))
            .map(Self)
            .ok_or(ParseAmountError::Overflow)
    }

    /// Converts an exact decimal coin value into an amount.
    ///
    /// Negative values are rejected as `InvalidFormat`, values with more than
    /// eight significant fractional digits as `TooManyDecimals`.
    pub fn from_coins(coins: Decimal) -> Result<Self, ParseAmountError> {
        if coins.is_sign_negative() && !coins.is_zero() {
            return Err(ParseAmountError::InvalidFormat);
        }
        let coins = coins.normalize();
        if coins.scale() > COIN_DECIMALS {
            return Err(ParseAmountError::TooManyDecimals);
        }
        let sats = coins
            .checked_mul(Decimal::from(BASE_UNITS_PER_COIN))
            .ok_or(ParseAmountError::Overflow)?;
        u64::try_from(sats).map(Self).map_err(|_| ParseAmountError::Overflow)
    }

    // --- Getters ---

    /// Returns the raw amount in base units.
    pub const fn to_sats(&self) -> u64 {
        self.0
    }

    /// Returns the amount in whole coins, with a fixed scale of eight decimals.
    pub fn to_coins(&self) -> Decimal {
        // u64 always fits the 96-bit mantissa
        Decimal::from_i128_with_scale(i128::from(self.0), COIN_DECIMALS)
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::coins_from_str(s)
    }
}

/// Formats the amount in whole coins (e.g. "0.00100000").
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / BASE_UNITS_PER_COIN;
        let frac = self.0 % BASE_UNITS_PER_COIN;

        write!(
            f,
            "{}.{:0width$}",
            whole,
            frac,
            width = COIN_DECIMALS as usize
        )
    }
}

/// Implements the addition operator. Panics on overflow, like integer addition.
impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl CheckedAdd for Amount {
    fn checked_add(&self, v: &Self) -> Option<Self> {
        self.0.checked_add(v.0).map(Self)
    }
}

impl Zero for Amount {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}
