//! Defines the fiat currencies the exchange-rate ticker quotes.

use serde::Deserialize;
use serde::Serialize;

/// A fiat currency the coin can be priced in.
///
/// Parsing is case-insensitive on the ISO 4217 code, so `"eur"` and `"EUR"`
/// both yield [`FiatCurrency::EUR`].
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Default,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum FiatCurrency {
    AUD,
    BRL,
    CAD,
    CHF,
    CNY,
    EUR,
    GBP,
    HKD,
    IDR,
    ILS,
    JPY,
    MXN,
    NOK,
    NZD,
    PLN,
    RUB,
    SEK,
    SGD,
    #[default]
    USD,
    ZAR,
}

impl FiatCurrency {
    /// Returns the ISO 4217 code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// Returns the graphical symbol for the currency (e.g., '$').
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::AUD | Self::CAD | Self::HKD | Self::MXN | Self::NZD | Self::SGD | Self::USD => {
                "$"
            }
            Self::BRL => "R$",
            Self::CHF => "CHF",
            Self::CNY | Self::JPY => "¥",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::IDR => "Rp",
            Self::ILS => "₪",
            Self::NOK | Self::SEK => "kr",
            Self::PLN => "zł",
            Self::RUB => "₽",
            Self::ZAR => "R",
        }
    }

    /// Returns the full English name of the currency.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AUD => "Australian Dollar",
            Self::BRL => "Brazilian Real",
            Self::CAD => "Canadian Dollar",
            Self::CHF => "Swiss Franc",
            Self::CNY => "Chinese Yuan",
            Self::EUR => "Euro",
            Self::GBP => "British Pound",
            Self::HKD => "Hong Kong Dollar",
            Self::IDR => "Indonesian Rupiah",
            Self::ILS => "Israeli New Shekel",
            Self::JPY => "Japanese Yen",
            Self::MXN => "Mexican Peso",
            Self::NOK => "Norwegian Krone",
            Self::NZD => "New Zealand Dollar",
            Self::PLN => "Polish Złoty",
            Self::RUB => "Russian Ruble",
            Self::SEK => "Swedish Krona",
            Self::SGD => "Singapore Dollar",
            Self::USD => "United States Dollar",
            Self::ZAR => "South African Rand",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(FiatCurrency::from_str("eur"), Ok(FiatCurrency::EUR));
        assert_eq!(FiatCurrency::from_str("Usd"), Ok(FiatCurrency::USD));
        assert!(FiatCurrency::from_str("XYZ").is_err());
    }

    #[test]
    fn code_round_trips_for_every_currency() {
        for currency in FiatCurrency::iter() {
            assert_eq!(FiatCurrency::from_str(currency.code()), Ok(currency));
            assert!(!currency.name().is_empty());
        }
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&FiatCurrency::GBP).unwrap();
        assert_eq!(json, "\"GBP\"");
    }
}
