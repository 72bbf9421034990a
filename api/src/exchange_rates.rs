//! Provides a specialized map holding the coin's price in various fiat currencies.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use crate::fiat_currency::FiatCurrency;

/// The price of one whole coin in each quoted fiat currency.
///
/// Only strictly positive rates are ever stored, so a rate read from the map
/// is always safe to divide by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRates(HashMap<FiatCurrency, Decimal>);

impl ExchangeRates {
    /// Creates a new, empty table.
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Builds a table from raw `(currency code, rate)` pairs, as delivered by a
    /// ticker feed.
    ///
    /// Codes that are not a known [`FiatCurrency`] and rates that are zero or
    /// negative are skipped.
    pub fn from_codes<I, S>(rates: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (code, rate) in rates {
            let code = code.as_ref();
            match FiatCurrency::from_str(code) {
                Ok(_) if rate <= Decimal::ZERO => {
                    tracing::debug!("skipping non-positive rate {} for {}", rate, code);
                }
                Ok(currency) => {
                    table.insert(currency, rate);
                }
                Err(_) => tracing::debug!("skipping unknown currency code {:?}", code),
            }
        }
        table
    }

    /// Inserts or updates the rate for a currency.
    ///
    /// Returns the previous rate, if any. A non-positive rate is ignored and
    /// `None` is returned.
    pub fn insert(&mut self, currency: FiatCurrency, rate: Decimal) -> Option<Decimal> {
        if rate <= Decimal::ZERO {
            return None;
        }
        self.0.insert(currency, rate)
    }

    /// Removes the rate for a currency, returning it if it existed.
    pub fn remove(&mut self, currency: FiatCurrency) -> Option<Decimal> {
        self.0.remove(&currency)
    }

    /// Retrieves the rate for a currency.
    pub fn get(&self, currency: FiatCurrency) -> Option<Decimal> {
        self.0.get(&currency).copied()
    }

    pub fn contains(&self, currency: FiatCurrency) -> bool {
        self.0.contains_key(&currency)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over `(currency, rate)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (FiatCurrency, Decimal)> + '_ {
        self.0.iter().map(|(currency, rate)| (*currency, *rate))
    }
}

impl FromIterator<(FiatCurrency, Decimal)> for ExchangeRates {
    fn from_iter<T: IntoIterator<Item = (FiatCurrency, Decimal)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (currency, rate) in iter {
            table.insert(currency, rate);
        }
        table
    }
}
