//! Defines traits and implementations for external price data providers.
#![allow(async_fn_in_trait)]

use std::str::FromStr;

use anyhow::anyhow;
use rust_decimal::Decimal;
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::exchange_rates::ExchangeRates;
use crate::fiat_currency::FiatCurrency;
use crate::ApiError;

/// Selects which public API the ticker feed polls.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum PriceProviderKind {
    #[default]
    #[strum(serialize = "coingecko")]
    CoinGecko,
    #[strum(serialize = "coinpaprika")]
    CoinPaprika,
}

/// A trait for any service that can provide fiat prices for the coin.
pub trait PriceProvider {
    /// Fetches the latest rate table.
    async fn get_rates(&self) -> Result<ExchangeRates, ApiError>;
}

/// Reads a JSON number without going through `f64` arithmetic.
fn json_decimal(value: &Value) -> Option<Decimal> {
    let Value::Number(n) = value else {
        return None;
    };
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

async fn get_json(client: &reqwest::Client, url: &str) -> Result<Value, ApiError> {
    let value = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;
    Ok(value)
}

/// Provides price data from the public CoinGecko API.
pub mod coin_gecko {
    use super::*;

    const BASE_URL: &str = "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin";

    #[derive(Debug, Clone, Default)]
    pub struct CoinGecko {
        client: reqwest::Client,
    }

    impl CoinGecko {
        pub fn new(client: reqwest::Client) -> Self {
            Self { client }
        }

        pub fn url() -> String {
            let codes: Vec<String> = FiatCurrency::iter()
                .map(|c| c.code().to_ascii_lowercase())
                .collect();
            format!("{}&vs_currencies={}", BASE_URL, codes.join(","))
        }

        /// Parses `{"bitcoin": {"usd": 65000.1, ...}}`.
        pub fn parse_response(resp: &Value) -> Result<ExchangeRates, ApiError> {
            let quotes = resp
                .get("bitcoin")
                .and_then(Value::as_object)
                .ok_or_else(|| anyhow!("coingecko response has no \"bitcoin\" object"))?;

            Ok(ExchangeRates::from_codes(quotes.iter().filter_map(
                |(code, price)| json_decimal(price).map(|rate| (code.as_str(), rate)),
            )))
        }
    }

    impl PriceProvider for CoinGecko {
        async fn get_rates(&self) -> Result<ExchangeRates, ApiError> {
            let resp = get_json(&self.client, &Self::url()).await?;
            Self::parse_response(&resp)
        }
    }
}

/// Provides price data from the CoinPaprika API.
pub mod coin_paprika {
    use super::*;

    const BASE_URL: &str = "https://api.coinpaprika.com/v1/tickers/btc-bitcoin";

    #[derive(Debug, Clone, Default)]
    pub struct CoinPaprika {
        client: reqwest::Client,
    }

    impl CoinPaprika {
        pub fn new(client: reqwest::Client) -> Self {
            Self { client }
        }

        pub fn url() -> String {
            let codes: Vec<&str> = FiatCurrency::iter().map(|c| c.code()).collect();
            format!("{}?quotes={}", BASE_URL, codes.join(","))
        }

        /// Parses `{"quotes": {"USD": {"price": 65000.1}, ...}}`.
        pub fn parse_response(resp: &Value) -> Result<ExchangeRates, ApiError> {
            let quotes = resp
                .get("quotes")
                .and_then(Value::as_object)
                .ok_or_else(|| anyhow!("coinpaprika response has no \"quotes\" object"))?;

            Ok(ExchangeRates::from_codes(quotes.iter().filter_map(
                |(code, quote)| {
                    quote
                        .get("price")
                        .and_then(json_decimal)
                        .map(|rate| (code.as_str(), rate))
                },
            )))
        }
    }

    impl PriceProvider for CoinPaprika {
        async fn get_rates(&self) -> Result<ExchangeRates, ApiError> {
            let resp = get_json(&self.client, &Self::url()).await?;
            Self::parse_response(&resp)
        }
    }
}

/// A provider chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum AnyPriceProvider {
    CoinGecko(coin_gecko::CoinGecko),
    CoinPaprika(coin_paprika::CoinPaprika),
}

impl AnyPriceProvider {
    pub fn from_kind(kind: PriceProviderKind) -> Self {
        let client = reqwest::Client::new();
        match kind {
            PriceProviderKind::CoinGecko => Self::CoinGecko(coin_gecko::CoinGecko::new(client)),
            PriceProviderKind::CoinPaprika => {
                Self::CoinPaprika(coin_paprika::CoinPaprika::new(client))
            }
        }
    }
}

impl PriceProvider for AnyPriceProvider {
    async fn get_rates(&self) -> Result<ExchangeRates, ApiError> {
        match self {
            Self::CoinGecko(p) => p.get_rates().await,
            Self::CoinPaprika(p) => p.get_rates().await,
        }
    }
}
