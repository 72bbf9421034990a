//! Domain types and collaborator contracts shared by the wallet front-end.
//!
//! Nothing in this crate knows about pages or events: it defines amounts,
//! currencies, exchange rates, addresses, the wallet engine contract, the
//! preference store and the price providers that feed exchange rates.

pub mod address;
pub mod amount;
pub mod exchange_rates;
pub mod fiat_currency;
pub mod prefs;
pub mod price_caching;
pub mod price_providers;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
pub mod wallet;

/// Error type of the price-provider boundary, where transport, status and
/// decoding failures meet.
pub type ApiError = anyhow::Error;
