//! Handles the caching logic for external price provider data.

use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::exchange_rates::ExchangeRates;
use crate::price_providers::PriceProvider;
use crate::ApiError;

#[derive(Clone, Debug)]
struct CachedRates {
    rates: ExchangeRates,
    last_fetched: Instant,
}

/// Wraps a provider with a lazy, time-based cache.
///
/// The inner provider is only called when the cache is empty or older than
/// `max_age`; failures are not cached.
#[derive(Debug)]
pub struct CachedPrices<P> {
    provider: P,
    max_age: Duration,
    cache: RwLock<Option<CachedRates>>,
}

impl<P> CachedPrices<P> {
    pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60);

    pub fn new(provider: P, max_age: Duration) -> Self {
        Self {
            provider,
            max_age,
            cache: RwLock::new(None),
        }
    }

    fn fresh(&self, entry: &Option<CachedRates>) -> Option<ExchangeRates> {
        entry
            .as_ref()
            .filter(|cached| cached.last_fetched.elapsed() < self.max_age)
            .map(|cached| cached.rates.clone())
    }
}

impl<P: PriceProvider> PriceProvider for CachedPrices<P> {
    async fn get_rates(&self) -> Result<ExchangeRates, ApiError> {
        if let Some(rates) = self.fresh(&*self.cache.read().await) {
            return Ok(rates);
        }

        let mut write_lock = self.cache.write().await;

        // another task may have refreshed while we waited for the write lock
        if let Some(rates) = self.fresh(&write_lock) {
            return Ok(rates);
        }

        let rates = self.provider.get_rates().await?;
        *write_lock = Some(CachedRates {
            rates: rates.clone(),
            last_fetched: Instant::now(),
        });

        Ok(rates)
    }
}
