//! Feeds exchange rates from a price provider onto the event bus.

use std::time::Duration;

use api::price_providers::PriceProvider;
use api::ApiError;
use tokio::time::MissedTickBehavior;

use crate::events::Event;
use crate::events::EventBus;

/// Fetches rates once and publishes them as a `rate-update`.
pub async fn publish_rates_once<P: PriceProvider>(
    provider: &P,
    bus: &EventBus,
) -> Result<(), ApiError> {
    let rates = provider.get_rates().await?;
    if rates.is_empty() {
        tracing::warn!("price provider returned no usable rates");
    }
    bus.publish(Event::RateUpdate(rates));
    Ok(())
}

/// Refreshes rates every `period`, starting immediately. Runs until dropped.
///
/// A failed fetch is logged and the previous table stays in effect.
pub async fn run_rate_feed<P: PriceProvider>(provider: P, bus: EventBus, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if let Err(e) = publish_rates_once(&provider, &bus).await {
            tracing::warn!("exchange rate refresh failed: {:#}", e);
        }
    }
}
