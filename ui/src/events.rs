//! The typed publish/subscribe channel pages talk over.

use api::exchange_rates::ExchangeRates;
use api::fiat_currency::FiatCurrency;
use tokio::sync::broadcast;

/// Overlays a page can ask the shell to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Overlay {
    /// Nearby-user location picker.
    Geo,
}

/// The flow that asked for an overlay, so its result can be routed back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum OverlayContext {
    Send,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayRequest {
    pub overlay: Overlay,
    pub context: OverlayContext,
}

/// Every message that travels over the bus.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Event {
    /// Reset the send form.
    ClearForm,
    /// Put an address into the recipient field.
    PrefillRecipient(String),
    /// The wallet finished (re)loading.
    WalletReady,
    /// The preference store can be read.
    StoreReady,
    /// A new, complete exchange-rate table.
    RateUpdate(ExchangeRates),
    OpenOverlay(OverlayRequest),
    PreferredCurrencyChanged(FiatCurrency),
    /// Ids of transactions to add to the history.
    TransactionsLoaded(Vec<String>),
}

impl Event {
    /// The topic name, e.g. `"rate-update"`.
    pub fn topic(&self) -> &'static str {
        self.into()
    }
}

/// A cloneable handle to the application's event bus.
#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Delivers `event` to every current subscriber.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        match self.sender.send(event) {
            Ok(n) => tracing::trace!("published {} to {} subscribers", topic, n),
            Err(_) => tracing::trace!("published {} with no subscribers", topic),
        }
    }

    /// Receives every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_are_kebab_case() {
        assert_eq!(Event::ClearForm.topic(), "clear-form");
        assert_eq!(Event::RateUpdate(ExchangeRates::new()).topic(), "rate-update");
        assert_eq!(
            Event::PreferredCurrencyChanged(FiatCurrency::USD).topic(),
            "preferred-currency-changed"
        );
        assert_eq!(<&str>::from(Overlay::Geo), "geo");
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.clone().subscribe();

        bus.publish(Event::PrefillRecipient("addr".into()));

        assert_eq!(a.recv().await.unwrap(), Event::PrefillRecipient("addr".into()));
        assert_eq!(b.recv().await.unwrap(), Event::PrefillRecipient("addr".into()));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        EventBus::new(1).publish(Event::WalletReady);
    }
}
