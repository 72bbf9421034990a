//=============================================================================
// File: src/screens/send.rs
//=============================================================================
use api::fiat_currency::FiatCurrency;
use api::prefs::store::PreferenceStore;
use api::prefs::store::StoreError;
use api::prefs::user_prefs::SystemInfo;
use api::prefs::user_prefs::SYSTEM_INFO_KEY;
use api::wallet::Transaction;
use api::wallet::Wallet;
use api::wallet::WalletEngine;
use api::wallet::WalletError;
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

use crate::app_state::CurrencySelection;
use crate::app_state::ViewState;
use crate::currency;
use crate::currency::ConversionError;
use crate::events::Event;
use crate::events::EventBus;
use crate::events::Overlay;
use crate::events::OverlayContext;
use crate::events::OverlayRequest;
use crate::host::ErrorDialog;
use crate::host::SendConfirmation;
use crate::host::SendPageHost;
use crate::host::VALIDATION_ERROR_TITLE;
use crate::send_intent;

// --- Data Structures ---

/// Something the user did on the send form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gesture {
    OpenLocationPicker,
    RequestSend,
    RecipientEdited(String),
    /// Raw text of the fiat field.
    FiatEdited(String),
    /// Raw text of the coin amount field.
    BaseEdited(String),
    SelectCurrency(FiatCurrency),
}

/// A gesture whose input could not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("cannot convert amount: {0}")]
    Conversion(#[from] ConversionError),
}

/// The send page: keeps the form's view state in step with bus events and
/// user gestures, and hands validated send requests to the host.
pub struct SendPage<E, S, H> {
    state: ViewState,
    selection: CurrencySelection,
    engine: E,
    store: S,
    host: H,
    bus: EventBus,
}

impl<E, S, H> SendPage<E, S, H>
where
    E: WalletEngine,
    S: PreferenceStore,
    H: SendPageHost,
{
    pub fn new(engine: E, store: S, host: H, bus: EventBus) -> Self {
        Self {
            state: ViewState::default(),
            selection: CurrencySelection::Uninitialized,
            engine,
            store,
            host,
            bus,
        }
    }

    // --- Getters ---

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn selection(&self) -> CurrencySelection {
        self.selection
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    // --- Event Handlers ---

    /// Applies an inbound bus event. Events this page only publishes are ignored.
    pub async fn handle_event(&mut self, event: &Event) {
        tracing::trace!("send page received {}", event.topic());
        match event {
            Event::ClearForm => self.state.clear_form(),
            Event::PrefillRecipient(address) => self.state.recipient = address.clone(),
            Event::WalletReady => self.refresh_denomination(),
            Event::StoreReady => self.load_preferred_currency().await,
            Event::RateUpdate(rates) => self.state.exchange_rates = rates.clone(),
            Event::OpenOverlay(_)
            | Event::PreferredCurrencyChanged(_)
            | Event::TransactionsLoaded(_) => {}
        }
    }

    /// Applies a user gesture.
    ///
    /// Only the conversion gestures can fail, when the edited field is not a
    /// number; the opposite field is then left as it was.
    pub async fn handle_gesture(&mut self, gesture: Gesture) -> Result<(), InputError> {
        match gesture {
            Gesture::OpenLocationPicker => self.bus.publish(Event::OpenOverlay(OverlayRequest {
                overlay: Overlay::Geo,
                context: OverlayContext::Send,
            })),
            Gesture::RequestSend => self.request_send(),
            Gesture::RecipientEdited(recipient) => self.state.recipient = recipient,
            Gesture::FiatEdited(raw) => {
                self.state.fiat_amount = raw;
                self.convert_fiat_to_base()?;
            }
            Gesture::BaseEdited(raw) => {
                self.state.amount = raw;
                self.convert_base_to_fiat()?;
            }
            Gesture::SelectCurrency(currency) => self.select_currency(currency).await,
        }
        Ok(())
    }

    /// Reports the outcome of broadcasting a confirmed transaction.
    ///
    /// On success the wallet and history are asked to refresh.
    pub fn on_transaction_sent<T: Transaction>(&self, result: Result<&T, WalletError>) {
        match result {
            Ok(tx) => {
                let txid = tx.txid();
                tracing::info!("transaction {} sent", txid);
                self.bus.publish(Event::WalletReady);
                self.bus.publish(Event::TransactionsLoaded(vec![txid]));
            }
            Err(e) => {
                tracing::warn!("sending transaction failed: {}", e);
                self.host.show_error(ErrorDialog {
                    title: None,
                    message: format!("error sending transaction. {}", e),
                });
            }
        }
    }

    /// Drives the page until the gesture channel closes (the page is torn
    /// down) or the bus goes away, then hands the page back.
    ///
    /// Pending bus events are applied before pending gestures.
    pub async fn run(
        mut self,
        mut events: broadcast::Receiver<Event>,
        mut gestures: mpsc::Receiver<Gesture>,
    ) -> Self {
        loop {
            tokio::select! {
                biased;

                event = events.recv() => match event {
                    Ok(event) => self.handle_event(&event).await,
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!("send page fell behind, {} events dropped", missed);
                    }
                    Err(RecvError::Closed) => break,
                },
                gesture = gestures.recv() => match gesture {
                    Some(gesture) => {
                        if let Err(e) = self.handle_gesture(gesture).await {
                            tracing::debug!("{}", e);
                        }
                    }
                    None => break,
                },
            }
        }
        self
    }

    // --- Internals ---

    fn refresh_denomination(&mut self) {
        match self.engine.current_wallet() {
            Some(wallet) => self.state.denomination = wallet.denomination().to_string(),
            None => tracing::warn!("wallet-ready received but no wallet is open"),
        }
    }

    async fn load_preferred_currency(&mut self) {
        let doc = match self.store.get().await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!("cannot read preferences: {}", e);
                return;
            }
        };

        match doc.system_info().preferred_currency {
            Some(currency) => self.select_currency(currency).await,
            None => {
                // nothing stored: the next change is the user's own choice
                self.selection = CurrencySelection::Ready;
            }
        }
    }

    /// Observes a change of the selected currency.
    async fn select_currency(&mut self, currency: FiatCurrency) {
        let old = self.state.selected_currency.replace(currency);
        if old == Some(currency) {
            return;
        }

        if self.selection.is_uninitialized() {
            tracing::debug!("initial currency {}, not persisting", currency);
            self.selection = CurrencySelection::Ready;
            return;
        }

        if let Err(e) = self.persist_currency(currency).await {
            tracing::error!("cannot save preferred currency {}: {}", currency, e);
            return;
        }

        self.bus.publish(Event::PreferredCurrencyChanged(currency));
        if let Err(e) = self.convert_base_to_fiat() {
            tracing::debug!("not refreshing fiat amount: {}", e);
        }
    }

    async fn persist_currency(&self, currency: FiatCurrency) -> Result<(), StoreError> {
        let value = serde_json::to_value(SystemInfo::with_currency(currency))?;
        self.store.set(SYSTEM_INFO_KEY, value).await
    }

    fn request_send(&self) {
        tracing::info!("send requested");

        match send_intent::validate(&self.state, &self.engine) {
            Ok(intent) => self.host.show_confirmation(SendConfirmation {
                to: self.state.recipient.clone(),
                amount: self.state.amount.clone(),
                denomination: self.state.denomination.clone(),
                fee: intent.transaction.estimate_fee().to_coins(),
            }),
            Err(e) => {
                tracing::info!("send refused: {:?}", e);
                self.host.show_error(ErrorDialog {
                    title: Some(VALIDATION_ERROR_TITLE.to_string()),
                    message: e.to_string(),
                });
            }
        }
    }

    /// The rate of the selected currency; `None` when no currency is selected.
    fn selected_rate(&self) -> Result<Option<Decimal>, ConversionError> {
        let Some(currency) = self.state.selected_currency else {
            return Ok(None);
        };
        self.state
            .exchange_rates
            .get(currency)
            .map(Some)
            .ok_or(ConversionError::MissingRate(currency))
    }

    fn convert_fiat_to_base(&mut self) -> Result<(), ConversionError> {
        let Some(fiat) = currency::parse_input(&self.state.fiat_amount)? else {
            return Ok(());
        };
        let Some(rate) = self.selected_rate()? else {
            return Ok(());
        };
        self.state.amount = currency::fiat_to_base(fiat, rate)?.to_string();
        Ok(())
    }

    fn convert_base_to_fiat(&mut self) -> Result<(), ConversionError> {
        let Some(coins) = currency::parse_input(&self.state.amount)? else {
            return Ok(());
        };
        let Some(rate) = self.selected_rate()? else {
            return Ok(());
        };
        self.state.fiat_amount = currency::base_to_fiat(coins, rate)?.to_string();
        Ok(())
    }
}
