//! Drives a send page through the bus and gesture channel, the way a shell does.

use std::str::FromStr;
use std::sync::Mutex;

use api::amount::Amount;
use api::exchange_rates::ExchangeRates;
use api::fiat_currency::FiatCurrency;
use api::prefs::store::JsonFileStore;
use api::prefs::store::PreferenceStore;
use api::testutils::MockEngine;
use api::testutils::MockWallet;
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use ui::host::ErrorDialog;
use ui::host::SendConfirmation;
use ui::CurrencySelection;
use ui::Event;
use ui::EventBus;
use ui::Gesture;
use ui::SendPage;
use ui::SendPageHost;

const BOAT: &str = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT";

#[derive(Default)]
struct Shell {
    errors: Mutex<Vec<ErrorDialog>>,
    confirmations: Mutex<Vec<SendConfirmation>>,
}

impl SendPageHost for Shell {
    fn show_error(&self, dialog: ErrorDialog) {
        self.errors.lock().unwrap().push(dialog);
    }

    fn show_confirmation(&self, confirmation: SendConfirmation) {
        self.confirmations.lock().unwrap().push(confirmation);
    }
}

fn engine() -> MockEngine {
    MockEngine::with_wallet(
        MockWallet::new(Amount::from_sats(50_000_000)).with_dust_threshold(Amount::from_sats(1_000)),
    )
}

fn usd_eur() -> ExchangeRates {
    ExchangeRates::from_codes([
        ("USD", Decimal::from_str("10000").unwrap()),
        ("EUR", Decimal::from_str("8000").unwrap()),
    ])
}

#[tokio::test]
async fn full_send_flow_over_the_bus() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, r#"{"systemInfo":{"preferredCurrency":"USD"}}"#).unwrap();

    let bus = EventBus::default();
    let events = bus.subscribe();
    let (gestures_tx, gestures_rx) = mpsc::channel(16);
    let page = SendPage::new(engine(), JsonFileStore::new(&path), Shell::default(), bus.clone());

    bus.publish(Event::WalletReady);
    bus.publish(Event::StoreReady);
    bus.publish(Event::RateUpdate(usd_eur()));
    bus.publish(Event::PrefillRecipient(BOAT.to_string()));

    for gesture in [
        Gesture::FiatEdited("100".to_string()),
        Gesture::SelectCurrency(FiatCurrency::EUR),
        Gesture::RequestSend,
    ] {
        gestures_tx.send(gesture).await.unwrap();
    }
    drop(gestures_tx);

    let page = page.run(events, gestures_rx).await;

    let state = page.state();
    assert_eq!(state.denomination, "BTC");
    assert_eq!(state.recipient, BOAT);
    assert_eq!(state.amount, "0.01000000");
    // recomputed in the newly selected currency
    assert_eq!(state.fiat_amount, "80.00");
    assert_eq!(state.selected_currency, Some(FiatCurrency::EUR));
    assert_eq!(page.selection(), CurrencySelection::Ready);

    let stored = JsonFileStore::new(&path).get().await.unwrap();
    assert_eq!(
        stored.system_info().preferred_currency,
        Some(FiatCurrency::EUR)
    );

    let confirmations = page.host().confirmations.lock().unwrap().clone();
    assert_eq!(confirmations.len(), 1);
    assert_eq!(confirmations[0].to, BOAT);
    assert_eq!(confirmations[0].amount, "0.01000000");
    assert_eq!(confirmations[0].denomination, "BTC");
    assert_eq!(confirmations[0].fee.to_string(), "0.00010000");
    assert!(page.host().errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn first_currency_on_load_is_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let bus = EventBus::default();
    let mut page = SendPage::new(engine(), JsonFileStore::new(&path), Shell::default(), bus);

    page.handle_gesture(Gesture::SelectCurrency(FiatCurrency::GBP))
        .await
        .unwrap();

    assert_eq!(page.selection(), CurrencySelection::Ready);
    assert!(!path.exists());
}

#[tokio::test]
async fn refused_sends_leave_the_page_usable() {
    let dir = tempfile::tempdir().unwrap();
    let bus = EventBus::default();
    let mut page = SendPage::new(
        engine(),
        JsonFileStore::new(dir.path().join("prefs.json")),
        Shell::default(),
        bus,
    );
    page.handle_event(&Event::PrefillRecipient(BOAT.to_string())).await;

    for (amount, expected) in [
        ("0.000005", "Please enter an amount above 0.00001"),
        ("1", "You don't have enough funds in your wallet."),
        ("lots", "Please enter a valid amount to send."),
    ] {
        page.handle_gesture(Gesture::BaseEdited(amount.to_string()))
            .await
            .ok();
        page.handle_gesture(Gesture::RequestSend).await.unwrap();

        let last = page.host().errors.lock().unwrap().last().cloned().unwrap();
        assert_eq!(last.message, expected);
        assert_eq!(last.title.as_deref(), Some("Uh oh!"));
    }

    page.handle_gesture(Gesture::BaseEdited("0.002".to_string()))
        .await
        .unwrap();
    page.handle_gesture(Gesture::RequestSend).await.unwrap();
    assert_eq!(page.host().confirmations.lock().unwrap().len(), 1);
}
