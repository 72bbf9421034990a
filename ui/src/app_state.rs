//! Defines the mutable view state mirrored by the send page.

use api::exchange_rates::ExchangeRates;
use api::fiat_currency::FiatCurrency;

/// The fields the send form binds to.
///
/// `amount` and `fiat_amount` hold raw user text; they are only kept in sync in
/// the direction of the last edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub recipient: String,
    /// Coin amount as entered, in display units.
    pub amount: String,
    pub fiat_amount: String,
    pub selected_currency: Option<FiatCurrency>,
    /// Display unit label reported by the wallet, e.g. "BTC".
    pub denomination: String,
    pub exchange_rates: ExchangeRates,
}

impl ViewState {
    /// Empties the recipient and both amount fields.
    pub fn clear_form(&mut self) {
        self.recipient.clear();
        self.amount.clear();
        self.fiat_amount.clear();
    }
}

/// Whether the currency selector has settled after page construction.
///
/// Changes observed while `Uninitialized` come from loading the page and are
/// not written back to the preference store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumIs)]
pub enum CurrencySelection {
    #[default]
    Uninitialized,
    Ready,
}
