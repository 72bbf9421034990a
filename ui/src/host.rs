//! What the send page needs from the shell hosting it.

use rust_decimal::Decimal;

/// Title used for refused send requests.
pub const VALIDATION_ERROR_TITLE: &str = "Uh oh!";

/// A flash message describing a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorDialog {
    pub title: Option<String>,
    pub message: String,
}

/// Everything the confirmation overlay shows before the user commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendConfirmation {
    pub to: String,
    /// The amount exactly as typed.
    pub amount: String,
    pub denomination: String,
    /// Estimated fee, in coins.
    pub fee: Decimal,
}

/// The shell's error display and confirmation overlay.
///
/// Both calls hand off and return immediately; what the user does in the
/// overlay is the overlay's business, including guarding against a second
/// submission of the same transaction.
pub trait SendPageHost {
    fn show_error(&self, dialog: ErrorDialog);

    fn show_confirmation(&self, confirmation: SendConfirmation);
}
