//! Validates the send form and asks the wallet engine for a transaction.

use api::address::Address;
use api::amount::Amount;
use api::amount::ParseAmountError;
use api::wallet::Wallet;
use api::wallet::WalletEngine;
use api::wallet::WalletError;
use num_traits::Zero;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::app_state::ViewState;

/// Why a send request was refused. The `Display` text is shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid address to send to.")]
    InvalidAddress,
    #[error("Please enter a valid amount to send.")]
    InvalidAmount(Option<ParseAmountError>),
    /// `threshold` is in coins, trailing zeros removed.
    #[error("Please enter an amount above {threshold}")]
    BelowDustThreshold { threshold: Decimal },
    #[error("You don't have enough funds in your wallet.")]
    InsufficientFunds,
    /// Any other engine failure, message passed through untouched.
    #[error("{0}")]
    Unknown(String),
}

/// A transaction the wallet engine agreed to build, ready for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent<T> {
    pub to: Address,
    pub amount: Amount,
    pub transaction: T,
}

/// Checks recipient and amount, then builds the transaction.
///
/// Never panics and never returns an engine error as-is: every failure is
/// mapped onto a [`ValidationError`].
pub fn validate<E: WalletEngine>(
    state: &ViewState,
    engine: &E,
) -> Result<TransactionIntent<<E::Wallet as Wallet>::Transaction>, ValidationError> {
    let to = Address::from_base58check(&state.recipient).map_err(|e| {
        tracing::debug!("rejecting recipient {:?}: {}", state.recipient, e);
        ValidationError::InvalidAddress
    })?;

    let amount = Amount::coins_from_str(state.amount.trim())
        .map_err(|e| ValidationError::InvalidAmount(Some(e)))?;
    if amount.is_zero() {
        return Err(ValidationError::InvalidAmount(None));
    }

    let wallet = engine
        .current_wallet()
        .ok_or_else(|| ValidationError::Unknown("The wallet is not loaded yet.".to_string()))?;

    let transaction = wallet
        .create_transaction(&to, amount)
        .map_err(|e| match e {
            WalletError::DustThreshold => ValidationError::BelowDustThreshold {
                threshold: wallet.dust_threshold().to_coins().normalize(),
            },
            WalletError::InsufficientFunds => ValidationError::InsufficientFunds,
            WalletError::Other(message) => ValidationError::Unknown(message),
        })?;

    Ok(TransactionIntent {
        to,
        amount,
        transaction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::testutils::MockEngine;
    use api::testutils::MockWallet;
    use api::wallet::Transaction;

    const BOAT: &str = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT";

    fn form(recipient: &str, amount: &str) -> ViewState {
        ViewState {
            recipient: recipient.to_string(),
            amount: amount.to_string(),
            ..Default::default()
        }
    }

    fn funded_engine() -> MockEngine {
        MockEngine::with_wallet(
            MockWallet::new(Amount::from_sats(100_000_000))
                .with_dust_threshold(Amount::from_sats(1_000)),
        )
    }

    #[test]
    fn valid_form_yields_intent() {
        let engine = funded_engine();
        let intent = validate(&form(BOAT, "0.001"), &engine).unwrap();

        assert_eq!(intent.to.as_str(), BOAT);
        assert_eq!(intent.amount, Amount::from_sats(100_000));
        assert_eq!(intent.transaction.estimate_fee(), Amount::from_sats(10_000));
    }

    #[test]
    fn malformed_addresses_are_invalid() {
        let engine = funded_engine();
        for recipient in ["", "hello", "1BoatSLRHtKNngkdXEeobR76b53LETtpyU", "3J98t1Wp"] {
            let err = validate(&form(recipient, "0.001"), &engine).unwrap_err();
            assert_eq!(err, ValidationError::InvalidAddress);
            assert_eq!(err.to_string(), "Please enter a valid address to send to.");
        }
        // the engine is never asked
        assert_eq!(engine.wallet.as_ref().unwrap().build_count(), 0);
    }

    #[test]
    fn address_is_checked_before_amount() {
        let err = validate(&form("nope", "abc"), &funded_engine()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidAddress);
    }

    #[test]
    fn non_numeric_or_zero_amount_is_invalid() {
        let engine = funded_engine();
        for amount in ["", "abc", "-1", "0.000000001"] {
            let err = validate(&form(BOAT, amount), &engine).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidAmount(_)), "{:?}", amount);
        }
        assert_eq!(
            validate(&form(BOAT, "0"), &engine).unwrap_err(),
            ValidationError::InvalidAmount(None)
        );
    }

    #[test]
    fn dust_message_uses_coin_units() {
        let engine = funded_engine();
        let err = validate(&form(BOAT, "0.00000500"), &engine).unwrap_err();

        assert_eq!(
            err,
            ValidationError::BelowDustThreshold {
                threshold: Decimal::new(1, 5)
            }
        );
        assert_eq!(err.to_string(), "Please enter an amount above 0.00001");
    }

    #[test]
    fn overspending_is_insufficient_funds() {
        let err = validate(&form(BOAT, "1"), &funded_engine()).unwrap_err();
        assert_eq!(err, ValidationError::InsufficientFunds);
        assert_eq!(err.to_string(), "You don't have enough funds in your wallet.");
    }

    #[test]
    fn other_engine_errors_pass_through_verbatim() {
        let engine = MockEngine::with_wallet(
            MockWallet::new(Amount::from_sats(100_000_000)).with_failure("utxo set is locked"),
        );
        let err = validate(&form(BOAT, "0.001"), &engine).unwrap_err();
        assert_eq!(err, ValidationError::Unknown("utxo set is locked".into()));
        assert_eq!(err.to_string(), "utxo set is locked");
    }

    #[test]
    fn missing_wallet_is_unknown() {
        let err = validate(&form(BOAT, "0.001"), &MockEngine::default()).unwrap_err();
        assert!(matches!(err, ValidationError::Unknown(_)));
    }
}
