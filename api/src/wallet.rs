//! The contract the send page expects from the wallet engine.
//!
//! Key management, coin selection, signing and broadcast all live behind
//! these traits; the page only asks for a transaction to be built and for its
//! fee to be estimated.

use thiserror::Error;

use crate::address::Address;
use crate::amount::Amount;

/// Reasons the wallet engine refuses to build a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The requested output is below the dust threshold.
    #[error("amount is below the dust threshold")]
    DustThreshold,
    /// The spendable balance cannot cover amount plus fee.
    #[error("Not enough funds")]
    InsufficientFunds,
    /// Anything else, carrying the engine's own message.
    #[error("{0}")]
    Other(String),
}

/// A transaction built by the wallet engine but not yet signed or broadcast.
pub trait Transaction {
    /// Identifier used to refresh the transaction history once sent.
    fn txid(&self) -> String;

    /// Estimated network fee, in base units.
    fn estimate_fee(&self) -> Amount;
}

/// The currently open wallet.
pub trait Wallet {
    type Transaction: Transaction;

    /// Display unit label, e.g. "BTC".
    fn denomination(&self) -> &str;

    /// Smallest output value the engine accepts.
    fn dust_threshold(&self) -> Amount;

    /// Builds a transaction paying `amount` to `to`. Pure and in-memory.
    fn create_transaction(
        &self,
        to: &Address,
        amount: Amount,
    ) -> Result<Self::Transaction, WalletError>;
}

/// Gives access to the wallet the user has open, if any.
pub trait WalletEngine {
    type Wallet: Wallet;

    fn current_wallet(&self) -> Option<&Self::Wallet>;
}
