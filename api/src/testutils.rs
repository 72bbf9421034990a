//! In-memory wallet engine for tests.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use crate::address::Address;
use crate::amount::Amount;
use crate::wallet::Transaction;
use crate::wallet::Wallet;
use crate::wallet::WalletEngine;
use crate::wallet::WalletError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTransaction {
    pub txid: String,
    pub to: Address,
    pub amount: Amount,
    pub fee: Amount,
}

impl Transaction for MockTransaction {
    fn txid(&self) -> String {
        self.txid.clone()
    }

    fn estimate_fee(&self) -> Amount {
        self.fee
    }
}

/// A wallet with a fixed spendable balance and a flat fee.
#[derive(Debug)]
pub struct MockWallet {
    pub denomination: String,
    pub dust_threshold: Amount,
    pub balance: Amount,
    pub fee: Amount,
    /// When set, every build fails with `WalletError::Other(message)`.
    pub failure: Option<String>,
    built: AtomicUsize,
}

impl MockWallet {
    pub fn new(balance: Amount) -> Self {
        Self {
            denomination: "BTC".to_string(),
            dust_threshold: Amount::from_sats(546),
            balance,
            fee: Amount::from_sats(10_000),
            failure: None,
            built: AtomicUsize::new(0),
        }
    }

    pub fn with_dust_threshold(mut self, dust_threshold: Amount) -> Self {
        self.dust_threshold = dust_threshold;
        self
    }

    pub fn with_failure(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Number of `create_transaction` calls made so far.
    pub fn build_count(&self) -> usize {
        self.built.load(Ordering::SeqCst)
    }
}

impl Wallet for MockWallet {
    type Transaction = MockTransaction;

    fn denomination(&self) -> &str {
        &self.denomination
    }

    fn dust_threshold(&self) -> Amount {
        self.dust_threshold
    }

    fn create_transaction(
        &self,
        to: &Address,
        amount: Amount,
    ) -> Result<Self::Transaction, WalletError> {
        let n = self.built.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(WalletError::Other(message.clone()));
        }
        if amount <= self.dust_threshold {
            return Err(WalletError::DustThreshold);
        }
        let total = amount.to_sats().checked_add(self.fee.to_sats());
        if total.map_or(true, |total| total > self.balance.to_sats()) {
            return Err(WalletError::InsufficientFunds);
        }

        Ok(MockTransaction {
            txid: format!("mock-tx-{}", n),
            to: to.clone(),
            amount,
            fee: self.fee,
        })
    }
}

/// An engine that may or may not have a wallet open.
#[derive(Debug, Default)]
pub struct MockEngine {
    pub wallet: Option<MockWallet>,
}

impl MockEngine {
    pub fn with_wallet(wallet: MockWallet) -> Self {
        Self {
            wallet: Some(wallet),
        }
    }
}

impl WalletEngine for MockEngine {
    type Wallet = MockWallet;

    fn current_wallet(&self) -> Option<&Self::Wallet> {
        self.wallet.as_ref()
    }
}
