//! Base58-check encoded payment addresses.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Length of the hash carried by a legacy address.
pub const HASH_LEN: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,
    /// Bad alphabet or checksum mismatch.
    #[error("not a base58-check string: {0}")]
    Decode(String),
    #[error("decoded payload has {0} bytes, expected {expected}", expected = HASH_LEN + 1)]
    Length(usize),
}

/// A decoded legacy address: one version byte followed by a 20-byte hash.
///
/// The original text is kept so the address can be handed back to the wallet
/// engine and shown to the user exactly as it was entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    encoded: String,
    version: u8,
    hash: [u8; HASH_LEN],
}

impl Address {
    /// Decodes a base58-check string, verifying its double-SHA256 checksum.
    ///
    /// # Example
    /// ```
    /// use api::address::Address;
    /// let address = Address::from_base58check("1BoatSLRHtKNngkdXEeobR76b53LETtpyT").unwrap();
    /// assert_eq!(address.version(), 0);
    /// ```
    pub fn from_base58check(s: &str) -> Result<Self, AddressError> {
        if s.is_empty() {
            return Err(AddressError::Empty);
        }

        let payload = bs58::decode(s)
            .with_check(None)
            .into_vec()
            .map_err(|e| AddressError::Decode(e.to_string()))?;

        let (version, hash) = match payload.split_first() {
            Some((version, hash)) if hash.len() == HASH_LEN => (*version, hash),
            _ => return Err(AddressError::Length(payload.len())),
        };

        let mut bytes = [0u8; HASH_LEN];
        bytes.copy_from_slice(hash);

        Ok(Self {
            encoded: s.to_string(),
            version,
            hash: bytes,
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn hash(&self) -> &[u8; HASH_LEN] {
        &self.hash
    }

    /// The address as originally entered.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58check(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}
