use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::fiat_currency::FiatCurrency;

/// Key of the system settings entry inside the preference document.
pub const SYSTEM_INFO_KEY: &str = "systemInfo";

/// Device-level settings, stored under [`SYSTEM_INFO_KEY`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    /// The fiat currency amounts are converted to on the send page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_currency: Option<FiatCurrency>,
}

impl SystemInfo {
    pub fn with_currency(currency: FiatCurrency) -> Self {
        Self {
            preferred_currency: Some(currency),
        }
    }
}

/// The whole preference document, as a JSON object.
///
/// Keys this crate does not know about are carried through untouched, so other
/// parts of the application can share the same document.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefsDocument(Map<String, Value>);

impl PrefsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the system settings, or the defaults when the entry is missing
    /// or malformed.
    pub fn system_info(&self) -> SystemInfo {
        match self.0.get(SYSTEM_INFO_KEY) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                tracing::warn!("ignoring malformed {}: {}", SYSTEM_INFO_KEY, e);
                SystemInfo::default()
            }),
            None => SystemInfo::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Replaces one top-level entry, returning the previous one.
    pub fn set(&mut self, key: &str, value: Value) -> Option<Value> {
        self.0.insert(key.to_string(), value)
    }
}
