//! Runtime settings for the send page, read from the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use api::price_providers::PriceProviderKind;

/// Settings the shell needs to assemble a send page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageConfig {
    /// JSON file holding the preference document.
    pub prefs_path: PathBuf,
    pub price_provider: PriceProviderKind,
    /// How often the exchange-rate feed refreshes.
    pub rate_refresh: Duration,
    /// A `tracing` filter directive, e.g. `"info"` or `"ui=debug"`.
    pub log_filter: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            prefs_path: PathBuf::from("prefs.json"),
            price_provider: PriceProviderKind::default(),
            rate_refresh: Duration::from_secs(60),
            log_filter: "info".to_string(),
        }
    }
}

impl PageConfig {
    /// Reads the configuration from environment variables, falling back to
    /// the defaults for anything unset or unparsable.
    ///
    /// # Environment Variables
    /// - `SEND_PREFS_PATH`: path of the preference file.
    /// - `PRICE_PROVIDER`: "coingecko" or "coinpaprika" (case-insensitive).
    /// - `RATE_REFRESH_SECS`: refresh period in seconds, at least 1.
    /// - `SEND_LOG`: log filter directive.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`PageConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let prefs_path = lookup("SEND_PREFS_PATH")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.prefs_path);

        let price_provider = lookup("PRICE_PROVIDER")
            .and_then(|s| PriceProviderKind::from_str(s.trim()).ok())
            .unwrap_or(defaults.price_provider);

        let rate_refresh = lookup("RATE_REFRESH_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs >= 1)
            .map(Duration::from_secs)
            .unwrap_or(defaults.rate_refresh);

        let log_filter = lookup("SEND_LOG")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Self {
            prefs_path,
            price_provider,
            rate_refresh,
            log_filter,
        }
    }
}
