//! # Dashboard Settings
//!
//! Defaults mirror the public endpoints the dashboard was designed around.
//! Every URL can be overridden from a config file; missing keys keep their
//! defaults.

use crate::utils::locale::Locale;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default refresh period.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 60_000;
/// Default per-attempt timeout.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
/// Default CORS relay prefix.
pub const DEFAULT_PROXY_BASE: &str = "https://api.allorigins.win/raw?url=";

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric or text field is out of range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// An endpoint is not an absolute http(s) URL.
    #[error("endpoint {field} is not an absolute http(s) URL: '{url}'")]
    InvalidUrl {
        /// Offending endpoint key.
        field: &'static str,
        /// The value given.
        url: String,
    },
}

/// Upstream URLs, one per source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoints {
    /// Binance 24h ticker for BTCUSDT.
    pub btc_ticker: String,
    /// CoinGecko simple price for bitcoin.
    pub btc_fallback: String,
    /// Binance 24h ticker for ETHUSDT.
    pub eth_ticker: String,
    /// CoinGecko simple price for ethereum.
    pub eth_fallback: String,
    /// alternative.me crypto fear & greed.
    pub crypto_fear_greed: String,
    /// Binance futures premium index for BTCUSDT.
    pub btc_premium: String,
    /// Yahoo chart for the NASDAQ composite.
    pub nasdaq: String,
    /// Yahoo chart for the S&P 500.
    pub sp500: String,
    /// Yahoo chart for the US dollar index.
    pub dxy: String,
    /// CNN fear & greed graph data.
    pub stock_fear_greed: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            btc_ticker: "https://api.binance.com/api/v3/ticker/24hr?symbol=BTCUSDT".into(),
            btc_fallback: "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd&include_24hr_change=true".into(),
            eth_ticker: "https://api.binance.com/api/v3/ticker/24hr?symbol=ETHUSDT".into(),
            eth_fallback: "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd&include_24hr_change=true".into(),
            crypto_fear_greed: "https://api.alternative.me/fng/?limit=1".into(),
            btc_premium: "https://fapi.binance.com/fapi/v1/premiumIndex?symbol=BTCUSDT".into(),
            nasdaq: "https://query1.finance.yahoo.com/v8/finance/chart/%5EIXIC?range=1d&interval=1d".into(),
            sp500: "https://query1.finance.yahoo.com/v8/finance/chart/%5EGSPC?range=1d&interval=1d".into(),
            dxy: "https://query1.finance.yahoo.com/v8/finance/chart/DX-Y.NYB?range=1d&interval=1d".into(),
            stock_fear_greed: "https://production.dataviz.cnn.io/index/fearandgreed/graphdata".into(),
        }
    }
}

impl Endpoints {
    /// Every endpoint with its key.
    pub fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("btcTicker", &self.btc_ticker),
            ("btcFallback", &self.btc_fallback),
            ("ethTicker", &self.eth_ticker),
            ("ethFallback", &self.eth_fallback),
            ("cryptoFearGreed", &self.crypto_fear_greed),
            ("btcPremium", &self.btc_premium),
            ("nasdaq", &self.nasdaq),
            ("sp500", &self.sp500),
            ("dxy", &self.dxy),
            ("stockFearGreed", &self.stock_fear_greed),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in self.entries() {
            let ok = url::Url::parse(url)
                .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
                .unwrap_or(false);
            if !ok {
                return Err(ConfigError::InvalidUrl {
                    field,
                    url: url.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Validated runtime settings. Static once the dashboard has started.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    /// Period of the automatic refresh.
    pub refresh_interval: Duration,
    /// Budget of each request attempt.
    pub request_timeout: Duration,
    /// Relay prefix the url-encoded target is appended to.
    pub proxy_base: String,
    /// Display language.
    pub locale: Locale,
    /// Upstream URLs.
    pub endpoints: Endpoints,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_millis(DEFAULT_REFRESH_INTERVAL_MS),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            proxy_base: DEFAULT_PROXY_BASE.to_string(),
            locale: Locale::default(),
            endpoints: Endpoints::default(),
        }
    }
}

impl DashboardSettings {
    /// Builds settings from raw values, rejecting anything unusable.
    pub fn new(
        refresh_interval_ms: u64,
        request_timeout_ms: u64,
        proxy_base: String,
        locale: Locale,
        endpoints: Endpoints,
    ) -> Result<Self, ConfigError> {
        if refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "refresh_interval_ms",
                reason: "must be greater than zero".into(),
            });
        }
        if request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be greater than zero".into(),
            });
        }
        if !(proxy_base.starts_with("http://") || proxy_base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "proxy_base",
                reason: format!("'{proxy_base}' is not an http(s) prefix"),
            });
        }
        endpoints.validate()?;

        Ok(Self {
            refresh_interval: Duration::from_millis(refresh_interval_ms),
            request_timeout: Duration::from_millis(request_timeout_ms),
            proxy_base,
            locale,
            endpoints,
        })
    }
}
