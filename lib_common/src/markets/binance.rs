//! # Binance Payloads
//!
//! Spot 24h ticker (`/api/v3/ticker/24hr`) and USDⓈ-M futures premium index
//! (`/fapi/v1/premiumIndex`). Binance sends decimals as strings.

use super::de::{deserialize_ms_to_utc, f64_from_str_or_number};
use super::readings::{FundingSnapshot, SpotPrice};
use super::shape_error;
use crate::retrieve::FetchError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Subset of the 24h rolling ticker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    /// Last traded price.
    #[serde(deserialize_with = "f64_from_str_or_number")]
    pub last_price: f64,
    /// 24h change in percent.
    #[serde(deserialize_with = "f64_from_str_or_number")]
    pub price_change_percent: f64,
}

/// Subset of the premium index response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumIndex {
    /// Mark price.
    #[serde(deserialize_with = "f64_from_str_or_number")]
    pub mark_price: f64,
    /// Spot index price.
    #[serde(deserialize_with = "f64_from_str_or_number")]
    pub index_price: f64,
    /// Last funding rate as a fraction (0.0001 is 0.01%).
    #[serde(deserialize_with = "f64_from_str_or_number")]
    pub last_funding_rate: f64,
    /// Next settlement, sent as epoch milliseconds.
    #[serde(deserialize_with = "deserialize_ms_to_utc")]
    pub next_funding_time: DateTime<Utc>,
}

/// Extracts a [`SpotPrice`] from a 24h ticker payload.
pub fn extract_spot(payload: &Value) -> Result<SpotPrice, FetchError> {
    let ticker = Ticker24h::deserialize(payload).map_err(shape_error("binance ticker"))?;
    Ok(SpotPrice {
        price: ticker.last_price,
        change_percent_24h: ticker.price_change_percent,
    })
}

/// Extracts a [`FundingSnapshot`] from a premium index payload.
pub fn extract_funding(payload: &Value) -> Result<FundingSnapshot, FetchError> {
    let p = PremiumIndex::deserialize(payload).map_err(shape_error("binance premium index"))?;
    FundingSnapshot::from_prices(p.mark_price, p.index_price, p.last_funding_rate, p.next_funding_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ticker_strings_parse() {
        let payload = json!({
            "symbol": "BTCUSDT",
            "lastPrice": "67012.50000000",
            "priceChangePercent": "-1.234",
            "volume": "12345.6"
        });
        let spot = extract_spot(&payload).unwrap();
        assert_eq!(spot.price, 67012.5);
        assert_eq!(spot.change_percent_24h, -1.234);
    }

    #[test]
    fn ticker_ignores_fields_it_does_not_read() {
        let payload = json!({"symbol": null, "lastPrice": "1.5", "priceChangePercent": "0"});
        assert_eq!(extract_spot(&payload).unwrap().price, 1.5);
    }

    #[test]
    fn ticker_missing_field_is_shape_error() {
        let err = extract_spot(&json!({"symbol": "BTCUSDT"})).unwrap_err();
        assert!(matches!(err, FetchError::Shape(_)));
    }

    #[test]
    fn premium_index_derives_premium() {
        let payload = json!({
            "symbol": "BTCUSDT",
            "markPrice": "50050.0",
            "indexPrice": "50000.0",
            "lastFundingRate": "0.00010000",
            "nextFundingTime": 1_700_003_600_000_i64,
            "time": 1_700_000_000_000_i64
        });
        let f = extract_funding(&payload).unwrap();
        assert!((f.premium_percent - 0.1).abs() < 1e-9);
        assert!((f.last_funding_rate_percent - 0.01).abs() < 1e-12);
        assert_eq!(f.next_funding_time.timestamp_millis(), 1_700_003_600_000);
    }

    #[test]
    fn premium_index_rejects_bad_decimal() {
        let payload = json!({
            "markPrice": "abc",
            "indexPrice": "50000.0",
            "lastFundingRate": "0.0001",
            "nextFundingTime": 0
        });
        assert!(matches!(extract_funding(&payload), Err(FetchError::Shape(_))));
    }
}
