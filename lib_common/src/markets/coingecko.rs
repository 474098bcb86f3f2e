//! # CoinGecko Payloads
//!
//! `simple/price?ids=<id>&vs_currencies=usd&include_24hr_change=true` answers
//! with an object keyed by coin id.

use super::readings::SpotPrice;
use super::shape_error;
use crate::retrieve::FetchError;
use serde::Deserialize;
use serde_json::Value;

/// One coin's entry in a simple price response.
#[derive(Debug, Clone, Deserialize)]
pub struct SimplePrice {
    /// Price in USD.
    pub usd: f64,
    /// 24h change in percent.
    pub usd_24h_change: f64,
}

/// Extracts the [`SpotPrice`] of `coin_id` (e.g. `bitcoin`).
pub fn extract_spot(payload: &Value, coin_id: &str) -> Result<SpotPrice, FetchError> {
    let entry = payload
        .get(coin_id)
        .ok_or_else(|| FetchError::Shape(format!("coingecko: no entry for '{coin_id}'")))?;
    let price = SimplePrice::deserialize(entry).map_err(shape_error("coingecko simple price"))?;
    Ok(SpotPrice {
        price: price.usd,
        change_percent_24h: price.usd_24h_change,
    })
}
