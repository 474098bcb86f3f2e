//! # CNN Fear & Greed Index Data Model
//!
//! View of `production.dataviz.cnn.io/index/fearandgreed/graphdata`. Only the
//! headline `fear_and_greed.score` is modelled; the historical series, the
//! indicator sections and every other field are skipped unread, so their
//! shape has no bearing on the extraction.
//!
//! The score is rounded and bucketed with the equity scale (25 / 45 / 55 / 75),
//! independent of CNN's own rating text.

use crate::markets::readings::{score_to_value, SentimentIndex};
use crate::markets::shape_error;
use crate::retrieve::FetchError;
use crate::utils::sentiment::SentimentScale;
use serde::Deserialize;
use serde_json::Value;

/// # Fear and Greed Data
///
/// The top-level structure for the CNN Fear & Greed Index report.
#[derive(Debug, Deserialize, Clone)]
pub struct FearAndGreedData {
    /// The current reading.
    pub fear_and_greed: CurrentStats,
}

/// # Current Statistics
#[derive(Debug, Deserialize, Clone)]
pub struct CurrentStats {
    /// The numerical score, fractional.
    pub score: f64,
}

/// Extracts the equity [`SentimentIndex`] from a graph-data payload.
pub fn extract_sentiment(payload: &Value) -> Result<SentimentIndex, FetchError> {
    let report = FearAndGreedData::deserialize(payload).map_err(shape_error("cnn fear and greed"))?;
    let value = score_to_value(report.fear_and_greed.score)?;
    Ok(SentimentIndex {
        value,
        classification: SentimentScale::Equity.classify(value),
    })
}
