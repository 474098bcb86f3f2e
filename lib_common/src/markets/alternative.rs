//! # alternative.me Crypto Fear & Greed
//!
//! `https://api.alternative.me/fng/?limit=1` returns the latest reading as the
//! first element of `data`, with the score as a decimal string.

use super::readings::{score_to_value, SentimentIndex};
use super::shape_error;
use crate::retrieve::FetchError;
use crate::utils::sentiment::{SentimentBucket, SentimentScale};
use serde::Deserialize;
use serde_json::Value;

/// Top-level response.
#[derive(Debug, Clone, Deserialize)]
pub struct FngResponse {
    /// Readings, newest first.
    pub data: Vec<FngEntry>,
}

/// One reading.
#[derive(Debug, Clone, Deserialize)]
pub struct FngEntry {
    /// Score 0..=100, sent as a string.
    pub value: String,
    /// Upstream label, e.g. `Extreme Fear`.
    #[serde(default)]
    pub value_classification: String,
}

/// Extracts the latest crypto [`SentimentIndex`].
///
/// The label follows the upstream classification when it is recognized and the
/// crypto thresholds otherwise.
pub fn extract_sentiment(payload: &Value) -> Result<SentimentIndex, FetchError> {
    let response = FngResponse::deserialize(payload).map_err(shape_error("alternative.me fng"))?;
    let entry = response
        .data
        .first()
        .ok_or_else(|| FetchError::Shape("alternative.me fng: empty data".to_string()))?;

    let score = entry
        .value
        .trim()
        .parse::<f64>()
        .map_err(|e| FetchError::Shape(format!("alternative.me fng: invalid value '{}': {e}", entry.value)))?;
    let value = score_to_value(score)?;

    let classification = SentimentBucket::from_label(&entry.value_classification)
        .unwrap_or_else(|| SentimentScale::Crypto.classify(value));

    Ok(SentimentIndex { value, classification })
}
