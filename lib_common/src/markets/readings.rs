//! # Normalized Readings
//!
//! The per-cycle values each metric produces once its payload has been
//! extracted. They are recomputed from scratch on every refresh and never
//! stored.

use crate::retrieve::FetchError;
use crate::utils::sentiment::SentimentBucket;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Last traded price and its 24h percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpotPrice {
    /// Last price in USD.
    pub price: f64,
    /// Change over the trailing 24 hours, in percent.
    pub change_percent_24h: f64,
}

/// Index or currency quote relative to the previous close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    /// Current price.
    pub price: f64,
    /// Previous session close.
    pub previous_close: f64,
    /// `price - previous_close`.
    pub change: f64,
    /// `change / previous_close * 100`.
    pub change_percent: f64,
}

impl Quote {
    /// Derives change fields. A zero or non-finite previous close is rejected.
    pub fn from_closes(price: f64, previous_close: f64) -> Result<Self, FetchError> {
        if !price.is_finite() || !previous_close.is_finite() || previous_close == 0.0 {
            return Err(FetchError::Shape(format!(
                "cannot derive change from price {price} and previous close {previous_close}"
            )));
        }
        let change = price - previous_close;
        Ok(Self {
            price,
            previous_close,
            change,
            change_percent: change / previous_close * 100.0,
        })
    }
}

/// A 0..=100 fear & greed reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentIndex {
    /// Integer score.
    pub value: u8,
    /// Bucket used for the label.
    pub classification: SentimentBucket,
}

/// Perpetual futures premium and funding state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FundingSnapshot {
    /// Mark price.
    pub mark_price: f64,
    /// Spot index price.
    pub index_price: f64,
    /// `(mark - index) / index * 100`.
    pub premium_percent: f64,
    /// Last settled funding rate, in percent.
    pub last_funding_rate_percent: f64,
    /// Next settlement instant.
    pub next_funding_time: DateTime<Utc>,
}

impl FundingSnapshot {
    /// Derives the premium and converts the raw funding rate to percent.
    pub fn from_prices(
        mark_price: f64,
        index_price: f64,
        last_funding_rate: f64,
        next_funding_time: DateTime<Utc>,
    ) -> Result<Self, FetchError> {
        if !index_price.is_finite() || index_price == 0.0 {
            return Err(FetchError::Shape(format!("invalid index price {index_price}")));
        }
        Ok(Self {
            mark_price,
            index_price,
            premium_percent: (mark_price - index_price) / index_price * 100.0,
            last_funding_rate_percent: last_funding_rate * 100.0,
            next_funding_time,
        })
    }
}

/// Converts a fractional score into the integer 0..=100 shown on the board.
pub(crate) fn score_to_value(score: f64) -> Result<u8, FetchError> {
    if !score.is_finite() || !(0.0..=100.0).contains(&score.round()) {
        return Err(FetchError::Shape(format!("sentiment score {score} outside 0..=100")));
    }
    Ok(score.round() as u8)
}
