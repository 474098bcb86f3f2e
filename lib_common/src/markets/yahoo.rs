//! # Yahoo Finance Chart Quotes
//!
//! `v8/finance/chart/<symbol>?range=1d&interval=1d` carries the current price
//! and previous close in `chart.result[0].meta`. Yahoo rejects browser-origin
//! requests, so these sources are always fetched through the relay.

use super::readings::Quote;
use super::shape_error;
use crate::retrieve::FetchError;
use serde::Deserialize;
use serde_json::Value;

/// Top-level response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    /// Chart envelope.
    pub chart: Chart,
}

/// Chart envelope: either results or an error object.
#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    /// Results, one per requested symbol.
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    /// Upstream error, if any.
    #[serde(default)]
    pub error: Option<Value>,
}

/// One symbol's chart.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    /// Quote metadata.
    pub meta: ChartMeta,
}

/// The fields of `meta` the board uses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    /// Current price.
    pub regular_market_price: Option<f64>,
    /// Close before the charted range.
    #[serde(default)]
    pub chart_previous_close: Option<f64>,
    /// Previous session close.
    #[serde(default)]
    pub previous_close: Option<f64>,
}

impl ChartMeta {
    /// `chartPreviousClose`, or `previousClose` when the former is absent or zero.
    pub fn effective_previous_close(&self) -> Option<f64> {
        self.chart_previous_close
            .filter(|v| *v != 0.0)
            .or(self.previous_close.filter(|v| *v != 0.0))
    }
}

/// Extracts a [`Quote`] from a chart payload.
pub fn extract_quote(payload: &Value) -> Result<Quote, FetchError> {
    let response = ChartResponse::deserialize(payload).map_err(shape_error("yahoo chart"))?;

    let meta = response
        .chart
        .result
        .as_ref()
        .and_then(|r| r.first())
        .map(|r| &r.meta)
        .ok_or_else(|| match &response.chart.error {
            Some(err) if !err.is_null() => FetchError::Shape(format!("yahoo chart error: {err}")),
            _ => FetchError::Shape("yahoo chart: empty result".to_string()),
        })?;

    let price = meta
        .regular_market_price
        .ok_or_else(|| FetchError::Shape("yahoo chart: missing regularMarketPrice".to_string()))?;
    let previous_close = meta
        .effective_previous_close()
        .ok_or_else(|| FetchError::Shape("yahoo chart: missing previous close".to_string()))?;

    Quote::from_closes(price, previous_close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart(meta: Value) -> Value {
        json!({"chart": {"result": [{"meta": meta, "timestamp": [], "indicators": {}}], "error": null}})
    }

    #[test]
    fn uses_chart_previous_close() {
        let q = extract_quote(&chart(json!({
            "symbol": "^IXIC",
            "regularMarketPrice": 16500.0,
            "chartPreviousClose": 16000.0,
            "previousClose": 1.0
        })))
        .unwrap();
        assert_eq!(q.previous_close, 16000.0);
        assert_eq!(q.change, 500.0);
        assert!((q.change_percent - 3.125).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_previous_close() {
        let q = extract_quote(&chart(json!({
            "regularMarketPrice": 104.2,
            "previousClose": 104.0
        })))
        .unwrap();
        assert_eq!(q.previous_close, 104.0);
    }

    #[test]
    fn missing_closes_is_shape_error() {
        let err = extract_quote(&chart(json!({"regularMarketPrice": 1.0}))).unwrap_err();
        assert!(matches!(err, FetchError::Shape(_)));
    }

    #[test]
    fn upstream_error_is_reported() {
        let payload = json!({"chart": {"result": null, "error": {"code": "Not Found"}}});
        let err = extract_quote(&payload).unwrap_err();
        assert!(err.to_string().contains("Not Found"));
    }
}
