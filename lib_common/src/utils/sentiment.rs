//! # Fear & Greed Buckets
//!
//! Both sentiment indices on the board are 0..=100 scores split into five
//! buckets. The crypto and equity indices use different cut points; every cut
//! point is inclusive to the lower bucket.

use serde::{Deserialize, Serialize};

/// One of the five fear & greed classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentimentBucket {
    /// Extreme fear.
    ExtremeFear,
    /// Fear.
    Fear,
    /// Neutral.
    Neutral,
    /// Greed.
    Greed,
    /// Extreme greed.
    ExtremeGreed,
}

impl SentimentBucket {
    /// Style class placed on a sentiment card, e.g. `fg-extreme-fear`.
    pub fn class_name(&self) -> &'static str {
        match self {
            SentimentBucket::ExtremeFear => "fg-extreme-fear",
            SentimentBucket::Fear => "fg-fear",
            SentimentBucket::Neutral => "fg-neutral",
            SentimentBucket::Greed => "fg-greed",
            SentimentBucket::ExtremeGreed => "fg-extreme-greed",
        }
    }

    /// Parses an upstream classification such as `"Extreme Fear"`.
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "extreme fear" => Some(SentimentBucket::ExtremeFear),
            "fear" => Some(SentimentBucket::Fear),
            "neutral" => Some(SentimentBucket::Neutral),
            "greed" => Some(SentimentBucket::Greed),
            "extreme greed" => Some(SentimentBucket::ExtremeGreed),
            _ => None,
        }
    }
}

/// Threshold set used to classify a 0..=100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentScale {
    /// Crypto index: 20 / 40 / 60 / 80.
    Crypto,
    /// Equity index: 25 / 45 / 55 / 75.
    Equity,
}

impl SentimentScale {
    /// Upper bounds (inclusive) of the first four buckets.
    pub fn thresholds(&self) -> [u8; 4] {
        match self {
            SentimentScale::Crypto => [20, 40, 60, 80],
            SentimentScale::Equity => [25, 45, 55, 75],
        }
    }

    /// Classifies a score.
    pub fn classify(&self, value: u8) -> SentimentBucket {
        let [extreme_fear, fear, neutral, greed] = self.thresholds();
        if value <= extreme_fear {
            SentimentBucket::ExtremeFear
        } else if value <= fear {
            SentimentBucket::Fear
        } else if value <= neutral {
            SentimentBucket::Neutral
        } else if value <= greed {
            SentimentBucket::Greed
        } else {
            SentimentBucket::ExtremeGreed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SentimentBucket::*;

    #[test]
    fn crypto_fear_range() {
        for v in 21..=40 {
            assert_eq!(SentimentScale::Crypto.classify(v), Fear, "value {v}");
        }
    }

    #[test]
    fn crypto_boundaries_fall_to_lower_bucket() {
        let s = SentimentScale::Crypto;
        assert_eq!(s.classify(0), ExtremeFear);
        assert_eq!(s.classify(20), ExtremeFear);
        assert_eq!(s.classify(40), Fear);
        assert_eq!(s.classify(60), Neutral);
        assert_eq!(s.classify(80), Greed);
        assert_eq!(s.classify(81), ExtremeGreed);
        assert_eq!(s.classify(100), ExtremeGreed);
    }

    #[test]
    fn equity_boundaries_fall_to_lower_bucket() {
        let s = SentimentScale::Equity;
        assert_eq!(s.classify(25), ExtremeFear);
        assert_eq!(s.classify(26), Fear);
        assert_eq!(s.classify(45), Fear);
        assert_eq!(s.classify(55), Neutral);
        assert_eq!(s.classify(56), Greed);
        assert_eq!(s.classify(75), Greed);
        assert_eq!(s.classify(76), ExtremeGreed);
    }

    #[test]
    fn scales_disagree_between_cut_points() {
        assert_eq!(SentimentScale::Crypto.classify(22), Fear);
        assert_eq!(SentimentScale::Equity.classify(22), ExtremeFear);
        assert_eq!(SentimentScale::Crypto.classify(58), Neutral);
        assert_eq!(SentimentScale::Equity.classify(58), Greed);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(SentimentBucket::from_label("Extreme Greed"), Some(ExtremeGreed));
        assert_eq!(SentimentBucket::from_label(" fear "), Some(Fear));
        assert_eq!(SentimentBucket::from_label("panic"), None);
        assert_eq!(ExtremeFear.class_name(), "fg-extreme-fear");
    }
}
