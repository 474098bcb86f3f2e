//! # Locale Strings
//!
//! Every user-facing word on the board comes from here. Numbers are always
//! formatted the same way; only labels and messages vary.

use super::sentiment::SentimentBucket;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language of the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    /// English.
    #[default]
    #[serde(rename = "en")]
    En,
    /// Simplified Chinese.
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Locale {
    /// Label for a fear & greed bucket.
    pub fn sentiment_label(&self, bucket: SentimentBucket) -> &'static str {
        use SentimentBucket::*;
        match (self, bucket) {
            (Locale::En, ExtremeFear) => "Extreme Fear",
            (Locale::En, Fear) => "Fear",
            (Locale::En, Neutral) => "Neutral",
            (Locale::En, Greed) => "Greed",
            (Locale::En, ExtremeGreed) => "Extreme Greed",
            (Locale::ZhCn, ExtremeFear) => "极度恐惧",
            (Locale::ZhCn, Fear) => "恐惧",
            (Locale::ZhCn, Neutral) => "中性",
            (Locale::ZhCn, Greed) => "贪婪",
            (Locale::ZhCn, ExtremeGreed) => "极度贪婪",
        }
    }

    /// Message written into a value slot when a metric could not be loaded.
    pub fn load_failed(&self) -> &'static str {
        match self {
            Locale::En => "Load failed",
            Locale::ZhCn => "加载失败",
        }
    }

    /// Hint written next to a failed value.
    pub fn retry_hint(&self) -> &'static str {
        match self {
            Locale::En => "Press Enter to retry",
            Locale::ZhCn => "按回车键刷新重试",
        }
    }

    /// Shown instead of a countdown once funding settlement is due.
    pub fn settling(&self) -> &'static str {
        match self {
            Locale::En => "settling",
            Locale::ZhCn => "结算中",
        }
    }

    /// Prefix of the previous funding rate.
    pub fn last_funding(&self) -> &'static str {
        match self {
            Locale::En => "last",
            Locale::ZhCn => "上期",
        }
    }

    /// Prefix of the last-updated timestamp.
    pub fn updated_at(&self) -> &'static str {
        match self {
            Locale::En => "Updated",
            Locale::ZhCn => "更新于",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::En => "en",
            Locale::ZhCn => "zh-CN",
        })
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "zh" | "zh-cn" => Ok(Locale::ZhCn),
            other => Err(format!("unsupported locale '{other}' (expected 'en' or 'zh-CN')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_locales() {
        assert_eq!("zh-CN".parse::<Locale>(), Ok(Locale::ZhCn));
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn chinese_labels() {
        assert_eq!(Locale::ZhCn.sentiment_label(SentimentBucket::Fear), "恐惧");
        assert_eq!(Locale::ZhCn.settling(), "结算中");
    }
}
