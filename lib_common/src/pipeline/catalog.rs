//! # Metric Catalog
//!
//! The eight metrics shown on the board, each wired to its sources, extractor
//! and presenter. Adding a metric means adding a card, a field here and one
//! line in the orchestrator.

use super::metric::{Gauge, MetricSpec, Readout, SourceSpec};
use crate::configs::Endpoints;
use crate::markets::readings::{FundingSnapshot, Quote, SentimentIndex, SpotPrice};
use crate::markets::{alternative, binance, cnn, coingecko, yahoo};
use crate::render::CardId;
use crate::retrieve::Route;
use crate::utils::format::{format_change, format_price, format_signed, Countdown, Tone};
use crate::utils::locale::Locale;
use crate::utils::sentiment::SentimentScale;
use chrono::{DateTime, Utc};

/// Every metric of the dashboard.
pub struct Catalog {
    /// Bitcoin spot price.
    pub btc: MetricSpec<SpotPrice>,
    /// Ether spot price.
    pub eth: MetricSpec<SpotPrice>,
    /// Crypto fear & greed.
    pub crypto_sentiment: MetricSpec<SentimentIndex>,
    /// BTC perpetual premium and funding.
    pub funding: MetricSpec<FundingSnapshot>,
    /// NASDAQ composite.
    pub nasdaq: MetricSpec<Quote>,
    /// S&P 500.
    pub sp500: MetricSpec<Quote>,
    /// US dollar index.
    pub dxy: MetricSpec<Quote>,
    /// Equity fear & greed.
    pub stock_sentiment: MetricSpec<SentimentIndex>,
}

impl Catalog {
    /// Builds the catalog against the given endpoints.
    pub fn new(endpoints: &Endpoints) -> Self {
        Self {
            btc: spot_metric("btc", CardId::Btc, &endpoints.btc_ticker, &endpoints.btc_fallback, "bitcoin"),
            eth: spot_metric("eth", CardId::Eth, &endpoints.eth_ticker, &endpoints.eth_fallback, "ethereum"),
            crypto_sentiment: MetricSpec::new(
                "crypto_fear_greed",
                CardId::CryptoFg,
                vec![SourceSpec::new(
                    "alternative.me",
                    &endpoints.crypto_fear_greed,
                    Route::DirectFirst,
                    alternative::extract_sentiment,
                )],
                |s: &SentimentIndex, locale| sentiment_readout(s, SentimentScale::Crypto, locale),
            ),
            funding: MetricSpec::new(
                "btc_premium",
                CardId::Funding,
                vec![SourceSpec::new(
                    "binance-futures",
                    &endpoints.btc_premium,
                    Route::DirectFirst,
                    binance::extract_funding,
                )],
                |f: &FundingSnapshot, locale| funding_readout(f, locale, Utc::now()),
            ),
            nasdaq: quote_metric("nasdaq", CardId::Nasdaq, &endpoints.nasdaq, 2),
            sp500: quote_metric("sp500", CardId::Sp500, &endpoints.sp500, 2),
            dxy: quote_metric("dxy", CardId::Dxy, &endpoints.dxy, 3),
            stock_sentiment: MetricSpec::new(
                "stock_fear_greed",
                CardId::StockFg,
                vec![SourceSpec::new(
                    "cnn",
                    &endpoints.stock_fear_greed,
                    Route::RelayOnly,
                    cnn::fearandgreed::extract_sentiment,
                )],
                |s: &SentimentIndex, locale| sentiment_readout(s, SentimentScale::Equity, locale),
            ),
        }
    }
}

fn spot_metric(
    name: &'static str,
    card: CardId,
    ticker_url: &str,
    fallback_url: &str,
    coin_id: &'static str,
) -> MetricSpec<SpotPrice> {
    MetricSpec::new(
        name,
        card,
        vec![
            SourceSpec::new("binance", ticker_url, Route::DirectFirst, binance::extract_spot),
            SourceSpec::new("coingecko", fallback_url, Route::DirectFirst, move |payload| {
                coingecko::extract_spot(payload, coin_id)
            }),
        ],
        |s: &SpotPrice, _| spot_readout(s),
    )
}

fn quote_metric(name: &'static str, card: CardId, url: &str, decimals: usize) -> MetricSpec<Quote> {
    MetricSpec::new(
        name,
        card,
        vec![SourceSpec::new("yahoo", url, Route::RelayOnly, yahoo::extract_quote)],
        move |q: &Quote, _| quote_readout(q, decimals),
    )
}

/// `$67,012.50` / `24h -1.23%`.
pub fn spot_readout(s: &SpotPrice) -> Readout {
    Readout {
        value: format!("${}", format_price(Some(s.price), 2)),
        value_tone: None,
        detail: format!("24h {}", format_change(Some(s.change_percent_24h))),
        detail_tone: Some(Tone::of(s.change_percent_24h)),
        gauge: None,
    }
}

/// `16,500.00` / `+0.61%`.
pub fn quote_readout(q: &Quote, decimals: usize) -> Readout {
    Readout {
        value: format_price(Some(q.price), decimals),
        value_tone: None,
        detail: format_change(Some(q.change_percent)),
        detail_tone: Some(Tone::of(q.change_percent)),
        gauge: None,
    }
}

/// Score, localized label, bar marker and the scale's card class.
pub fn sentiment_readout(s: &SentimentIndex, scale: SentimentScale, locale: Locale) -> Readout {
    Readout {
        value: s.value.to_string(),
        value_tone: None,
        detail: locale.sentiment_label(s.classification).to_string(),
        detail_tone: None,
        gauge: Some(Gauge {
            position: s.value,
            bucket: scale.classify(s.value),
        }),
    }
}

/// `+0.1000%` / `last 0.0100% · 1h30m`.
pub fn funding_readout(f: &FundingSnapshot, locale: Locale, now: DateTime<Utc>) -> Readout {
    let countdown = Countdown::until(f.next_funding_time, now).label(locale);
    Readout {
        value: format_signed(Some(f.premium_percent), 4, "%"),
        value_tone: Some(Tone::of(f.premium_percent)),
        detail: format!(
            "{} {:.4}% \u{00b7} {}",
            locale.last_funding(),
            f.last_funding_rate_percent,
            countdown
        ),
        detail_tone: Some(Tone::Neutral),
        gauge: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::sentiment::SentimentBucket;
    use chrono::Duration;

    fn funding(next: DateTime<Utc>) -> FundingSnapshot {
        FundingSnapshot::from_prices(50_050.0, 50_000.0, 0.0001, next).unwrap()
    }

    #[test]
    fn funding_countdown_ninety_minutes() {
        let now = Utc::now();
        let r = funding_readout(&funding(now + Duration::minutes(90)), Locale::En, now);
        assert_eq!(r.value, "+0.1000%");
        assert_eq!(r.value_tone, Some(Tone::Up));
        assert_eq!(r.detail, "last 0.0100% · 1h30m");
        assert_eq!(r.detail_tone, Some(Tone::Neutral));
    }

    #[test]
    fn funding_past_deadline_is_settling() {
        let now = Utc::now();
        let r = funding_readout(&funding(now - Duration::minutes(1)), Locale::ZhCn, now);
        assert_eq!(r.detail, "上期 0.0100% · 结算中");
        assert!(!r.detail.contains('-'));
    }

    #[test]
    fn spot_formats_dollars_and_change() {
        let r = spot_readout(&SpotPrice { price: 67012.5, change_percent_24h: -1.234 });
        assert_eq!(r.value, "$67,012.50");
        assert_eq!(r.detail, "24h -1.23%");
        assert_eq!(r.detail_tone, Some(Tone::Down));
    }

    #[test]
    fn dollar_index_uses_three_decimals() {
        let q = Quote::from_closes(104.2567, 104.0).unwrap();
        assert_eq!(quote_readout(&q, 3).value, "104.257");
        assert_eq!(quote_readout(&q, 3).detail, "+0.25%");
    }

    #[test]
    fn sentiment_gauge_uses_scale_bucket() {
        let s = SentimentIndex { value: 45, classification: SentimentBucket::Fear };
        let crypto = sentiment_readout(&s, SentimentScale::Crypto, Locale::En);
        assert_eq!(crypto.value, "45");
        assert_eq!(crypto.detail, "Fear");
        assert_eq!(crypto.gauge, Some(Gauge { position: 45, bucket: SentimentBucket::Neutral }));

        let equity = sentiment_readout(&s, SentimentScale::Equity, Locale::En);
        assert_eq!(equity.gauge.unwrap().bucket, SentimentBucket::Fear);
    }

    #[test]
    fn catalog_routes() {
        let c = Catalog::new(&Endpoints::default());
        assert_eq!(c.btc.sources.len(), 2);
        assert_eq!(c.eth.sources[1].name, "coingecko");
        assert!(c.nasdaq.sources.iter().all(|s| s.route == Route::RelayOnly));
        assert_eq!(c.stock_sentiment.sources[0].route, Route::RelayOnly);
        assert_eq!(c.funding.sources[0].route, Route::DirectFirst);
    }
}
