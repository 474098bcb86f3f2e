//! # Metric Resolution
//!
//! Every card on the board follows the same life cycle per refresh: clear the
//! previous error, show loading, try each source in order, then either render
//! the reading or render the failure. Failures never leave this routine as
//! anything but a returned [`MetricError`].

use crate::render::{CardId, Renderer};
use crate::retrieve::{FetchError, ResilientClient, Route};
use crate::utils::format::Tone;
use crate::utils::locale::Locale;
use crate::utils::sentiment::SentimentBucket;
use serde_json::Value;
use thiserror::Error;

/// Turns a parsed payload into a reading.
pub type Extractor<R> = Box<dyn Fn(&Value) -> Result<R, FetchError> + Send + Sync>;
/// Turns a reading into board text and styling.
pub type Presenter<R> = Box<dyn Fn(&R, Locale) -> Readout + Send + Sync>;

/// One upstream for a metric.
pub struct SourceSpec<R> {
    /// Short name used in logs.
    pub name: &'static str,
    /// Upstream URL.
    pub url: String,
    /// Direct-then-relay or relay only.
    pub route: Route,
    extract: Extractor<R>,
}

impl<R> SourceSpec<R> {
    /// Describes a source.
    pub fn new(
        name: &'static str,
        url: impl Into<String>,
        route: Route,
        extract: impl Fn(&Value) -> Result<R, FetchError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            url: url.into(),
            route,
            extract: Box::new(extract),
        }
    }

    async fn read(&self, client: &ResilientClient) -> Result<R, FetchError> {
        let payload = client.fetch_json(&self.url, self.route).await?;
        (self.extract)(&payload)
    }
}

/// Sentiment gauge content: bar marker and card class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gauge {
    /// Marker position in percent.
    pub position: u8,
    /// Card styling bucket.
    pub bucket: SentimentBucket,
}

/// What a metric writes to its card.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    /// Main value text.
    pub value: String,
    /// Styling of the main value.
    pub value_tone: Option<Tone>,
    /// Change or info line.
    pub detail: String,
    /// Styling of the detail line.
    pub detail_tone: Option<Tone>,
    /// Sentiment bar and card class.
    pub gauge: Option<Gauge>,
}

/// A metric: its card, sources in priority order and presenter.
pub struct MetricSpec<R> {
    /// Short name used in logs and cycle reports.
    pub name: &'static str,
    /// Card the metric owns.
    pub card: CardId,
    /// Sources, primary first.
    pub sources: Vec<SourceSpec<R>>,
    present: Presenter<R>,
}

impl<R> MetricSpec<R> {
    /// Describes a metric.
    pub fn new(
        name: &'static str,
        card: CardId,
        sources: Vec<SourceSpec<R>>,
        present: impl Fn(&R, Locale) -> Readout + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            card,
            sources,
            present: Box::new(present),
        }
    }

    /// Applies the presenter.
    pub fn present(&self, reading: &R, locale: Locale) -> Readout {
        (self.present)(reading, locale)
    }
}

/// A metric exhausted all of its sources.
#[derive(Debug, Error)]
#[error("{metric}: {attempted} source(s) failed, last error: {source}")]
pub struct MetricError {
    /// Metric name.
    pub metric: &'static str,
    /// Number of sources tried.
    pub attempted: usize,
    /// Error of the last source.
    #[source]
    pub source: FetchError,
}

/// Runs one metric end to end and renders the outcome on its card.
pub async fn resolve_metric<R>(
    client: &ResilientClient,
    renderer: &Renderer,
    locale: Locale,
    spec: &MetricSpec<R>,
) -> Result<(), MetricError> {
    let (value_slot, detail_slot, _) = spec.card.slots();

    renderer.clear_error(spec.card);
    renderer.show_loading(value_slot);
    renderer.show_loading(detail_slot);

    let mut last_error = None;
    for (i, source) in spec.sources.iter().enumerate() {
        match source.read(client).await {
            Ok(reading) => {
                if i > 0 {
                    log::info!("{}: served by fallback source {}", spec.name, source.name);
                }
                render_readout(renderer, spec.card, &spec.present(&reading, locale));
                return Ok(());
            }
            Err(e) => {
                if i + 1 < spec.sources.len() {
                    log::warn!("{}: source {} failed ({}), trying next source", spec.name, source.name, e);
                }
                last_error = Some(e);
            }
        }
    }

    let err = MetricError {
        metric: spec.name,
        attempted: spec.sources.len(),
        source: last_error.unwrap_or_else(|| FetchError::Shape("no sources configured".to_string())),
    };
    log::error!("{}", err);

    renderer.show_error(spec.card, value_slot, locale.load_failed());
    renderer.show_error(spec.card, detail_slot, locale.retry_hint());
    Err(err)
}

fn render_readout(renderer: &Renderer, card: CardId, readout: &Readout) {
    let (value_slot, detail_slot, bar_slot) = card.slots();

    renderer.set_value(value_slot, readout.value.clone());
    if let Some(tone) = readout.value_tone {
        renderer.set_tone(value_slot, tone);
    }

    renderer.set_value(detail_slot, readout.detail.clone());
    if let Some(tone) = readout.detail_tone {
        renderer.set_tone(detail_slot, tone);
    }

    if let Some(gauge) = readout.gauge {
        if let Some(bar) = bar_slot {
            renderer.set_bar(bar, gauge.position);
        }
        renderer.set_sentiment_class(card, gauge.bucket);
    }
}
