//! # Refresh Orchestrator
//!
//! A refresh cycle launches all eight metrics at once and waits until every
//! one has settled, successfully or not, before stamping the last-updated
//! slot. Cycles are triggered at startup, on each manual request and on a
//! fixed interval. Overlapping cycles are neither queued nor coalesced; when
//! two write the same card the later write wins.

use super::catalog::Catalog;
use super::metric::{resolve_metric, MetricError, MetricSpec};
use crate::configs::DashboardSettings;
use crate::render::{Registry, Renderer, SlotId};
use crate::retrieve::ResilientClient;
use crate::utils::locale::Locale;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// How long the refresh indicator spins after a manual trigger.
pub const SPINNER_DURATION: Duration = Duration::from_millis(800);

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    /// Metrics that rendered a value.
    pub succeeded: Vec<&'static str>,
    /// Metrics that rendered an error.
    pub failed: Vec<&'static str>,
    /// When the last-updated slot was stamped.
    pub finished_at: DateTime<Local>,
}

/// The dashboard core: client, catalog and renderer.
pub struct Dashboard {
    client: ResilientClient,
    renderer: Renderer,
    catalog: Catalog,
    locale: Locale,
    refresh_interval: Duration,
}

impl Dashboard {
    /// Wires the dashboard to an injected registry.
    pub fn new(settings: &DashboardSettings, registry: Arc<Registry>) -> Self {
        Self {
            client: ResilientClient::new(settings.proxy_base.clone(), settings.request_timeout),
            renderer: Renderer::new(registry),
            catalog: Catalog::new(&settings.endpoints),
            locale: settings.locale,
            refresh_interval: settings.refresh_interval,
        }
    }

    /// The renderer (and through it, the registry) this dashboard writes to.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Runs one full cycle. Never fails; per-metric failures are on the board
    /// and in the report.
    pub async fn refresh_all(&self) -> CycleReport {
        let c = &self.catalog;
        let (btc, eth, crypto_fg, funding, nasdaq, sp500, dxy, stock_fg) = tokio::join!(
            self.resolve(&c.btc),
            self.resolve(&c.eth),
            self.resolve(&c.crypto_sentiment),
            self.resolve(&c.funding),
            self.resolve(&c.nasdaq),
            self.resolve(&c.sp500),
            self.resolve(&c.dxy),
            self.resolve(&c.stock_sentiment),
        );

        let outcomes = [
            (c.btc.name, btc),
            (c.eth.name, eth),
            (c.crypto_sentiment.name, crypto_fg),
            (c.funding.name, funding),
            (c.nasdaq.name, nasdaq),
            (c.sp500.name, sp500),
            (c.dxy.name, dxy),
            (c.stock_sentiment.name, stock_fg),
        ];

        let mut report = CycleReport {
            succeeded: Vec::with_capacity(outcomes.len()),
            failed: Vec::new(),
            finished_at: Local::now(),
        };
        for (name, outcome) in outcomes {
            match outcome {
                Ok(()) => report.succeeded.push(name),
                Err(_) => report.failed.push(name),
            }
        }

        self.renderer.set_value(
            SlotId::LastUpdate,
            format!("{} {}", self.locale.updated_at(), report.finished_at.format("%H:%M:%S")),
        );
        log::info!(
            "refresh cycle finished: {} ok, {} failed {:?}",
            report.succeeded.len(),
            report.failed.len(),
            report.failed
        );
        report
    }

    /// Starts a cycle in the background.
    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<CycleReport> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.refresh_all().await })
    }

    /// Manual trigger: spins the indicator briefly and starts a cycle.
    ///
    /// The spinner is cosmetic; a trigger while a cycle is running starts
    /// another cycle.
    pub fn manual_refresh(self: &Arc<Self>) -> JoinHandle<CycleReport> {
        log::debug!("manual refresh requested");
        self.renderer.set_spinning(true);
        let renderer = self.renderer.clone();
        tokio::spawn(async move {
            tokio::time::sleep(SPINNER_DURATION).await;
            renderer.set_spinning(false);
        });
        self.spawn_refresh()
    }

    /// Starts a cycle every refresh interval until `shutdown` fires.
    ///
    /// The first tick is one full interval after the call; the startup cycle
    /// is the caller's.
    pub async fn run_periodic(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = interval_at(Instant::now() + self.refresh_interval, self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    log::info!("periodic refresh stopped");
                    break;
                }
                _ = ticker.tick() => {
                    log::debug!("periodic refresh tick");
                    self.spawn_refresh();
                }
            }
        }
    }

    async fn resolve<R>(&self, spec: &MetricSpec<R>) -> Result<(), MetricError> {
        resolve_metric(&self.client, &self.renderer, self.locale, spec).await
    }
}
