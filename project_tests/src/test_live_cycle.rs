//! # Live Refresh Cycle Test
//!
//! Runs one refresh cycle against the real upstreams through lib_common and
//! prints the cycle report and the resulting board.

use lib_common::configs::DashboardSettings;
use lib_common::pipeline::Dashboard;
use lib_common::render::Registry;
use std::sync::Arc;

/// Executes one live cycle.
///
/// // Statement: Exits with status 1 only when every metric failed.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // // Statement: Default endpoints, relay and timeout
    let settings = DashboardSettings::default();
    let registry = Arc::new(Registry::standard());
    let dashboard = Dashboard::new(&settings, Arc::clone(&registry));

    println!("[*] Running one live refresh cycle...");
    let report = dashboard.refresh_all().await;

    println!("\n[REPORT]");
    println!("-----------------------------------------------");
    println!("{}", serde_json::to_string_pretty(&report)?);
    println!("-----------------------------------------------");

    println!("\n[BOARD]");
    println!("{}", serde_json::to_string_pretty(&registry.snapshot())?);

    if report.succeeded.is_empty() {
        eprintln!("\n[ERROR] Every metric failed; check connectivity and the relay.");
        std::process::exit(1);
    }

    println!("\n[SUCCESS] {} of {} metrics loaded.", report.succeeded.len(), report.succeeded.len() + report.failed.len());
    Ok(())
}
