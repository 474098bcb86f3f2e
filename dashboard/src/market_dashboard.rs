use anyhow::Result;
use lib_common::pipeline::Dashboard;
use lib_common::render::Registry;
use std::sync::Arc;
use tokio::signal;

mod dashboard_logic;
use dashboard_logic::{config, input, logger, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = config::load_config()?;
    logger::setup_logging(&config.log_dir(), config.log_level(), config.once)?;
    let settings = config.settings()?;
    log::info!(
        "Starting market dashboard (refresh every {:?}, timeout {:?}, locale {}).",
        settings.refresh_interval,
        settings.request_timeout,
        settings.locale
    );

    let registry = Arc::new(Registry::standard());
    let dashboard = Arc::new(Dashboard::new(&settings, Arc::clone(&registry)));

    if config.once {
        let report = dashboard.refresh_all().await;
        let snapshot = registry.snapshot();
        if config.json {
            let out = serde_json::json!({ "cycle": report, "board": snapshot });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            print!("{}", terminal::render_board(&snapshot, settings.locale));
        }
        return Ok(());
    }

    let (shutdown_tx, _) = tokio::sync::broadcast::channel(1);
    let mut quit_rx = shutdown_tx.subscribe();

    let surface_handle = tokio::spawn(terminal::run(
        Arc::clone(&registry),
        settings.locale,
        shutdown_tx.subscribe(),
    ));
    let input_handle = tokio::spawn(input::run(Arc::clone(&dashboard), shutdown_tx.clone()));
    let schedule_handle = tokio::spawn(Arc::clone(&dashboard).run_periodic(shutdown_tx.subscribe()));

    // Startup cycle
    dashboard.spawn_refresh();

    tokio::select! {
        _ = signal::ctrl_c() => {
            log::info!("Ctrl-C received, initiating shutdown.");
        }
        _ = terminate() => {
            log::info!("SIGTERM received, initiating shutdown.");
        }
        _ = quit_rx.recv() => {}
    }

    let _ = shutdown_tx.send(());
    let _ = tokio::join!(surface_handle, input_handle, schedule_handle);

    log::info!("Shutdown complete.");
    Ok(())
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut term_signal) => {
            term_signal.recv().await;
        }
        Err(e) => {
            log::warn!("Cannot listen for SIGTERM: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
