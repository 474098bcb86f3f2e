//! # Live Sources Test
//!
//! Fetches every configured upstream once, following each source's route, and
//! prints what its extractor makes of the payload. Useful when one card keeps
//! failing and it is unclear whether the upstream or the relay is at fault.

use lib_common::configs::DashboardSettings;
use lib_common::markets::{alternative, binance, cnn, coingecko, yahoo};
use lib_common::retrieve::{ResilientClient, Route};
use serde_json::Value;
use std::fmt::Debug;

async fn probe<R: Debug>(
    client: &ResilientClient,
    name: &str,
    url: &str,
    route: Route,
    extract: impl Fn(&Value) -> Result<R, lib_common::retrieve::FetchError>,
) -> bool {
    println!("\n[Test] {} ({:?})", name, route);
    match client.fetch_json(url, route).await.and_then(|payload| extract(&payload)) {
        Ok(reading) => {
            println!("✅ {:?}", reading);
            true
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            false
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = DashboardSettings::default();
    let e = &settings.endpoints;
    let client = ResilientClient::new(settings.proxy_base.clone(), settings.request_timeout);

    println!("--- Starting live source probes ---");

    let results = [
        probe(&client, "binance btc", &e.btc_ticker, Route::DirectFirst, binance::extract_spot).await,
        probe(&client, "coingecko btc", &e.btc_fallback, Route::DirectFirst, |p| coingecko::extract_spot(p, "bitcoin")).await,
        probe(&client, "binance eth", &e.eth_ticker, Route::DirectFirst, binance::extract_spot).await,
        probe(&client, "coingecko eth", &e.eth_fallback, Route::DirectFirst, |p| coingecko::extract_spot(p, "ethereum")).await,
        probe(&client, "alternative.me fng", &e.crypto_fear_greed, Route::DirectFirst, alternative::extract_sentiment).await,
        probe(&client, "binance premium", &e.btc_premium, Route::DirectFirst, binance::extract_funding).await,
        probe(&client, "yahoo nasdaq", &e.nasdaq, Route::RelayOnly, yahoo::extract_quote).await,
        probe(&client, "yahoo sp500", &e.sp500, Route::RelayOnly, yahoo::extract_quote).await,
        probe(&client, "yahoo dxy", &e.dxy, Route::RelayOnly, yahoo::extract_quote).await,
        probe(&client, "cnn fear & greed", &e.stock_fear_greed, Route::RelayOnly, cnn::fearandgreed::extract_sentiment).await,
    ];

    let ok = results.iter().filter(|r| **r).count();
    println!("\n--- {} of {} sources answered ---", ok, results.len());
    Ok(())
}
