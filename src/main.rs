//! BTC Dashboard - Main Application Entry Point

use std::error::Error;
use std::sync::Arc;

use eframe::egui;
use tracing::{error, info};

use btc_dashboard::config::DashboardConfig;
use btc_dashboard::gateway::BinanceDatafeed;
use btc_dashboard::logger::init_logger;
use btc_dashboard::market::MarketDataFeed;
use btc_dashboard::DashboardApp;

/// Create native window options
fn create_native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("BTC Dashboard")
            .with_inner_size([1280.0, 960.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Create tokio runtime
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let (config, config_error) = match DashboardConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (DashboardConfig::default(), Some(e)),
    };
    init_logger(&config.log_level)?;
    if let Some(e) = config_error {
        error!("{}, using defaults", e);
    }

    info!("Starting BTC Dashboard...");
    info!("Version: {}", btc_dashboard::VERSION);
    info!("Rust version: {}", rustc_version_runtime::version());
    info!("Symbol: {}, host: {}", config.symbol, config.rest_host);

    let feed: Arc<dyn MarketDataFeed> = Arc::new(BinanceDatafeed::from_config(&config)?);
    let handle = runtime.handle().clone();

    eframe::run_native(
        "BTC Dashboard",
        create_native_options(),
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, feed, &config, handle)))),
    )
    .map_err(|e| format!("Failed to run application: {}", e))?;

    Ok(())
}
