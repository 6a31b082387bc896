mod app;
mod color;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;

use app::DeliveryDashboardApp;
use delivery_dashboard::config::{Cli, DashboardConfig};
use delivery_dashboard::data::aggregate::{duration_summary, group_mean};
use delivery_dashboard::data::load_file;
use delivery_dashboard::data::schema::{TRAFFIC_DENSITY, WEATHER};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = DashboardConfig::resolve(&cli)?;

    if cli.check {
        return check(&config);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Delivery Analytics",
        options,
        Box::new(move |_cc| Ok(Box::new(DeliveryDashboardApp::new(config)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}

/// Headless validation: load once, log what the dashboard would show.
fn check(config: &DashboardConfig) -> Result<()> {
    let table = load_file(&config.data_path, &config.load_options())
        .with_context(|| format!("validating {}", config.data_path.display()))?;

    let rows: Vec<usize> = (0..table.len()).collect();
    let summary = duration_summary(&table, &rows);
    log::info!(
        "{}: {} records, {} columns, {} without a delivery time",
        config.data_path.display(),
        summary.rows,
        table.columns.len(),
        summary.missing
    );
    if let Some(mean) = summary.mean {
        log::info!("mean delivery time {mean:.2} min");
    }
    for column in [TRAFFIC_DENSITY, WEATHER] {
        for group in group_mean(&table, &rows, column) {
            log::info!(
                "{column} = {}: {:.2} min over {} deliveries",
                group.key,
                group.mean,
                group.count
            );
        }
    }
    Ok(())
}
