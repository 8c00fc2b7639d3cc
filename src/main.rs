mod app;
mod charts;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use app::DashboardApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive student survey dashboard", long_about = None)]
struct Cli {
    /// Survey file to load at startup (.csv, .json or .parquet)
    #[arg(long, env = "SURVEY_DATA", default_value = "data/pollreport.csv")]
    data: PathBuf,

    /// Initial window width in points
    #[arg(long, default_value_t = 1400.0)]
    width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 900.0)]
    height: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let dataset = data::loader::load_file(&cli.data)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", cli.data.display()))
        .with_context(|| format!("loading survey data from {}", cli.data.display()))?;
    log::info!(
        "Loaded {} records from {} ({} careers, {} sectors, ages {:?})",
        dataset.len(),
        cli.data.display(),
        dataset.careers.len(),
        dataset.sectors.len(),
        dataset.age_bounds
    );

    let state = AppState::new(dataset, cli.data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cli.width, cli.height])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Student Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
