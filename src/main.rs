//! Benchplot - renders benchmark CSV results as a line chart.
//!
//! Reads `output.csv` from the working directory, picks a chart layout
//! (`chart.json` if present, otherwise the preset matching the header),
//! writes `output.png` and opens it in the system image viewer.

use anyhow::{Context, Result};
use benchplot::charts::ChartRenderer;
use benchplot::config::{ChartConfig, ConfigError, Preset};
use benchplot::data::Dataset;
use log::{info, warn};
use std::path::Path;

const INPUT_PATH: &str = "output.csv";
const OUTPUT_PATH: &str = "output.png";
const CONFIG_PATH: &str = "chart.json";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dataset = Dataset::load_csv(INPUT_PATH).context("loading benchmark results")?;
    info!(
        "Loaded {} rows from {}\n{}",
        dataset.row_count(),
        INPUT_PATH,
        dataset
    );

    let config = select_config(&dataset)?;
    let figure = ChartRenderer::render(&dataset, &config).context("rendering chart")?;

    // Interactive display is best effort, the chart is already on disk
    if let Err(e) = open::that(&figure.output_path) {
        warn!(
            "Could not open {} in an image viewer: {e}",
            figure.output_path.display()
        );
    }

    Ok(())
}

fn select_config(dataset: &Dataset) -> Result<ChartConfig> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        info!("Using chart configuration from {}", CONFIG_PATH);
        return Ok(ChartConfig::from_json_file(config_path)?);
    }

    let columns = dataset.columns();
    let preset = Preset::detect(&columns).ok_or(ConfigError::NoMatchingPreset { columns })?;
    info!("Using '{}' chart preset", preset.name());
    Ok(preset.config(OUTPUT_PATH))
}
