use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;

use crate::data::LoadOptions;

pub const DEFAULT_DATA_FILE: &str = "delivery_data.csv";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Parser)]
#[command(name = "delivery-dashboard")]
#[command(about = "Delivery analytics dashboard")]
pub struct Cli {
    /// Path to the delivery CSV (overrides the config file)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Field delimiter, a single ASCII character
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Load and validate the dataset, print a summary, and exit
    #[arg(long)]
    pub check: bool,
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub delimiter: char,
    /// Rows shown in the preview table before the user moves the slider.
    pub preview_rows: usize,
    pub histogram_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            delimiter: ',',
            preview_rows: 5,
            histogram_bins: 20,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file; absent keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Config file (if any) with command line flags layered on top.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(data) = &cli.data {
            config.data_path = data.clone();
        }
        if let Some(delimiter) = cli.delimiter {
            config.delimiter = delimiter;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        if self.histogram_bins == 0 {
            bail!("histogram_bins must be at least 1");
        }
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter as u8,
            ..LoadOptions::default()
        }
    }
}
