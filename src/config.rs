use std::path::PathBuf;

use crate::render::{ChartConfig, DEFAULT_OUTPUT};
use crate::timeline::DEFAULT_SEED;

/// Run settings. Defaults reproduce the fixed demo; every field can be
/// overridden from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub seed: u64,
    pub output_path: PathBuf,
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub show: bool,
    pub csv_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            width_in: 16.0,
            height_in: 10.0,
            dpi: 300,
            show: true,
            csv_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            seed: std::env::var("GUARDIAN_SEED").ok().and_then(|v| v.parse().ok()).unwrap_or(d.seed),
            output_path: std::env::var("GUARDIAN_OUTPUT").map(PathBuf::from).unwrap_or(d.output_path),
            width_in: std::env::var("FIG_WIDTH_IN").ok().and_then(|v| v.parse().ok()).filter(|v: &f64| *v > 0.0).unwrap_or(d.width_in),
            height_in: std::env::var("FIG_HEIGHT_IN").ok().and_then(|v| v.parse().ok()).filter(|v: &f64| *v > 0.0).unwrap_or(d.height_in),
            dpi: std::env::var("FIG_DPI").ok().and_then(|v| v.parse().ok()).filter(|v: &u32| *v > 0).unwrap_or(d.dpi),
            show: std::env::var("GUARDIAN_SHOW").map(|v| parse_flag(&v)).unwrap_or(d.show),
            csv_path: std::env::var("TIMELINE_CSV").ok().filter(|v| !v.is_empty()).map(PathBuf::from),
        }
    }

    pub fn chart(&self) -> ChartConfig {
        ChartConfig {
            output_path: self.output_path.clone(),
            width_in: self.width_in,
            height_in: self.height_in,
            dpi: self.dpi,
        }
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
