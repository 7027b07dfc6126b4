//! Risk velocity chart.
//!
//! Layers, back to front: risk velocity heatmap, intervention zone, grid,
//! wager line, phase annotations. The y-axis is logarithmic so ~$15 baseline wagers
//! and ~$2000 crisis wagers share one frame.

use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontDesc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::fonts;
use crate::palette::{self, INK};
use crate::timeline::{SessionTimeline, SESSION_HOURS};

pub const DEFAULT_OUTPUT: &str = "guardian_player.png";

pub const TITLE: &str = "PREDICTIVE PLAYER HARM DETECTION: 24-HOUR BEHAVIORAL RISK VELOCITY";
pub const X_LABEL: &str = "Hours Since Session Start";
pub const Y_LABEL: &str = "Wager Size ($)";

/// Headroom added above the largest wager for the heatmap and y range.
pub const HEATMAP_PADDING: f64 = 2000.0;
const HEATMAP_ALPHA: f64 = 0.3;
const INTERVENTION_ALPHA: f64 = 0.15;
const GRID_ALPHA: f64 = 0.15;
/// Lower bound for the log axis when a wager folds to ~0.
const LOG_FLOOR: f64 = 0.01;

pub const INTERVENTION_START_HOUR: f64 = 18.0;
pub const INTERVENTION_END_HOUR: f64 = 24.0;

/// Chart layers in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Heatmap,
    InterventionZone,
    Grid,
    WagerLine,
    Annotations,
}

/// Back to front. The grid is painted over the translucent fills.
pub const LAYERS: [Layer; 5] = [
    Layer::Heatmap,
    Layer::InterventionZone,
    Layer::Grid,
    Layer::WagerLine,
    Layer::Annotations,
];

/// Fixed phase callouts in chart coordinates (hours, dollars).
pub struct Annotation {
    pub text: &'static str,
    pub at: (f64, f64),
    pub size_pt: f64,
    pub color: RGBColor,
}

pub const ANNOTATIONS: [Annotation; 3] = [
    Annotation {
        text: "BASELINE ACTIVITY",
        at: (2.0, 12.0),
        size_pt: 12.0,
        color: palette::BASELINE_LABEL,
    },
    Annotation {
        text: "RISK ESCALATION",
        at: (12.5, 200.0),
        size_pt: 12.0,
        color: palette::ESCALATION_LABEL,
    },
    Annotation {
        text: "CRITICAL SPIRAL: INTERVENTION REQUIRED",
        at: (15.5, 1800.0),
        size_pt: 15.0,
        color: palette::CRISIS_LABEL,
    },
];

/// Figure geometry. Sizes elsewhere are given in points and scaled by `dpi`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub output_path: PathBuf,
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            width_in: 16.0,
            height_in: 10.0,
            dpi: 300,
        }
    }
}

impl ChartConfig {
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_in * dpi).round().max(1.0) as u32,
            (self.height_in * dpi).round().max(1.0) as u32,
        )
    }

    /// Points to pixels, never below one pixel.
    pub fn px(&self, pt: f64) -> u32 {
        self.font_px(pt).round().max(1.0) as u32
    }

    pub fn font_px(&self, pt: f64) -> f64 {
        pt * self.dpi as f64 / 72.0
    }
}

/// What landed on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartArtifact {
    pub path: String,
    pub width_px: u32,
    pub height_px: u32,
    pub bytes: u64,
    pub sha256: String,
}

/// Y extent shared by the axis and the heatmap: observed wager range plus headroom.
pub fn y_extent(timeline: &SessionTimeline) -> Result<(f64, f64)> {
    let (lo, hi) = timeline
        .wager_range()
        .ok_or_else(|| anyhow!("cannot chart an empty timeline"))?;
    Ok((lo.max(LOG_FLOOR), hi + HEATMAP_PADDING))
}

/// Heatmap cells as `(x_start, x_end, color)`. Slots without a risk velocity
/// are skipped so the background shows through.
pub fn heatmap_cells(timeline: &SessionTimeline) -> Vec<(f64, f64, RGBColor)> {
    let velocity = timeline.risk_velocity();
    let defined: Vec<f64> = velocity.iter().flatten().copied().collect();
    let lo = defined.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = defined.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = SESSION_HOURS / velocity.len().max(1) as f64;

    velocity
        .iter()
        .enumerate()
        .filter_map(|(i, v)| {
            v.map(|v| {
                let x0 = width * i as f64;
                (x0, x0 + width, palette::risk_color(palette::normalize(v, lo, hi)))
            })
        })
        .collect()
}

/// Plain decimal tick text for the log axis.
pub fn plain_tick(value: f64) -> String {
    if value >= 1.0 {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.4}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Bold face at `pt` points. The style must be part of the initial
/// descriptor: restyling a loaded `FontDesc` keeps the regular glyphs.
pub fn bold_font(cfg: &ChartConfig, pt: f64) -> FontDesc<'static> {
    (fonts::FAMILY, cfg.font_px(pt), FontStyle::Bold).into_font()
}

pub fn render_chart(timeline: &SessionTimeline, cfg: &ChartConfig) -> Result<ChartArtifact> {
    fonts::ensure_registered()?;
    let (y_lo, y_hi) = y_extent(timeline)?;
    let (width, height) = cfg.pixel_size();
    let path = cfg.output_path.as_path();

    {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let title_font = bold_font(cfg, 22.0).color(&palette::TITLE);
        let desc_font = (fonts::FAMILY, cfg.font_px(14.0)).into_font().color(&INK);
        let tick_font = (fonts::FAMILY, cfg.font_px(10.0)).into_font().color(&INK);

        let mut chart = ChartBuilder::on(&root)
            .caption(TITLE, title_font)
            .margin(cfg.px(28.0))
            .x_label_area_size(cfg.px(48.0))
            .y_label_area_size(cfg.px(64.0))
            .build_cartesian_2d(0f64..SESSION_HOURS, (y_lo..y_hi).log_scale())?;

        let points: Vec<(f64, f64)> = timeline
            .hours()
            .into_iter()
            .zip(timeline.wagers())
            .map(|(x, w)| (x, w.max(y_lo)))
            .collect();
        let tick_formatter = |v: &f64| plain_tick(*v);

        for layer in LAYERS {
            match layer {
                Layer::Heatmap => {
                    chart.draw_series(heatmap_cells(timeline).into_iter().map(
                        |(x0, x1, color)| {
                            Rectangle::new(
                                [(x0, y_lo), (x1, y_hi)],
                                color.mix(HEATMAP_ALPHA).filled(),
                            )
                        },
                    ))?;
                }
                Layer::InterventionZone => {
                    chart.draw_series(std::iter::once(Rectangle::new(
                        [(INTERVENTION_START_HOUR, y_lo), (INTERVENTION_END_HOUR, y_hi)],
                        palette::INTERVENTION.mix(INTERVENTION_ALPHA).filled(),
                    )))?;
                }
                Layer::Grid => {
                    chart
                        .configure_mesh()
                        .x_desc(X_LABEL)
                        .y_desc(Y_LABEL)
                        .axis_desc_style(desc_font.clone())
                        .label_style(tick_font.clone())
                        .x_labels(13)
                        .y_labels(12)
                        .y_label_formatter(&tick_formatter)
                        .bold_line_style(BLACK.mix(GRID_ALPHA).stroke_width(1))
                        .light_line_style(BLACK.mix(GRID_ALPHA * 0.5).stroke_width(1))
                        .draw()?;
                }
                Layer::WagerLine => {
                    chart.draw_series(LineSeries::new(
                        points.iter().copied(),
                        INK.stroke_width(cfg.px(3.0)),
                    ))?;
                    chart.draw_series(
                        points
                            .iter()
                            .map(|&p| Circle::new(p, cfg.px(4.0), INK.filled())),
                    )?;
                }
                Layer::Annotations => {
                    for note in ANNOTATIONS.iter() {
                        let style = bold_font(cfg, note.size_pt)
                            .color(&note.color)
                            .pos(Pos::new(HPos::Left, VPos::Bottom));
                        chart.draw_series(std::iter::once(Text::new(
                            note.text, note.at, style,
                        )))?;
                    }
                }
            }
        }

        root.present()
            .with_context(|| format!("failed to write chart to {}", path.display()))?;
    }

    let bytes = std::fs::metadata(path)
        .with_context(|| format!("chart missing after write: {}", path.display()))?
        .len();
    Ok(ChartArtifact {
        path: path.display().to_string(),
        width_px: width,
        height_px: height,
        bytes,
        sha256: file_sha256(path)?,
    })
}

pub fn file_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
