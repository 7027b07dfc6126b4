//! Generate → export → render → show, the whole demo run.

use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;

use crate::config::Config;
use crate::display;
use crate::logging::{log, obj, v_num, v_str, Domain, Level, ProfileScope};
use crate::render::{render_chart, ChartArtifact};
use crate::timeline::{Phase, SessionTimeline};

#[derive(Debug, Clone)]
pub struct RunReport {
    pub timeline: SessionTimeline,
    pub artifact: ChartArtifact,
    pub csv_path: Option<PathBuf>,
    pub displayed: bool,
}

pub fn run(cfg: &Config) -> Result<RunReport> {
    let timeline = {
        let _scope = ProfileScope::with_context("generate", &[("seed", json!(cfg.seed))]);
        SessionTimeline::generate(cfg.seed)?
    };
    log_timeline(&timeline);

    if let Some(path) = &cfg.csv_path {
        std::fs::write(path, timeline.to_csv())
            .with_context(|| format!("failed to write timeline csv {}", path.display()))?;
        log(
            Level::Info,
            Domain::Data,
            "csv_written",
            obj(&[
                ("path", v_str(&path.display().to_string())),
                ("rows", json!(timeline.len())),
            ]),
        );
    }

    let artifact = {
        let _scope = ProfileScope::new("render");
        render_chart(&timeline, &cfg.chart())?
    };
    log(
        Level::Info,
        Domain::Render,
        "chart_written",
        serde_json::to_value(&artifact)?
            .as_object()
            .cloned()
            .unwrap_or_default(),
    );

    let displayed = cfg.show && show(&artifact);

    Ok(RunReport {
        timeline,
        artifact,
        csv_path: cfg.csv_path.clone(),
        displayed,
    })
}

fn log_timeline(timeline: &SessionTimeline) {
    let phases: serde_json::Map<String, serde_json::Value> = Phase::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), json!(timeline.phase_mean(*p))))
        .collect();
    let (lo, hi) = timeline.wager_range().unwrap_or((0.0, 0.0));
    log(
        Level::Info,
        Domain::Data,
        "timeline_generated",
        obj(&[
            ("seed", json!(timeline.seed())),
            ("rows", json!(timeline.len())),
            ("first_wager", json!(timeline.rows().first().map(|r| r.wager))),
            ("min_wager", v_num(lo)),
            ("max_wager", v_num(hi)),
            ("phase_means", serde_json::Value::Object(phases)),
        ]),
    );
}

/// Viewer trouble is reported, never fatal: headless hosts have no viewer.
fn show(artifact: &ChartArtifact) -> bool {
    match display::open_in_viewer(std::path::Path::new(&artifact.path)) {
        Ok(()) => true,
        Err(err) => {
            log(
                Level::Warn,
                Domain::System,
                "viewer_unavailable",
                obj(&[
                    ("msg", v_str(&format!("{:#}", err))),
                    ("path", v_str(&artifact.path)),
                ]),
            );
            false
        }
    }
}
