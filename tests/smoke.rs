//! Smoke tests: the full demo run produces a real chart on disk.

use std::fs;
use std::path::Path;

use guardian::config::Config;
use guardian::pipeline::run;
use guardian::render::{file_sha256, DEFAULT_OUTPUT};
use guardian::timeline::{SessionTimeline, SESSION_LEN};
use tempfile::TempDir;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Small figure so the suite stays quick; geometry otherwise matches the demo.
fn test_config(dir: &Path) -> Config {
    Config {
        output_path: dir.join(DEFAULT_OUTPUT),
        width_in: 8.0,
        height_in: 5.0,
        dpi: 60,
        show: false,
        ..Config::default()
    }
}

// ---------------------------------------------------------------------------
// S01: Seed 42 run writes a non-empty PNG at the fixed filename
// ---------------------------------------------------------------------------
#[test]
fn s01_run_writes_png() {
    let dir = TempDir::new().unwrap();
    let cfg = test_config(dir.path());
    let report = run(&cfg).expect("pipeline run");

    assert_eq!(report.timeline.len(), SESSION_LEN);
    assert_eq!(report.timeline.seed(), 42);
    assert!(!report.displayed);

    let path = dir.path().join("guardian_player.png");
    let bytes = fs::read(&path).unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[..8], &PNG_MAGIC);
    assert_eq!(report.artifact.bytes, bytes.len() as u64);
    assert_eq!(report.artifact.path, path.display().to_string());
    assert_eq!((report.artifact.width_px, report.artifact.height_px), (480, 300));
}

// ---------------------------------------------------------------------------
// S02: First wager is a pure function of the seed
// ---------------------------------------------------------------------------
#[test]
fn s02_first_wager_deterministic() {
    let dir = TempDir::new().unwrap();
    let report = run(&test_config(dir.path())).unwrap();
    let fresh = SessionTimeline::generate(42).unwrap();
    assert_eq!(report.timeline.rows()[0].wager, fresh.rows()[0].wager);
    assert_eq!(report.timeline, fresh);
}

// ---------------------------------------------------------------------------
// S03: Re-running overwrites the chart with identical bytes
// ---------------------------------------------------------------------------
#[test]
fn s03_rerun_is_bit_identical() {
    let dir = TempDir::new().unwrap();
    let cfg = test_config(dir.path());

    let first = run(&cfg).unwrap();
    let first_bytes = fs::read(&cfg.output_path).unwrap();
    let second = run(&cfg).unwrap();
    let second_bytes = fs::read(&cfg.output_path).unwrap();

    assert_eq!(first.artifact.sha256, second.artifact.sha256);
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(file_sha256(&cfg.output_path).unwrap(), second.artifact.sha256);
}

// ---------------------------------------------------------------------------
// S04: Existing file at the output path is replaced
// ---------------------------------------------------------------------------
#[test]
fn s04_output_overwritten_unconditionally() {
    let dir = TempDir::new().unwrap();
    let cfg = test_config(dir.path());
    fs::write(&cfg.output_path, b"stale").unwrap();

    run(&cfg).unwrap();
    let bytes = fs::read(&cfg.output_path).unwrap();
    assert_eq!(&bytes[..8], &PNG_MAGIC);
}

// ---------------------------------------------------------------------------
// S05: Different seeds draw different charts
// ---------------------------------------------------------------------------
#[test]
fn s05_seed_changes_chart() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let a = run(&test_config(dir_a.path())).unwrap();
    let b = run(&Config {
        seed: 7,
        ..test_config(dir_b.path())
    })
    .unwrap();
    assert_ne!(a.timeline, b.timeline);
    assert_ne!(a.artifact.sha256, b.artifact.sha256);
}

// ---------------------------------------------------------------------------
// S06: Optional CSV export mirrors the timeline
// ---------------------------------------------------------------------------
#[test]
fn s06_csv_export() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("timeline.csv");
    let cfg = Config {
        csv_path: Some(csv_path.clone()),
        ..test_config(dir.path())
    };
    let report = run(&cfg).unwrap();

    assert_eq!(report.csv_path.as_deref(), Some(csv_path.as_path()));
    let text = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text, report.timeline.to_csv());
    assert_eq!(text.lines().count(), SESSION_LEN + 1);
}

// ---------------------------------------------------------------------------
// S07: Unwritable output path surfaces as an error
// ---------------------------------------------------------------------------
#[test]
fn s07_unwritable_output_fails() {
    let dir = TempDir::new().unwrap();
    let cfg = Config {
        output_path: dir.path().join("missing").join("nested").join(DEFAULT_OUTPUT),
        ..test_config(dir.path())
    };
    assert!(run(&cfg).is_err());
}
