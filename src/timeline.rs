//! Session timeline synthesis.
//!
//! A session is 48 half-hour slots. Wagers are drawn from three normal
//! distributions back to back (baseline, escalation, crisis) from a single
//! seeded generator, folded to non-negative values, and smoothed into a
//! trailing 4-slot "risk velocity".

use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::ops::Range;

use crate::indicators::{mean, rolling_mean};

pub const SESSION_LEN: usize = 48;
pub const SLOT_MINUTES: i64 = 30;
pub const SESSION_HOURS: f64 = 24.0;
pub const VELOCITY_WINDOW: usize = 4;
pub const DEFAULT_SEED: u64 = 42;

/// First slot of every synthesized session: 2026-01-09 00:00.
pub fn session_start() -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2026, 1, 9)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow!("invalid session start"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Baseline,
    Escalation,
    Crisis,
}

impl Phase {
    /// Sampling order within a session.
    pub const ALL: [Phase; 3] = [Phase::Baseline, Phase::Escalation, Phase::Crisis];

    pub fn mean(&self) -> f64 {
        match self {
            Phase::Baseline => 15.0,
            Phase::Escalation => 150.0,
            Phase::Crisis => 1500.0,
        }
    }

    pub fn std_dev(&self) -> f64 {
        match self {
            Phase::Baseline => 5.0,
            Phase::Escalation => 50.0,
            Phase::Crisis => 400.0,
        }
    }

    pub fn samples(&self) -> usize {
        match self {
            Phase::Baseline => 24,
            Phase::Escalation | Phase::Crisis => 12,
        }
    }

    /// Row indices covered by this phase.
    pub fn range(&self) -> Range<usize> {
        let start: usize = Phase::ALL
            .iter()
            .take_while(|p| *p != self)
            .map(Phase::samples)
            .sum();
        start..start + self.samples()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Baseline => "baseline",
            Phase::Escalation => "escalation",
            Phase::Crisis => "crisis",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub timestamp: NaiveDateTime,
    pub wager: f64,
    pub risk_velocity: Option<f64>,
}

/// Immutable 48-slot wager table.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTimeline {
    seed: u64,
    rows: Vec<TimelineRow>,
}

impl SessionTimeline {
    pub fn generate(seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut wagers = Vec::with_capacity(SESSION_LEN);
        for phase in Phase::ALL {
            let dist = Normal::new(phase.mean(), phase.std_dev())
                .map_err(|e| anyhow!("invalid {} distribution: {}", phase.as_str(), e))?;
            wagers.extend(
                dist.sample_iter(&mut rng)
                    .take(phase.samples())
                    .map(f64::abs),
            );
        }

        let start = session_start()?;
        let velocity = rolling_mean(&wagers, VELOCITY_WINDOW);
        let rows = wagers
            .into_iter()
            .zip(velocity)
            .enumerate()
            .map(|(i, (wager, risk_velocity))| TimelineRow {
                timestamp: start + Duration::minutes(SLOT_MINUTES * i as i64),
                wager,
                risk_velocity,
            })
            .collect();

        Ok(Self { seed, rows })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rows(&self) -> &[TimelineRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.rows.iter().map(|r| r.timestamp).collect()
    }

    pub fn wagers(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.wager).collect()
    }

    pub fn risk_velocity(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.risk_velocity).collect()
    }

    /// Smallest and largest wager, `None` for an empty table.
    pub fn wager_range(&self) -> Option<(f64, f64)> {
        self.rows.iter().map(|r| r.wager).fold(None, |acc, w| match acc {
            None => Some((w, w)),
            Some((lo, hi)) => Some((lo.min(w), hi.max(w))),
        })
    }

    /// Plot positions: rows spread evenly over 0..=24 hours.
    ///
    /// Deliberately independent of the timestamps.
    pub fn hours(&self) -> Vec<f64> {
        let n = self.rows.len();
        match n {
            0 => Vec::new(),
            1 => vec![0.0],
            _ => (0..n)
                .map(|i| SESSION_HOURS * i as f64 / (n - 1) as f64)
                .collect(),
        }
    }

    pub fn phase_at(&self, index: usize) -> Option<Phase> {
        Phase::ALL.into_iter().find(|p| p.range().contains(&index))
    }

    pub fn phase_rows(&self, phase: Phase) -> &[TimelineRow] {
        let range = phase.range();
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        &self.rows[start..end]
    }

    pub fn phase_mean(&self, phase: Phase) -> Option<f64> {
        let wagers: Vec<f64> = self.phase_rows(phase).iter().map(|r| r.wager).collect();
        mean(&wagers)
    }

    /// CSV export: `timestamp,hours,phase,wager,risk_velocity`.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("timestamp,hours,phase,wager,risk_velocity\n");
        for (i, (row, hour)) in self.rows.iter().zip(self.hours()).enumerate() {
            let phase = self.phase_at(i).map(|p| p.as_str()).unwrap_or("");
            let velocity = row
                .risk_velocity
                .map(|v| v.to_string())
                .unwrap_or_default();
            out.push_str(&format!(
                "{},{:.4},{},{},{}\n",
                row.timestamp.format("%Y-%m-%d %H:%M:%S"),
                hour,
                phase,
                row.wager,
                velocity
            ));
        }
        out
    }
}
