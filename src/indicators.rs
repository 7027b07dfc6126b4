//! Rolling statistics over wager series.

use std::collections::VecDeque;

/// Simple moving average with fixed window.
///
/// The mean is recomputed from the retained window on every update so the
/// value matches a direct average of the last `period` samples exactly.
#[derive(Debug, Clone)]
pub struct Sma {
    window: VecDeque<f64>,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(period),
            period,
        }
    }

    pub fn update(&mut self, value: f64) -> f64 {
        self.window.push_back(value);
        if self.window.len() > self.period {
            self.window.pop_front();
        }
        self.get()
    }

    pub fn get(&self) -> f64 {
        if self.window.is_empty() {
            0.0
        } else {
            self.window.iter().sum::<f64>() / self.window.len() as f64
        }
    }

    pub fn is_ready(&self) -> bool {
        self.period > 0 && self.window.len() >= self.period
    }
}

/// Trailing, uncentered moving average.
///
/// Position `i` holds the mean of `values[i + 1 - window..=i]`; positions with
/// fewer than `window` samples available are `None`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut sma = Sma::new(window);
    values
        .iter()
        .map(|&v| {
            let mean = sma.update(v);
            sma.is_ready().then_some(mean)
        })
        .collect()
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_partial_then_full_window() {
        let mut sma = Sma::new(3);
        assert_eq!(sma.update(3.0), 3.0);
        assert!(!sma.is_ready());
        assert_eq!(sma.update(6.0), 4.5);
        assert_eq!(sma.update(9.0), 6.0);
        assert!(sma.is_ready());
        // oldest sample drops out
        assert_eq!(sma.update(12.0), 9.0);
    }

    #[test]
    fn rolling_mean_leading_gaps() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 4);
        assert_eq!(out.len(), 6);
        assert_eq!(&out[..3], &[None, None, None]);
        assert_eq!(out[3], Some(2.5));
        assert_eq!(out[4], Some(3.5));
        assert_eq!(out[5], Some(4.5));
    }

    #[test]
    fn rolling_mean_short_input() {
        assert!(rolling_mean(&[1.0, 2.0], 4).iter().all(Option::is_none));
        assert!(rolling_mean(&[], 4).is_empty());
    }

    #[test]
    fn rolling_mean_zero_window() {
        assert!(rolling_mean(&[1.0, 2.0, 3.0], 0).iter().all(Option::is_none));
    }

    #[test]
    fn mean_empty_and_nonempty() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }
}
