//! Bundled chart typeface.
//!
//! The bitmap backend has no system font lookup, so the DejaVu Sans faces
//! shipped under `assets/fonts` are registered as `sans-serif` before drawing.

use anyhow::{anyhow, Result};
use plotters::style::{register_font, FontStyle};
use std::sync::OnceLock;

pub const FAMILY: &str = "sans-serif";

static REGULAR: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

/// Registers both faces once per process; later calls return the first outcome.
pub fn ensure_registered() -> Result<()> {
    REGISTERED
        .get_or_init(|| {
            register_font(FAMILY, FontStyle::Normal, REGULAR)
                .map_err(|_| "regular face rejected".to_string())?;
            register_font(FAMILY, FontStyle::Bold, BOLD)
                .map_err(|_| "bold face rejected".to_string())?;
            Ok(())
        })
        .clone()
        .map_err(|e| anyhow!("font registration failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_idempotent() {
        assert!(ensure_registered().is_ok());
        assert!(ensure_registered().is_ok());
    }
}
