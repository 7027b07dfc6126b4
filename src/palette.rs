//! Colors used by the risk chart.

use plotters::style::RGBColor;

/// ColorBrewer RdYlGn anchors, red end first.
const RDYLGN: [RGBColor; 11] = [
    RGBColor(0xa5, 0x00, 0x26),
    RGBColor(0xd7, 0x30, 0x27),
    RGBColor(0xf4, 0x6d, 0x43),
    RGBColor(0xfd, 0xae, 0x61),
    RGBColor(0xfe, 0xe0, 0x8b),
    RGBColor(0xff, 0xff, 0xbf),
    RGBColor(0xd9, 0xef, 0x8b),
    RGBColor(0xa6, 0xd9, 0x6a),
    RGBColor(0x66, 0xbd, 0x63),
    RGBColor(0x1a, 0x98, 0x50),
    RGBColor(0x00, 0x68, 0x37),
];

pub const INK: RGBColor = RGBColor(0x1a, 0x1a, 0x1a);
pub const TITLE: RGBColor = RGBColor(0x2c, 0x3e, 0x50);
pub const BASELINE_LABEL: RGBColor = RGBColor(0x1e, 0x56, 0x31);
pub const ESCALATION_LABEL: RGBColor = RGBColor(0xcc, 0x7a, 0x00);
pub const CRISIS_LABEL: RGBColor = RGBColor(0xb3, 0x00, 0x00);
pub const INTERVENTION: RGBColor = RGBColor(0xff, 0x00, 0x00);

/// Reversed RdYlGn: 0.0 is deep green, 1.0 is deep red.
///
/// Input is clamped to `[0, 1]`; NaN maps to the green end.
pub fn risk_color(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    // walk the table from the green end
    let pos = (1.0 - t) * (RDYLGN.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(RDYLGN.len() - 1);
    let frac = pos - lo as f64;
    lerp(RDYLGN[lo], RDYLGN[hi], frac)
}

/// Position of `value` within `[lo, hi]`, clamped. A degenerate range maps to 0.
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return 0.0;
    }
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

fn lerp(a: RGBColor, b: RGBColor, t: f64) -> RGBColor {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
