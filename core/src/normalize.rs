//! Ratio scale resolution.
//!
//! Upstream ratio columns are inconsistent: some rows hold fractions
//! (0.3), others percentages (30). Values above `PERCENT_THRESHOLD` are
//! read as percentages. Anything in (1.0, 1.5] is fractional overshoot.
//!
//! `normalize01` and `to_percent01` are not exact inverses near the
//! threshold: `to_percent01(1.2) == 120.0` but `normalize01(120.0) == 1.0`.

/// Raw values strictly above this are percentages.
pub const PERCENT_THRESHOLD: f64 = 1.5;

/// `None` and non-finite values read as 0.
pub fn finite_or_zero(raw: Option<f64>) -> f64 {
    match raw {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Resolve a ratio of unknown scale onto [0, 1].
pub fn normalize01(raw: Option<f64>) -> f64 {
    let v = finite_or_zero(raw);
    let fraction = if v > PERCENT_THRESHOLD { v / 100.0 } else { v };
    fraction.clamp(0.0, 1.0)
}

/// Express a ratio of unknown scale on the 0–100 scale.
pub fn to_percent01(raw: Option<f64>) -> f64 {
    let v = finite_or_zero(raw);
    if v <= PERCENT_THRESHOLD {
        v * 100.0
    } else {
        v
    }
}
