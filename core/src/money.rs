//! Monetary bounds.
//!
//! Upstream forecast figures are not trusted: a single runaway value would
//! dominate every chart. Every monetary figure entering or leaving the core
//! passes through `clamp_money`, derived figures included.

use crate::normalize::finite_or_zero;

/// Upper bound for any monetary figure (999M, currency-unit agnostic).
pub const MAX_MONEY: f64 = 999_000_000.0;

pub fn clamp_money(raw: Option<f64>) -> f64 {
    finite_or_zero(raw).clamp(0.0, MAX_MONEY)
}
