//! Bounded 0-1 normalization and the Composite Integrity Index (CII).
//!
//! The bounds and weights are frozen for the 1.x line. The CII deliberately has
//! no volatility-adjusted-return (Sharpe-like) term and must never gain one.

use serde::Serialize;

/// Frozen normalization bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizationBounds {
    pub skew_min: f64,
    pub skew_max: f64,
    pub ltc_min: f64,
    pub ltc_max: f64,
    pub rocpr_cap: f64,
    pub drawdown_volatility_cap: f64,
}

pub const BOUNDS: NormalizationBounds = NormalizationBounds {
    skew_min: -1.0,
    skew_max: 1.0,
    ltc_min: 0.0,
    ltc_max: 1.0,
    rocpr_cap: 2.0,
    drawdown_volatility_cap: 1.0,
};

// Weights in percent, so the common case sums exactly (e.g. 35 + 30 + 20 = 85).
const SKEW_WEIGHT_PCT: f64 = 35.0;
const LTC_WEIGHT_PCT: f64 = 30.0;
const ROCPR_WEIGHT_PCT: f64 = 20.0;
const DRAWDOWN_VOLATILITY_WEIGHT_PCT: f64 = 15.0;

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Linear map of `[skew_min, skew_max]` onto `[0, 1]`, clamped.
pub fn normalize_skew(skew: f64) -> f64 {
    clamp01((skew - BOUNDS.skew_min) / (BOUNDS.skew_max - BOUNDS.skew_min))
}

/// LTC is already a fraction; this only clamps.
pub fn normalize_ltc(ltc: f64) -> f64 {
    clamp01((ltc - BOUNDS.ltc_min) / (BOUNDS.ltc_max - BOUNDS.ltc_min))
}

pub fn normalize_rocpr(rocpr: f64) -> f64 {
    clamp01(rocpr / BOUNDS.rocpr_cap)
}

pub fn normalize_drawdown_volatility(volatility: f64) -> f64 {
    clamp01(volatility / BOUNDS.drawdown_volatility_cap)
}

/// `0.35 skew + 0.30 ltc + 0.20 rocpr - 0.15 drawdown volatility`, each input
/// normalized first, result clamped to `[0, 1]`.
///
/// Any missing input makes the whole index `None`; nothing is imputed.
pub fn composite_integrity_index(
    skew: Option<f64>,
    ltc: Option<f64>,
    rocpr: Option<f64>,
    drawdown_volatility: Option<f64>,
) -> Option<f64> {
    let skew = normalize_skew(skew?);
    let ltc = normalize_ltc(ltc?);
    let rocpr = normalize_rocpr(rocpr?);
    let volatility = normalize_drawdown_volatility(drawdown_volatility?);

    let weighted = SKEW_WEIGHT_PCT * skew + LTC_WEIGHT_PCT * ltc + ROCPR_WEIGHT_PCT * rocpr
        - DRAWDOWN_VOLATILITY_WEIGHT_PCT * volatility;
    Some(clamp01(weighted / 100.0))
}
