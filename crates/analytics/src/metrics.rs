//! Frozen v1 return-shape formulas.
//!
//! Every function is pure and returns `None` for an empty series. The
//! per-formula edge cases below are part of the versioned contract; changing
//! any of them is a major version bump.

use core_types::{StrategyCategory, TradeRecord};
use ndarray::{Array1, ArrayView1};

use crate::report::StrategyMix;

/// Losses no deeper than this many R count as contained.
pub const CONTAINED_LOSS_R: f64 = 1.0;
/// Winners above this R count towards the right tail.
pub const RIGHT_TAIL_R: f64 = 1.5;
/// Losers below this R count towards the left tail.
pub const LEFT_TAIL_R: f64 = -1.0;

/// Pulls the R-multiple series out of a trade list, preserving order.
pub fn r_multiples(trades: &[TradeRecord]) -> Array1<f64> {
    trades.iter().map(TradeRecord::r_multiple).collect()
}

/// Population mean and standard deviation.
fn mean_and_std(r: ArrayView1<f64>) -> Option<(f64, f64)> {
    let mean = r.mean()?;
    Some((mean, r.std(0.0)))
}

/// Third standardised moment, E[((R - mu) / sigma)^3]. Zero when sigma is zero.
pub fn skew(r: ArrayView1<f64>) -> Option<f64> {
    let (mean, std) = mean_and_std(r)?;
    if std == 0.0 {
        return Some(0.0);
    }
    (r.mapv(|x| ((x - mean) / std).powi(3))).mean()
}

/// Fourth standardised moment minus 3. Zero when sigma is zero.
pub fn excess_kurtosis(r: ArrayView1<f64>) -> Option<f64> {
    let (mean, std) = mean_and_std(r)?;
    if std == 0.0 {
        return Some(0.0);
    }
    (r.mapv(|x| ((x - mean) / std).powi(4)))
        .mean()
        .map(|m4| m4 - 3.0)
}

/// Fraction of losing trades whose loss stays within 1R. 1.0 when nothing lost.
pub fn left_tail_containment(r: ArrayView1<f64>) -> Option<f64> {
    if r.is_empty() {
        return None;
    }
    let (losses, contained) = r.fold((0usize, 0usize), |(losses, contained), &x| {
        if x < 0.0 {
            (losses + 1, contained + usize::from(x.abs() <= CONTAINED_LOSS_R))
        } else {
            (losses, contained)
        }
    });
    if losses == 0 {
        return Some(1.0);
    }
    Some(contained as f64 / losses as f64)
}

/// Return on capital put at risk: total P&L over total risk deployed.
pub fn rocpr(trades: &[TradeRecord]) -> Option<f64> {
    if trades.is_empty() {
        return None;
    }
    let pnl: Array1<f64> = trades.iter().map(TradeRecord::pnl_realized).collect();
    let risk: Array1<f64> = trades.iter().map(TradeRecord::risk_unit).collect();
    let total_risk = risk.sum();
    if total_risk == 0.0 {
        return None;
    }
    Some(pnl.sum() / total_risk)
}

/// Mean R of the winning trades (R > 0).
pub fn avg_winner(r: ArrayView1<f64>) -> Option<f64> {
    let (sum, count) = r.fold((0.0, 0usize), |(sum, count), &x| {
        if x > 0.0 { (sum + x, count + 1) } else { (sum, count) }
    });
    (count > 0).then(|| sum / count as f64)
}

/// Mean |R| of the losing trades (R < 0).
pub fn avg_loser(r: ArrayView1<f64>) -> Option<f64> {
    let (sum, count) = r.fold((0.0, 0usize), |(sum, count), &x| {
        if x < 0.0 { (sum + x.abs(), count + 1) } else { (sum, count) }
    });
    (count > 0).then(|| sum / count as f64)
}

/// Average winner over average loser. `None` if either side is absent or the
/// loser mean is zero.
pub fn win_loss_ratio(r: ArrayView1<f64>) -> Option<f64> {
    let winner = avg_winner(r)?;
    let loser = avg_loser(r)?;
    if loser == 0.0 {
        return None;
    }
    Some(winner / loser)
}

/// Gross winning R over gross losing |R|. `None` without losers.
pub fn profit_factor(r: ArrayView1<f64>) -> Option<f64> {
    if r.is_empty() {
        return None;
    }
    let gross_profit = r.mapv(|x| x.max(0.0)).sum();
    let gross_loss = r.mapv(|x| (-x).max(0.0)).sum();
    if gross_loss == 0.0 {
        return None;
    }
    Some(gross_profit / gross_loss)
}

/// Share of total R contributed by winners above 1.5R.
///
/// Returns 0.0 when total R is not positive. For a small positive total the
/// ratio grows without bound; that behaviour is part of the v1 formula.
pub fn right_tail_contribution(r: ArrayView1<f64>) -> Option<f64> {
    if r.is_empty() {
        return None;
    }
    let total = r.sum();
    if total <= 0.0 {
        return Some(0.0);
    }
    let tail = r.mapv(|x| if x > RIGHT_TAIL_R { x } else { 0.0 }).sum();
    Some(tail / total)
}

/// Share of total |R| contributed by losers below -1R.
pub fn left_tail_contribution(r: ArrayView1<f64>) -> Option<f64> {
    if r.is_empty() {
        return None;
    }
    let total_abs = r.mapv(f64::abs).sum();
    if total_abs == 0.0 {
        return Some(0.0);
    }
    let tail = r.mapv(|x| if x < LEFT_TAIL_R { x.abs() } else { 0.0 }).sum();
    Some(tail / total_abs)
}

/// Mean of the top decile over |mean of the bottom decile|.
///
/// Needs at least 10 values; the decile holds `max(1, n / 10)` values.
pub fn tail_ratio(r: ArrayView1<f64>) -> Option<f64> {
    let n = r.len();
    if n < 10 {
        return None;
    }
    let mut sorted = r.to_vec();
    sorted.sort_by(f64::total_cmp);

    let decile = (n / 10).max(1);
    let sorted = ArrayView1::from(&sorted[..]);
    let bottom = sorted.slice(ndarray::s![..decile]).mean()?;
    let top = sorted.slice(ndarray::s![n - decile..]).mean()?;
    if bottom == 0.0 {
        return None;
    }
    Some(top / bottom.abs())
}

/// Per-category share of the trade count.
pub fn strategy_mix(trades: &[TradeRecord]) -> StrategyMix {
    if trades.is_empty() {
        return StrategyMix::default();
    }
    let n = trades.len() as f64;
    let count = |category: StrategyCategory| {
        trades.iter().filter(|t| t.strategy() == category).count() as f64
    };
    StrategyMix {
        convex_expansion: count(StrategyCategory::ConvexExpansion) / n,
        event_compression: count(StrategyCategory::EventCompression) / n,
        premium_collection: count(StrategyCategory::PremiumCollection) / n,
    }
}
