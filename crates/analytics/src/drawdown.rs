//! Equity-curve peak tracking and drawdown-period extraction.
//!
//! The equity curve is the running sum of R-multiples over trades already
//! sorted by exit time. The high-water mark is the running maximum of that
//! curve, so the first trade is always at its own peak.

use chrono::{DateTime, Utc};
use core_types::TradeRecord;
use ndarray::{Array1, ArrayView1, Axis};

use crate::metrics::r_multiples;
use crate::report::{DrawdownPeriod, DrawdownProfile};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Running sum of the R-multiples.
pub fn equity_curve(r: ArrayView1<f64>) -> Array1<f64> {
    let mut equity = r.to_owned();
    equity.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);
    equity
}

/// Running maximum of the equity curve.
pub fn high_water_mark(equity: ArrayView1<f64>) -> Array1<f64> {
    let mut peak = equity.to_owned();
    peak.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr = curr.max(prev));
    peak
}

/// Builds the full drawdown profile for trades sorted ascending by exit time.
///
/// Empty input, or input that never dips below its peak, yields a zero-filled
/// profile (the peak series is still reported when there are trades).
pub fn compute_profile(trades: &[TradeRecord]) -> DrawdownProfile {
    if trades.is_empty() {
        return DrawdownProfile::default();
    }

    let r = r_multiples(trades);
    let equity = equity_curve(r.view());
    let peak = high_water_mark(equity.view());
    let drawdown = &peak - &equity;

    let exits: Vec<DateTime<Utc>> = trades.iter().map(TradeRecord::exit_time).collect();
    let periods = extract_periods(drawdown.view(), &exits);

    tracing::debug!(
        trades = trades.len(),
        periods = periods.len(),
        "Computed drawdown periods"
    );

    summarize(periods, peak.to_vec())
}

struct OpenPeriod {
    start: usize,
    trough: usize,
    depth: f64,
}

fn extract_periods(drawdown: ArrayView1<f64>, exits: &[DateTime<Utc>]) -> Vec<DrawdownPeriod> {
    let mut periods = Vec::new();
    let mut open: Option<OpenPeriod> = None;

    for (i, &dd) in drawdown.iter().enumerate() {
        match open.as_mut() {
            None => {
                if dd > 0.0 {
                    open = Some(OpenPeriod { start: i, trough: i, depth: dd });
                }
            }
            Some(current) => {
                if dd <= 0.0 {
                    periods.push(close_period(current, i, true, exits));
                    open = None;
                } else if dd > current.depth {
                    current.depth = dd;
                    current.trough = i;
                }
            }
        }
    }

    if let Some(current) = open {
        periods.push(close_period(&current, drawdown.len() - 1, false, exits));
    }
    periods
}

fn close_period(
    open: &OpenPeriod,
    end: usize,
    recovered: bool,
    exits: &[DateTime<Utc>],
) -> DrawdownPeriod {
    DrawdownPeriod {
        start_index: open.start,
        trough_index: open.trough,
        end_index: end,
        depth: open.depth,
        duration_trades: end - open.start,
        duration_days: days_between(exits[open.start], exits[end]),
        recovery_trades: end - open.trough,
        recovery_days: days_between(exits[open.trough], exits[end]),
        recovered,
    }
}

fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

fn summarize(periods: Vec<DrawdownPeriod>, peak_equity: Vec<f64>) -> DrawdownProfile {
    if periods.is_empty() {
        return DrawdownProfile {
            peak_equity,
            ..DrawdownProfile::default()
        };
    }

    let depths: Array1<f64> = periods.iter().map(|p| p.depth).collect();
    let durations: Array1<f64> = periods.iter().map(|p| p.duration_trades as f64).collect();
    let duration_days: Array1<f64> = periods.iter().map(|p| p.duration_days).collect();
    let recoveries: Array1<f64> = periods.iter().map(|p| p.recovery_trades as f64).collect();
    let recovery_days: Array1<f64> = periods.iter().map(|p| p.recovery_days).collect();

    let max = |a: &Array1<f64>| a.fold(0.0_f64, |acc, &x| acc.max(x));
    let mean = |a: &Array1<f64>| a.mean().unwrap_or(0.0);

    DrawdownProfile {
        max_depth: max(&depths),
        avg_depth: mean(&depths),
        max_duration_trades: periods.iter().map(|p| p.duration_trades).max().unwrap_or(0),
        avg_duration_trades: mean(&durations),
        max_duration_days: max(&duration_days),
        avg_duration_days: mean(&duration_days),
        avg_recovery_trades: mean(&recoveries),
        avg_recovery_days: mean(&recovery_days),
        volatility: depths.std(0.0),
        period_count: periods.len(),
        period_depths: depths.to_vec(),
        peak_equity,
        periods,
    }
}
