//! Rolling-window time filter and the minimum-sample gate.

use chrono::{DateTime, Duration, Utc};
use core_types::{RollingWindow, TradeRecord};

/// Below this many trades no distribution metric is reported.
pub const MIN_SAMPLE_SIZE: usize = 10;

/// Keeps every trade whose exit time lies in `[reference_time - window, reference_time]`
/// (both ends inclusive), sorted ascending by exit time.
///
/// The sort is stable: trades that share an exit timestamp keep the order in
/// which they appear in `trades`. Replays that feed the same input order get
/// the same output order.
pub fn apply(
    trades: &[TradeRecord],
    window: RollingWindow,
    reference_time: DateTime<Utc>,
) -> Vec<TradeRecord> {
    let start = reference_time - Duration::days(window.days());

    let mut filtered: Vec<TradeRecord> = trades
        .iter()
        .filter(|t| t.exit_time() >= start && t.exit_time() <= reference_time)
        .cloned()
        .collect();
    filtered.sort_by_key(|t| t.exit_time());

    tracing::debug!(
        window = %window,
        %reference_time,
        input = trades.len(),
        kept = filtered.len(),
        "Applied rolling window"
    );
    filtered
}

/// True iff there are at least `MIN_SAMPLE_SIZE` trades.
pub fn meets_minimum_sample(trades: &[TradeRecord]) -> bool {
    trades.len() >= MIN_SAMPLE_SIZE
}
