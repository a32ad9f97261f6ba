//! Trade builders shared by the unit tests in this crate.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_types::{
    OutcomeType, PriceZone, RegimeBucket, SessionBucket, StrategyCategory, TradeRecord,
    TradeRecordParams,
};

pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 20, 0, 0).unwrap()
}

/// A trade with a risk unit of 100 whose P&L matches `r_multiple`.
pub fn trade_at(id: &str, r_multiple: f64, exit_time: DateTime<Utc>) -> TradeRecord {
    trade_with(id, r_multiple, exit_time, StrategyCategory::PremiumCollection, RegimeBucket::Zombieland)
}

pub fn trade_with(
    id: &str,
    r_multiple: f64,
    exit_time: DateTime<Utc>,
    strategy: StrategyCategory,
    regime: RegimeBucket,
) -> TradeRecord {
    TradeRecord::new(TradeRecordParams {
        trade_id: id.to_string(),
        strategy,
        structure_signature: "iron_condor_put_10".to_string(),
        entry_time: exit_time - Duration::hours(4),
        exit_time,
        risk_unit: 100.0,
        pnl_realized: r_multiple * 100.0,
        r_multiple,
        regime,
        session: SessionBucket::Midday,
        price_zone: PriceZone::Mid,
        outcome: OutcomeType::TimeExit,
    })
    .unwrap()
}

/// One trade per day, ending at `reference_time()`, in the given R order.
pub fn daily_series(r_multiples: &[f64]) -> Vec<TradeRecord> {
    let n = r_multiples.len() as i64;
    r_multiples
        .iter()
        .enumerate()
        .map(|(i, &r)| {
            let exit = reference_time() - Duration::days(n - 1 - i as i64);
            trade_at(&format!("t-{i}"), r, exit)
        })
        .collect()
}
