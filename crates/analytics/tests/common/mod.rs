#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_types::{
    OutcomeType, PriceZone, RegimeBucket, SessionBucket, StrategyCategory, TradeRecord,
    TradeRecordParams,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 31, 21, 0, 0).unwrap()
}

pub fn trade(
    id: usize,
    r_multiple: f64,
    risk_unit: f64,
    exit_time: DateTime<Utc>,
    strategy: StrategyCategory,
    regime: RegimeBucket,
) -> TradeRecord {
    TradeRecord::new(TradeRecordParams {
        trade_id: format!("trade-{id}"),
        strategy,
        structure_signature: "butterfly_call_25".to_string(),
        entry_time: exit_time - Duration::hours(3),
        exit_time,
        risk_unit,
        pnl_realized: r_multiple * risk_unit,
        r_multiple,
        regime,
        session: SessionBucket::Open,
        price_zone: PriceZone::Low,
        outcome: OutcomeType::Expiry,
    })
    .unwrap()
}

/// One trade per hour ending at `reference_time()`, all in the same regime.
pub fn hourly_series(r_multiples: &[f64]) -> Vec<TradeRecord> {
    let n = r_multiples.len();
    r_multiples
        .iter()
        .enumerate()
        .map(|(i, &r)| {
            let exit = reference_time() - Duration::hours((n - 1 - i) as i64);
            trade(i, r, 100.0, exit, StrategyCategory::ConvexExpansion, RegimeBucket::Zombieland)
        })
        .collect()
}

/// `count` seeded pseudo-random trades spread over the last 180 days.
pub fn random_book(count: usize, seed: u64) -> Vec<TradeRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let window_secs = 180 * 24 * 3600;
    (0..count)
        .map(|i| {
            let r = if rng.gen_bool(0.6) {
                rng.gen_range(0.05..3.0)
            } else {
                -rng.gen_range(0.05..2.5)
            };
            let risk = rng.gen_range(50.0..500.0);
            let exit = reference_time() - Duration::seconds(rng.gen_range(0..window_secs));
            let strategy = StrategyCategory::ALL[rng.gen_range(0..3)];
            let regime = RegimeBucket::ALL[rng.gen_range(0..4)];
            trade(i, r, risk, exit, strategy, regime)
        })
        .collect()
}
