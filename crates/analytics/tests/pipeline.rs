mod common;

use analytics::{
    DistributionEngine, ENGINE_VERSION, compute_distribution_metrics,
    compute_regime_segmented_metrics, compute_strategy_mix, is_compatible,
};
use chrono::Duration;
use common::{hourly_series, random_book, reference_time, trade};
use core_types::{DisplayRegime, RegimeBucket, RollingWindow, StrategyCategory};
use std::time::Instant;

#[test]
fn two_trades_in_a_week_withholds_every_metric() {
    let now = reference_time();
    let mut trades = vec![
        trade(0, 1.0, 100.0, now - Duration::days(1), StrategyCategory::ConvexExpansion, RegimeBucket::Chaos),
        trade(1, -0.5, 100.0, now - Duration::days(6), StrategyCategory::ConvexExpansion, RegimeBucket::Chaos),
    ];
    // Plenty of trades, all outside the 7-day window.
    trades.extend((0..20).map(|i| {
        trade(10 + i, 1.0, 100.0, now - Duration::days(8 + i as i64), StrategyCategory::ConvexExpansion, RegimeBucket::Chaos)
    }));

    let result = compute_distribution_metrics(&trades, RollingWindow::Days7, now);

    assert_eq!(result.trade_count, 2);
    assert_eq!(result.version, ENGINE_VERSION);
    let json = serde_json::to_value(&result).unwrap();
    for field in [
        "skew",
        "excess_kurtosis",
        "ltc",
        "rocpr",
        "avg_winner",
        "avg_loser",
        "win_loss_ratio",
        "profit_factor",
        "right_tail_contribution",
        "left_tail_contribution",
        "tail_ratio",
        "drawdown",
        "strategy_mix",
        "cii",
    ] {
        assert!(json[field].is_null(), "{field} should be null");
    }
}

#[test]
fn reference_series_tail_ratio_and_drawdown() {
    let r = [-2.0, -1.0, -0.5, 0.0, 0.1, 0.2, 0.5, 1.0, 1.5, 3.0];
    let result = compute_distribution_metrics(&hourly_series(&r), RollingWindow::Days7, reference_time());

    assert_eq!(result.tail_ratio, Some(3.0 / 2.0));
    assert_eq!(result.trade_count, 10);
    // Cumulative R: -2, -3, -3.5, -3.5, -3.4, -3.2, -2.7, -1.7, -0.2, 2.8
    // Peak: -2 until the curve climbs back above it at index 7.
    let drawdown = result.drawdown.unwrap();
    assert_eq!(drawdown.period_count, 1);
    assert_eq!(drawdown.max_depth, 1.5);
    assert!(drawdown.periods[0].recovered);
    assert_eq!(drawdown.periods[0].start_index, 1);
    assert_eq!(drawdown.periods[0].trough_index, 2);
    assert_eq!(drawdown.periods[0].end_index, 7);
    assert_eq!(drawdown.peak_equity[0], -2.0);
}

#[test]
fn equity_path_with_one_dip_has_unit_max_drawdown() {
    let mut r = vec![1.0, 0.5, -1.0, 1.0];
    // Pad with flat-equity winners so the sample clears the minimum without
    // opening another drawdown period.
    r.extend(std::iter::repeat_n(0.25, 6));
    let result = compute_distribution_metrics(&hourly_series(&r), RollingWindow::Days7, reference_time());

    let drawdown = result.drawdown.unwrap();
    assert_eq!(drawdown.max_depth, 1.0);
    assert_eq!(drawdown.period_count, 1);
    assert_eq!(drawdown.period_depths, vec![1.0]);
    assert_eq!(drawdown.peak_equity.len(), 10);
}

#[test]
fn replay_is_deterministic_apart_from_generation_time() {
    let trades = random_book(2_000, 7);
    let now = reference_time();

    for window in RollingWindow::ALL {
        let first = compute_distribution_metrics(&trades, window, now);
        let second = compute_distribution_metrics(&trades, window, now);
        assert!(first.eq_ignoring_generated_at(&second));
        assert_eq!(
            serde_json::to_value(&first).unwrap()["skew"],
            serde_json::to_value(&second).unwrap()["skew"]
        );

        let regimes_a = compute_regime_segmented_metrics(&trades, window, now);
        let regimes_b = compute_regime_segmented_metrics(&trades, window, now);
        assert!(regimes_a.eq_ignoring_generated_at(&regimes_b));
    }
}

#[test]
fn regime_buckets_are_computed_independently() {
    let trades = random_book(400, 11);
    let now = reference_time();
    let overall = compute_distribution_metrics(&trades, RollingWindow::Days180, now);
    let regimes = compute_regime_segmented_metrics(&trades, RollingWindow::Days180, now);

    let bucket_total: usize = RegimeBucket::ALL.iter().map(|b| regimes.get(*b).trade_count).sum();
    assert_eq!(bucket_total, overall.trade_count);
    assert_eq!(
        regimes.goldilocks_trade_count(),
        regimes.goldilocks_1.trade_count + regimes.goldilocks_2.trade_count
    );

    // A bucket's result equals running the pipeline on that bucket alone.
    let chaos_only: Vec<_> = trades.iter().filter(|t| t.regime() == RegimeBucket::Chaos).cloned().collect();
    let chaos_direct = compute_distribution_metrics(&chaos_only, RollingWindow::Days180, now);
    assert!(regimes.chaos.eq_ignoring_generated_at(&chaos_direct));
}

#[test]
fn sparse_regime_bucket_is_withheld_without_pooling() {
    let now = reference_time();
    let mut trades: Vec<_> = (0..15)
        .map(|i| trade(i, 0.5, 100.0, now - Duration::hours(i as i64), StrategyCategory::PremiumCollection, RegimeBucket::Goldilocks1))
        .collect();
    trades.extend((0..3).map(|i| {
        trade(100 + i, -1.0, 100.0, now - Duration::hours(i as i64), StrategyCategory::PremiumCollection, RegimeBucket::Chaos)
    }));

    let regimes = compute_regime_segmented_metrics(&trades, RollingWindow::Days7, now);
    assert!(regimes.goldilocks_1.has_metrics());
    assert_eq!(regimes.chaos.trade_count, 3);
    assert!(!regimes.chaos.has_metrics());
    assert_eq!(regimes.zombieland.trade_count, 0);
    assert_eq!(regimes.version, ENGINE_VERSION);
}

#[test]
fn display_groups_sum_goldilocks_counts_only() {
    let now = reference_time();
    let mut trades: Vec<_> = (0..12)
        .map(|i| trade(i, 0.5, 100.0, now - Duration::hours(i as i64), StrategyCategory::PremiumCollection, RegimeBucket::Goldilocks1))
        .collect();
    trades.extend((0..4).map(|i| {
        trade(50 + i, -0.5, 100.0, now - Duration::hours(i as i64), StrategyCategory::ConvexExpansion, RegimeBucket::Goldilocks2)
    }));
    trades.extend((0..2).map(|i| {
        trade(90 + i, 1.0, 100.0, now - Duration::hours(i as i64), StrategyCategory::ConvexExpansion, RegimeBucket::Chaos)
    }));

    let regimes = compute_regime_segmented_metrics(&trades, RollingWindow::Days7, now);
    assert_eq!(regimes.display_trade_count(DisplayRegime::Goldilocks), 16);
    assert_eq!(regimes.goldilocks_trade_count(), 16);
    assert_eq!(regimes.display_trade_count(DisplayRegime::Chaos), 2);
    assert_eq!(regimes.display_trade_count(DisplayRegime::Zombieland), 0);
    // The sub-bucket below the minimum stays withheld even though the group has 16.
    assert!(regimes.goldilocks_1.has_metrics());
    assert!(!regimes.goldilocks_2.has_metrics());
}

#[test]
fn strategy_mix_weights_sum_to_one() {
    let trades = random_book(997, 3);
    let exposure = compute_strategy_mix(&trades, RollingWindow::Days90, reference_time());
    assert!(exposure.trade_count > 0);
    assert!((exposure.mix.total() - 1.0).abs() <= 1e-9);
    assert!(is_compatible(&exposure.version));
}

#[test]
fn ten_thousand_trades_within_budget() {
    let trades = random_book(10_000, 42);
    let engine = DistributionEngine::with_reference_time(reference_time());

    let started = Instant::now();
    let result = engine.compute_distribution_metrics(&trades, RollingWindow::Days180);
    let elapsed = started.elapsed();

    assert_eq!(result.trade_count, 10_000);
    assert!(result.cii.is_some());
    assert!(elapsed.as_millis() < 200, "pipeline took {elapsed:?}");
}
