use chrono::{DateTime, Utc};
use core_types::{DisplayRegime, RegimeBucket, RollingWindow, StrategyCategory};
use serde::{Deserialize, Serialize};

use crate::version::ENGINE_VERSION;

/// The authoritative return-distribution snapshot for one window of trades.
///
/// Every metric is `None` when fewer than the minimum sample of trades fell in
/// the window; otherwise every metric is computed, and a single field is `None`
/// only when its own formula is undefined for the data (e.g. no losers for the
/// profit factor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub reference_time: DateTime<Utc>,
    pub window: RollingWindow,
    pub trade_count: usize,

    // I. Shape of returns
    pub skew: Option<f64>,
    pub excess_kurtosis: Option<f64>,
    pub ltc: Option<f64>,
    pub rocpr: Option<f64>,

    // II. Winners and losers
    pub avg_winner: Option<f64>,
    pub avg_loser: Option<f64>,
    pub win_loss_ratio: Option<f64>,
    pub profit_factor: Option<f64>,

    // III. Tails
    pub right_tail_contribution: Option<f64>,
    pub left_tail_contribution: Option<f64>,
    pub tail_ratio: Option<f64>,

    // IV. Stability and exposure
    pub drawdown: Option<DrawdownProfile>,
    pub strategy_mix: Option<StrategyMix>,

    // V. Composite
    pub cii: Option<f64>,
}

impl DistributionResult {
    /// A well-formed result for a sample that is too small: counts and version
    /// are populated, every metric is `None`.
    pub fn insufficient(
        window: RollingWindow,
        reference_time: DateTime<Utc>,
        trade_count: usize,
    ) -> Self {
        Self {
            version: ENGINE_VERSION.to_string(),
            generated_at: Utc::now(),
            reference_time,
            window,
            trade_count,
            skew: None,
            excess_kurtosis: None,
            ltc: None,
            rocpr: None,
            avg_winner: None,
            avg_loser: None,
            win_loss_ratio: None,
            profit_factor: None,
            right_tail_contribution: None,
            left_tail_contribution: None,
            tail_ratio: None,
            drawdown: None,
            strategy_mix: None,
            cii: None,
        }
    }

    /// False when the sample was below the minimum and nothing was computed.
    pub fn has_metrics(&self) -> bool {
        self.drawdown.is_some()
    }

    /// Equality on everything except `generated_at`. This is the replay contract.
    pub fn eq_ignoring_generated_at(&self, other: &Self) -> bool {
        let mut aligned = other.clone();
        aligned.generated_at = self.generated_at;
        *self == aligned
    }
}

/// One contiguous stretch where cumulative R sat below its high-water mark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPeriod {
    /// Index of the first trade that took equity below the peak.
    pub start_index: usize,
    /// Index of the deepest point.
    pub trough_index: usize,
    /// Index of the recovering trade, or of the last trade if unrecovered.
    pub end_index: usize,
    pub depth: f64,
    pub duration_trades: usize,
    pub duration_days: f64,
    pub recovery_trades: usize,
    pub recovery_days: f64,
    pub recovered: bool,
}

/// Drawdown and stability profile of the cumulative R equity curve.
///
/// Besides the aggregates, it carries the per-period depths and the full
/// running-peak series for downstream stability governance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawdownProfile {
    pub max_depth: f64,
    pub avg_depth: f64,
    pub max_duration_trades: usize,
    pub avg_duration_trades: f64,
    pub max_duration_days: f64,
    pub avg_duration_days: f64,
    pub avg_recovery_trades: f64,
    pub avg_recovery_days: f64,
    /// Population standard deviation of the period depths.
    pub volatility: f64,
    pub period_count: usize,
    pub period_depths: Vec<f64>,
    pub peak_equity: Vec<f64>,
    pub periods: Vec<DrawdownPeriod>,
}

/// Share of trades per strategy category. Weights sum to 1 for a non-empty
/// sample and are all zero for an empty one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyMix {
    pub convex_expansion: f64,
    pub event_compression: f64,
    pub premium_collection: f64,
}

impl StrategyMix {
    pub fn weight(&self, category: StrategyCategory) -> f64 {
        match category {
            StrategyCategory::ConvexExpansion => self.convex_expansion,
            StrategyCategory::EventCompression => self.event_compression,
            StrategyCategory::PremiumCollection => self.premium_collection,
        }
    }

    pub fn total(&self) -> f64 {
        self.convex_expansion + self.event_compression + self.premium_collection
    }
}

/// The full pipeline run independently on each regime bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeDistributionResult {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub reference_time: DateTime<Utc>,
    pub window: RollingWindow,
    pub zombieland: DistributionResult,
    pub goldilocks_1: DistributionResult,
    pub goldilocks_2: DistributionResult,
    pub chaos: DistributionResult,
}

impl RegimeDistributionResult {
    pub fn get(&self, bucket: RegimeBucket) -> &DistributionResult {
        match bucket {
            RegimeBucket::Zombieland => &self.zombieland,
            RegimeBucket::Goldilocks1 => &self.goldilocks_1,
            RegimeBucket::Goldilocks2 => &self.goldilocks_2,
            RegimeBucket::Chaos => &self.chaos,
        }
    }

    /// Trades in a user-facing regime group. Metrics are never pooled across
    /// the buckets of a group, only counts.
    pub fn display_trade_count(&self, display: DisplayRegime) -> usize {
        RegimeBucket::ALL
            .iter()
            .filter(|b| b.display() == display)
            .map(|b| self.get(*b).trade_count)
            .sum()
    }

    /// Trades in the user-facing "Goldilocks" bucket (both sub-buckets).
    pub fn goldilocks_trade_count(&self) -> usize {
        self.display_trade_count(DisplayRegime::Goldilocks)
    }

    pub fn eq_ignoring_generated_at(&self, other: &Self) -> bool {
        self.version == other.version
            && self.reference_time == other.reference_time
            && self.window == other.window
            && RegimeBucket::ALL
                .iter()
                .all(|b| self.get(*b).eq_ignoring_generated_at(other.get(*b)))
    }
}

/// Lightweight exposure snapshot: the strategy mix without the other metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyMixExposure {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub reference_time: DateTime<Utc>,
    pub window: RollingWindow,
    pub trade_count: usize,
    pub mix: StrategyMix,
}
