use chrono::{DateTime, Utc};
use core_types::{RollingWindow, TradeRecord};

use crate::drawdown;
use crate::metrics;
use crate::normalization::composite_integrity_index;
use crate::regime;
use crate::report::{DistributionResult, RegimeDistributionResult, StrategyMixExposure};
use crate::version::ENGINE_VERSION;
use crate::window;

/// A stateless calculator for the distribution, regime and exposure pipelines.
///
/// The only thing it holds is an optional pinned reference time. Leave it unset
/// to window against "now"; pin it for deterministic replay.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistributionEngine {
    reference_time: Option<DateTime<Utc>>,
}

impl DistributionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine that always windows against `reference_time`.
    pub fn with_reference_time(reference_time: DateTime<Utc>) -> Self {
        Self {
            reference_time: Some(reference_time),
        }
    }

    fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time.unwrap_or_else(Utc::now)
    }

    /// Window-filters the trades and computes every distribution metric.
    ///
    /// # Arguments
    ///
    /// * `trades` - Closed trades in any order.
    /// * `window` - Which lookback to apply before computing.
    ///
    /// # Returns
    ///
    /// A result with every metric `None` when fewer than `MIN_SAMPLE_SIZE`
    /// trades survive the window; a fully computed result otherwise.
    #[tracing::instrument(name = "distribution_metrics", skip(self, trades), fields(input = trades.len()))]
    pub fn compute_distribution_metrics(
        &self,
        trades: &[TradeRecord],
        window: RollingWindow,
    ) -> DistributionResult {
        let reference_time = self.reference_time();
        let filtered = window::apply(trades, window, reference_time);
        compute_filtered(&filtered, window, reference_time)
    }

    /// Window-filters the trades, partitions them by their entry-time regime, and
    /// runs the full pipeline on each bucket independently.
    #[tracing::instrument(name = "regime_segmented_metrics", skip(self, trades), fields(input = trades.len()))]
    pub fn compute_regime_segmented_metrics(
        &self,
        trades: &[TradeRecord],
        window: RollingWindow,
    ) -> RegimeDistributionResult {
        let reference_time = self.reference_time();
        let filtered = window::apply(trades, window, reference_time);
        let segments = regime::segment(&filtered);

        // Each bucket is windowed already and sorted by exit time, so it goes
        // straight to the per-bucket pipeline.
        RegimeDistributionResult {
            version: ENGINE_VERSION.to_string(),
            generated_at: Utc::now(),
            reference_time,
            window,
            zombieland: compute_filtered(&segments.zombieland, window, reference_time),
            goldilocks_1: compute_filtered(&segments.goldilocks_1, window, reference_time),
            goldilocks_2: compute_filtered(&segments.goldilocks_2, window, reference_time),
            chaos: compute_filtered(&segments.chaos, window, reference_time),
        }
    }

    /// Window-filters the trades and reports only the strategy mix.
    #[tracing::instrument(name = "strategy_mix", skip(self, trades), fields(input = trades.len()))]
    pub fn compute_strategy_mix(
        &self,
        trades: &[TradeRecord],
        window: RollingWindow,
    ) -> StrategyMixExposure {
        let reference_time = self.reference_time();
        let filtered = window::apply(trades, window, reference_time);

        StrategyMixExposure {
            version: ENGINE_VERSION.to_string(),
            generated_at: Utc::now(),
            reference_time,
            window,
            trade_count: filtered.len(),
            mix: metrics::strategy_mix(&filtered),
        }
    }
}

/// The metric stage proper, over trades already windowed and sorted.
fn compute_filtered(
    trades: &[TradeRecord],
    window: RollingWindow,
    reference_time: DateTime<Utc>,
) -> DistributionResult {
    if !window::meets_minimum_sample(trades) {
        tracing::info!(
            trade_count = trades.len(),
            minimum = window::MIN_SAMPLE_SIZE,
            "Sample below minimum, metrics withheld"
        );
        return DistributionResult::insufficient(window, reference_time, trades.len());
    }

    let r = metrics::r_multiples(trades);
    let r = r.view();

    let skew = metrics::skew(r);
    let ltc = metrics::left_tail_containment(r);
    let rocpr = metrics::rocpr(trades);
    let drawdown = drawdown::compute_profile(trades);
    let cii = composite_integrity_index(skew, ltc, rocpr, Some(drawdown.volatility));

    tracing::debug!(
        trade_count = trades.len(),
        ?skew,
        ?ltc,
        ?rocpr,
        drawdown_volatility = drawdown.volatility,
        ?cii,
        "Computed distribution metrics"
    );

    DistributionResult {
        version: ENGINE_VERSION.to_string(),
        generated_at: Utc::now(),
        reference_time,
        window,
        trade_count: trades.len(),
        skew,
        excess_kurtosis: metrics::excess_kurtosis(r),
        ltc,
        rocpr,
        avg_winner: metrics::avg_winner(r),
        avg_loser: metrics::avg_loser(r),
        win_loss_ratio: metrics::win_loss_ratio(r),
        profit_factor: metrics::profit_factor(r),
        right_tail_contribution: metrics::right_tail_contribution(r),
        left_tail_contribution: metrics::left_tail_contribution(r),
        tail_ratio: metrics::tail_ratio(r),
        drawdown: Some(drawdown),
        strategy_mix: Some(metrics::strategy_mix(trades)),
        cii,
    }
}

/// [`DistributionEngine::compute_distribution_metrics`] with an explicit reference time.
pub fn compute_distribution_metrics(
    trades: &[TradeRecord],
    window: RollingWindow,
    reference_time: DateTime<Utc>,
) -> DistributionResult {
    DistributionEngine::with_reference_time(reference_time).compute_distribution_metrics(trades, window)
}

/// [`DistributionEngine::compute_regime_segmented_metrics`] with an explicit reference time.
pub fn compute_regime_segmented_metrics(
    trades: &[TradeRecord],
    window: RollingWindow,
    reference_time: DateTime<Utc>,
) -> RegimeDistributionResult {
    DistributionEngine::with_reference_time(reference_time)
        .compute_regime_segmented_metrics(trades, window)
}

/// [`DistributionEngine::compute_strategy_mix`] with an explicit reference time.
pub fn compute_strategy_mix(
    trades: &[TradeRecord],
    window: RollingWindow,
    reference_time: DateTime<Utc>,
) -> StrategyMixExposure {
    DistributionEngine::with_reference_time(reference_time).compute_strategy_mix(trades, window)
}
