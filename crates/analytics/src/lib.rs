//! # Distribution Core
//!
//! The single source of truth for return-distribution and risk-structure
//! metrics over a portfolio's closed trades. Dashboards, scorers and governance
//! read these results instead of computing their own statistics.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O, no persistence, no retries. It depends only on
//!   `core-types`.
//! - **Stateless calculation:** every pipeline takes an immutable slice of
//!   `TradeRecord`s and returns a fresh, versioned result. Identical inputs and
//!   reference time give identical results apart from `generated_at`.
//! - **Frozen contracts:** formulas, edge-case policy and normalization bounds
//!   are pinned to `ENGINE_VERSION`.
//!
//! ## Public API
//!
//! - `DistributionEngine` and the `compute_*` pipelines.
//! - `DistributionResult`, `RegimeDistributionResult`, `StrategyMixExposure`:
//!   the outbound snapshots.
//! - The stage modules (`window`, `regime`, `metrics`, `drawdown`,
//!   `normalization`, `version`) for callers that need a single formula.

pub mod drawdown;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod normalization;
pub mod regime;
pub mod report;
pub mod version;
pub mod window;

#[cfg(test)]
mod fixtures;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{
    DistributionEngine, compute_distribution_metrics, compute_regime_segmented_metrics,
    compute_strategy_mix,
};
pub use error::AnalyticsError;
pub use normalization::{BOUNDS, NormalizationBounds, composite_integrity_index};
pub use regime::{RegimeSegments, classify_vix, is_goldilocks};
pub use report::{
    DistributionResult, DrawdownPeriod, DrawdownProfile, RegimeDistributionResult, StrategyMix,
    StrategyMixExposure,
};
pub use version::{ENGINE_VERSION, is_compatible, parse_version};
pub use window::MIN_SAMPLE_SIZE;
