//! # Trade Adapter
//!
//! Turns the trade journal's export format into the validated `TradeRecord`s
//! the distribution engine consumes. Incomplete trades are filtered out here so
//! they never reach record construction.

pub mod adapter;
pub mod error;
pub mod external;
pub mod mapping;
pub mod signature;

pub use adapter::{ConversionReport, SkipReason, SkippedTrade, TradeAdapter};
pub use error::AdapterError;
pub use external::ExternalTrade;
pub use mapping::StrategyMapper;
pub use signature::{slugify, structure_signature};
