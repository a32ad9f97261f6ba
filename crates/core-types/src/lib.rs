pub mod enums;
pub mod error;
pub mod trade;

// Re-export the core types to provide a clean public API.
pub use enums::{
    DisplayRegime, OutcomeType, PriceZone, RegimeBucket, RollingWindow, SessionBucket,
    StrategyCategory,
};
pub use error::CoreError;
pub use trade::{R_MULTIPLE_TOLERANCE, TradeRecord, TradeRecordParams};
