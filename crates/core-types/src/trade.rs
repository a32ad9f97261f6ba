use crate::enums::{OutcomeType, PriceZone, RegimeBucket, SessionBucket, StrategyCategory};
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum allowed gap between a record's R-multiple and `pnl_realized / risk_unit`.
pub const R_MULTIPLE_TOLERANCE: f64 = 1e-6;

/// The raw field set for building a `TradeRecord`.
///
/// This is what collaborators fill in; `TradeRecord::new` decides whether it is
/// admissible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecordParams {
    pub trade_id: String,
    pub strategy: StrategyCategory,
    pub structure_signature: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    pub risk_unit: f64,
    pub pnl_realized: f64,
    pub r_multiple: f64,
    pub regime: RegimeBucket,
    pub session: SessionBucket,
    pub price_zone: PriceZone,
    pub outcome: OutcomeType,
}

/// A single closed trade, validated at construction and immutable afterwards.
///
/// The regime, session, price-zone and outcome classifications are assigned by
/// the collaborator at entry time and are carried as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TradeRecordParams")]
pub struct TradeRecord {
    trade_id: String,
    strategy: StrategyCategory,
    structure_signature: String,
    entry_time: DateTime<Utc>,
    exit_time: DateTime<Utc>,
    risk_unit: f64,
    pnl_realized: f64,
    r_multiple: f64,
    regime: RegimeBucket,
    session: SessionBucket,
    price_zone: PriceZone,
    outcome: OutcomeType,
}

impl TradeRecord {
    /// Validates the parameters and builds the record.
    ///
    /// Fails when `risk_unit` is not strictly positive, or when `r_multiple`
    /// differs from `pnl_realized / risk_unit` by more than `R_MULTIPLE_TOLERANCE`.
    /// Infinite or NaN `risk_unit` and `pnl_realized` are also rejected, so every
    /// record carries finite money values; nothing else is checked.
    pub fn new(params: TradeRecordParams) -> Result<Self, CoreError> {
        if !params.risk_unit.is_finite() || params.risk_unit <= 0.0 {
            return Err(CoreError::InvalidInput(
                "risk_unit".to_string(),
                format!("must be greater than 0, got {}", params.risk_unit),
            ));
        }
        if !params.pnl_realized.is_finite() {
            return Err(CoreError::InvalidInput(
                "pnl_realized".to_string(),
                format!("must be finite, got {}", params.pnl_realized),
            ));
        }

        let implied = params.pnl_realized / params.risk_unit;
        let gap = (params.r_multiple - implied).abs();
        if gap.is_nan() || gap > R_MULTIPLE_TOLERANCE {
            return Err(CoreError::InvalidInput(
                "r_multiple".to_string(),
                format!(
                    "{} is inconsistent with pnl_realized / risk_unit = {}",
                    params.r_multiple, implied
                ),
            ));
        }

        Ok(Self {
            trade_id: params.trade_id,
            strategy: params.strategy,
            structure_signature: params.structure_signature,
            entry_time: params.entry_time,
            exit_time: params.exit_time,
            risk_unit: params.risk_unit,
            pnl_realized: params.pnl_realized,
            r_multiple: params.r_multiple,
            regime: params.regime,
            session: params.session,
            price_zone: params.price_zone,
            outcome: params.outcome,
        })
    }

    pub fn trade_id(&self) -> &str {
        &self.trade_id
    }

    pub fn strategy(&self) -> StrategyCategory {
        self.strategy
    }

    /// Display-only grouping key, e.g. "butterfly_call_25".
    pub fn structure_signature(&self) -> &str {
        &self.structure_signature
    }

    pub fn entry_time(&self) -> DateTime<Utc> {
        self.entry_time
    }

    pub fn exit_time(&self) -> DateTime<Utc> {
        self.exit_time
    }

    pub fn risk_unit(&self) -> f64 {
        self.risk_unit
    }

    pub fn pnl_realized(&self) -> f64 {
        self.pnl_realized
    }

    pub fn r_multiple(&self) -> f64 {
        self.r_multiple
    }

    pub fn regime(&self) -> RegimeBucket {
        self.regime
    }

    pub fn session(&self) -> SessionBucket {
        self.session
    }

    pub fn price_zone(&self) -> PriceZone {
        self.price_zone
    }

    pub fn outcome(&self) -> OutcomeType {
        self.outcome
    }
}

impl TryFrom<TradeRecordParams> for TradeRecord {
    type Error = CoreError;

    fn try_from(params: TradeRecordParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}
