use crate::error::AdapterError;
use crate::external::ExternalTrade;
use crate::mapping::StrategyMapper;
use crate::signature::structure_signature;
use analytics::classify_vix;
use configuration::AdapterSettings;
use core_types::{
    OutcomeType, PriceZone, RegimeBucket, SessionBucket, TradeRecord, TradeRecordParams,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// Why an external trade did not become a `TradeRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The trade is still open.
    MissingExitTime,
    NonPositiveRisk,
    MissingPnl,
    MissingRMultiple,
    UnmappedStrategy,
    /// A session, price-zone, outcome or regime label that is not recognised.
    UnparseableField(&'static str),
    /// Neither a regime label nor a usable entry VIX.
    MissingRegime,
}

impl SkipReason {
    /// Incomplete trades are routine and only logged at debug level.
    pub fn is_routine(&self) -> bool {
        matches!(
            self,
            SkipReason::MissingExitTime
                | SkipReason::NonPositiveRisk
                | SkipReason::MissingPnl
                | SkipReason::MissingRMultiple
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingExitTime => write!(f, "no exit time"),
            SkipReason::NonPositiveRisk => write!(f, "missing or non-positive risk"),
            SkipReason::MissingPnl => write!(f, "no realized P&L"),
            SkipReason::MissingRMultiple => write!(f, "no R-multiple"),
            SkipReason::UnmappedStrategy => write!(f, "strategy label matches no category"),
            SkipReason::UnparseableField(field) => write!(f, "unrecognised {field}"),
            SkipReason::MissingRegime => write!(f, "no regime and no entry VIX"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTrade {
    pub trade_id: String,
    pub reason: SkipReason,
}

/// The outcome of converting a batch of external trades.
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    pub records: Vec<TradeRecord>,
    pub skipped: Vec<SkippedTrade>,
}

enum Screened {
    Admit(TradeRecordParams),
    Skip(SkipReason),
}

/// Converts journal exports into validated `TradeRecord`s.
#[derive(Debug, Clone)]
pub struct TradeAdapter {
    mapper: StrategyMapper,
    minor_units_per_major: Decimal,
}

impl TradeAdapter {
    pub fn new(settings: &AdapterSettings) -> Result<Self, AdapterError> {
        if settings.minor_units_per_major == 0 {
            return Err(AdapterError::InvalidSettings(
                "minor_units_per_major must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            mapper: StrategyMapper::new(&settings.strategy_aliases),
            minor_units_per_major: Decimal::from(settings.minor_units_per_major),
        })
    }

    /// Converts every admissible trade, preserving input order.
    ///
    /// Inadmissible trades are skipped and reported. A trade that passes
    /// screening but is rejected by `TradeRecord::new` aborts the conversion.
    #[instrument(name = "convert_trades", skip_all, fields(count = trades.len()))]
    pub fn convert(&self, trades: &[ExternalTrade]) -> Result<ConversionReport, AdapterError> {
        let mut report = ConversionReport::default();

        for trade in trades {
            match self.screen(trade)? {
                Screened::Admit(params) => {
                    let record = TradeRecord::new(params).map_err(|source| {
                        AdapterError::Construction {
                            trade_id: trade.id.clone(),
                            source,
                        }
                    })?;
                    report.records.push(record);
                }
                Screened::Skip(reason) => {
                    if reason.is_routine() {
                        debug!(trade_id = %trade.id, %reason, "Skipping trade");
                    } else {
                        warn!(trade_id = %trade.id, label = %trade.strategy_label, %reason, "Skipping trade");
                    }
                    report.skipped.push(SkippedTrade {
                        trade_id: trade.id.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            converted = report.records.len(),
            skipped = report.skipped.len(),
            "Trade conversion complete"
        );
        Ok(report)
    }

    fn screen(&self, trade: &ExternalTrade) -> Result<Screened, AdapterError> {
        let Some(exit_time) = trade.exit_time else {
            return Ok(Screened::Skip(SkipReason::MissingExitTime));
        };
        let risk_minor = match trade.risk_minor {
            Some(risk) if risk > 0 => risk,
            _ => return Ok(Screened::Skip(SkipReason::NonPositiveRisk)),
        };
        let Some(pnl_minor) = trade.pnl_minor else {
            return Ok(Screened::Skip(SkipReason::MissingPnl));
        };
        let Some(r_multiple) = trade.r_multiple else {
            return Ok(Screened::Skip(SkipReason::MissingRMultiple));
        };

        let Some(strategy) = self.mapper.map(&trade.strategy_label) else {
            return Ok(Screened::Skip(SkipReason::UnmappedStrategy));
        };
        let classified = resolve_regime(trade).and_then(|regime| {
            Ok((
                regime,
                parse_field::<SessionBucket>(&trade.session, "session")?,
                parse_field::<PriceZone>(&trade.price_zone, "price_zone")?,
                parse_field::<OutcomeType>(&trade.outcome, "outcome")?,
            ))
        });
        let (regime, session, price_zone, outcome) = match classified {
            Ok(classified) => classified,
            Err(reason) => return Ok(Screened::Skip(reason)),
        };

        Ok(Screened::Admit(TradeRecordParams {
            trade_id: trade.id.clone(),
            strategy,
            structure_signature: structure_signature(
                trade.structure.as_deref(),
                trade.option_type.as_deref(),
                trade.wing_width,
                &trade.strategy_label,
            ),
            entry_time: trade.entry_time,
            exit_time,
            risk_unit: self.to_major(risk_minor, &trade.id, "risk")?,
            pnl_realized: self.to_major(pnl_minor, &trade.id, "pnl")?,
            r_multiple,
            regime,
            session,
            price_zone,
            outcome,
        }))
    }

    fn to_major(&self, minor: i64, trade_id: &str, field: &'static str) -> Result<f64, AdapterError> {
        Decimal::from(minor)
            .checked_div(self.minor_units_per_major)
            .and_then(|major| major.to_f64())
            .ok_or_else(|| AdapterError::Conversion {
                trade_id: trade_id.to_string(),
                field,
            })
    }
}

/// An explicit regime label wins; otherwise the entry VIX is classified.
fn resolve_regime(trade: &ExternalTrade) -> Result<RegimeBucket, SkipReason> {
    if let Some(label) = &trade.regime {
        return parse_field(label, "regime");
    }
    match trade.entry_vix {
        Some(vix) if vix.is_finite() && vix >= 0.0 => Ok(classify_vix(vix)),
        _ => Err(SkipReason::MissingRegime),
    }
}

fn parse_field<T: FromStr>(text: &str, field: &'static str) -> Result<T, SkipReason> {
    text.parse().map_err(|_| SkipReason::UnparseableField(field))
}
