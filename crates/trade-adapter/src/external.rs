use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

// Field names follow the journal export, which is camelCase JSON.

/// A closed (or supposedly closed) trade as exported by the trade journal.
///
/// Everything the journal may leave blank is optional here; `TradeAdapter`
/// decides what is admissible.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalTrade {
    pub id: String,
    /// Free-form strategy name, e.g. "Iron Condor" or "Earnings Calendar".
    pub strategy_label: String,
    #[serde(default)]
    pub structure: Option<String>,
    #[serde(default)]
    pub option_type: Option<String>,
    #[serde(default)]
    pub wing_width: Option<Decimal>,
    pub entry_time: DateTime<Utc>,
    #[serde(default)]
    pub exit_time: Option<DateTime<Utc>>,
    /// Capital at risk in minor currency units (cents).
    #[serde(default)]
    pub risk_minor: Option<i64>,
    /// Realized P&L in minor currency units.
    #[serde(default)]
    pub pnl_minor: Option<i64>,
    #[serde(default)]
    pub r_multiple: Option<f64>,
    /// Regime label assigned at entry. Takes precedence over `entry_vix`.
    #[serde(default)]
    pub regime: Option<String>,
    #[serde(default)]
    pub entry_vix: Option<f64>,
    pub session: String,
    pub price_zone: String,
    pub outcome: String,
}
