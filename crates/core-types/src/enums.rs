use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of strategy categories a trade can belong to.
///
/// Free-form strategy labels from upstream systems are mapped onto one of these
/// by the trade adapter; nothing else is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyCategory {
    ConvexExpansion,
    EventCompression,
    PremiumCollection,
}

impl StrategyCategory {
    pub const ALL: [StrategyCategory; 3] = [
        StrategyCategory::ConvexExpansion,
        StrategyCategory::EventCompression,
        StrategyCategory::PremiumCollection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyCategory::ConvexExpansion => "convex_expansion",
            StrategyCategory::EventCompression => "event_compression",
            StrategyCategory::PremiumCollection => "premium_collection",
        }
    }
}

impl FromStr for StrategyCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "convex_expansion" => Ok(StrategyCategory::ConvexExpansion),
            "event_compression" => Ok(StrategyCategory::EventCompression),
            "premium_collection" => Ok(StrategyCategory::PremiumCollection),
            _ => Err(unknown("strategy category", s)),
        }
    }
}

/// Volatility regime assigned to a trade once, at entry time, from the VIX level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimeBucket {
    /// VIX <= 17
    Zombieland,
    /// 17 < VIX <= 24
    #[serde(rename = "goldilocks_1")]
    Goldilocks1,
    /// 24 < VIX <= 32
    #[serde(rename = "goldilocks_2")]
    Goldilocks2,
    /// VIX > 32
    Chaos,
}

impl RegimeBucket {
    pub const ALL: [RegimeBucket; 4] = [
        RegimeBucket::Zombieland,
        RegimeBucket::Goldilocks1,
        RegimeBucket::Goldilocks2,
        RegimeBucket::Chaos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegimeBucket::Zombieland => "zombieland",
            RegimeBucket::Goldilocks1 => "goldilocks_1",
            RegimeBucket::Goldilocks2 => "goldilocks_2",
            RegimeBucket::Chaos => "chaos",
        }
    }

    /// The user-facing bucket. Both Goldilocks sub-buckets collapse into one.
    pub fn display(&self) -> DisplayRegime {
        match self {
            RegimeBucket::Zombieland => DisplayRegime::Zombieland,
            RegimeBucket::Goldilocks1 | RegimeBucket::Goldilocks2 => DisplayRegime::Goldilocks,
            RegimeBucket::Chaos => DisplayRegime::Chaos,
        }
    }
}

impl FromStr for RegimeBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "zombieland" => Ok(RegimeBucket::Zombieland),
            "goldilocks_1" | "goldilocks1" => Ok(RegimeBucket::Goldilocks1),
            "goldilocks_2" | "goldilocks2" => Ok(RegimeBucket::Goldilocks2),
            "chaos" => Ok(RegimeBucket::Chaos),
            _ => Err(unknown("regime bucket", s)),
        }
    }
}

/// Display-only aggregation of `RegimeBucket`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayRegime {
    Zombieland,
    Goldilocks,
    Chaos,
}

impl DisplayRegime {
    pub const ALL: [DisplayRegime; 3] = [
        DisplayRegime::Zombieland,
        DisplayRegime::Goldilocks,
        DisplayRegime::Chaos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayRegime::Zombieland => "zombieland",
            DisplayRegime::Goldilocks => "goldilocks",
            DisplayRegime::Chaos => "chaos",
        }
    }
}

/// Trading session segment in which the trade was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionBucket {
    Open,
    Midday,
    Close,
}

impl FromStr for SessionBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "open" => Ok(SessionBucket::Open),
            "midday" => Ok(SessionBucket::Midday),
            "close" => Ok(SessionBucket::Close),
            _ => Err(unknown("session bucket", s)),
        }
    }
}

/// Where the underlying traded relative to its recent range at entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceZone {
    Low,
    Mid,
    High,
}

impl FromStr for PriceZone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" => Ok(PriceZone::Low),
            "mid" => Ok(PriceZone::Mid),
            "high" => Ok(PriceZone::High),
            _ => Err(unknown("price zone", s)),
        }
    }
}

/// The exit plan the trade was opened under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeType {
    ProfitTarget,
    StopLoss,
    TimeExit,
    Expiry,
}

impl FromStr for OutcomeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "profit_target" => Ok(OutcomeType::ProfitTarget),
            "stop_loss" => Ok(OutcomeType::StopLoss),
            "time_exit" => Ok(OutcomeType::TimeExit),
            "expiry" => Ok(OutcomeType::Expiry),
            _ => Err(unknown("outcome type", s)),
        }
    }
}

/// The four supported lookback windows. Arbitrary ranges are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RollingWindow {
    #[serde(rename = "7d")]
    Days7,
    #[serde(rename = "30d")]
    Days30,
    #[serde(rename = "90d")]
    Days90,
    #[serde(rename = "180d")]
    Days180,
}

impl RollingWindow {
    pub const ALL: [RollingWindow; 4] = [
        RollingWindow::Days7,
        RollingWindow::Days30,
        RollingWindow::Days90,
        RollingWindow::Days180,
    ];

    /// Length of the window in calendar days.
    pub fn days(&self) -> i64 {
        match self {
            RollingWindow::Days7 => 7,
            RollingWindow::Days30 => 30,
            RollingWindow::Days90 => 90,
            RollingWindow::Days180 => 180,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RollingWindow::Days7 => "7d",
            RollingWindow::Days30 => "30d",
            RollingWindow::Days90 => "90d",
            RollingWindow::Days180 => "180d",
        }
    }
}

impl FromStr for RollingWindow {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        let days = trimmed.strip_suffix('d').unwrap_or(&trimmed);
        match days {
            "7" => Ok(RollingWindow::Days7),
            "30" => Ok(RollingWindow::Days30),
            "90" => Ok(RollingWindow::Days90),
            "180" => Ok(RollingWindow::Days180),
            _ => Err(unknown("rolling window", s)),
        }
    }
}

impl fmt::Display for StrategyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RegimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RollingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercases and folds separators so "Premium Collection" and "premium-collection" both parse.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

fn unknown(kind: &'static str, value: &str) -> CoreError {
    CoreError::UnknownVariant {
        kind,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_category_parses_loose_spelling() {
        assert_eq!(
            "Premium Collection".parse::<StrategyCategory>().unwrap(),
            StrategyCategory::PremiumCollection
        );
        assert_eq!(
            "convex-expansion".parse::<StrategyCategory>().unwrap(),
            StrategyCategory::ConvexExpansion
        );
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        assert!("iron_condor".parse::<StrategyCategory>().is_err());
        assert!("goldilocks".parse::<RegimeBucket>().is_err());
        assert!("overnight".parse::<SessionBucket>().is_err());
        assert!("extreme".parse::<PriceZone>().is_err());
        assert!("assigned".parse::<OutcomeType>().is_err());
    }

    #[test]
    fn test_rolling_window_only_accepts_the_four_durations() {
        assert_eq!("7d".parse::<RollingWindow>().unwrap(), RollingWindow::Days7);
        assert_eq!("30".parse::<RollingWindow>().unwrap(), RollingWindow::Days30);
        assert_eq!("90D".parse::<RollingWindow>().unwrap(), RollingWindow::Days90);
        assert_eq!("180d".parse::<RollingWindow>().unwrap(), RollingWindow::Days180);
        assert!("14d".parse::<RollingWindow>().is_err());
        assert!("365d".parse::<RollingWindow>().is_err());
    }

    #[test]
    fn test_goldilocks_buckets_share_a_display_bucket() {
        assert_eq!(RegimeBucket::Goldilocks1.display(), DisplayRegime::Goldilocks);
        assert_eq!(RegimeBucket::Goldilocks2.display(), DisplayRegime::Goldilocks);
        assert_eq!(RegimeBucket::Chaos.display(), DisplayRegime::Chaos);
        assert_eq!(DisplayRegime::Goldilocks.as_str(), "goldilocks");
        assert_eq!(
            serde_json::to_string(&DisplayRegime::Goldilocks).unwrap(),
            format!("\"{}\"", DisplayRegime::Goldilocks.as_str())
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&RegimeBucket::Goldilocks1).unwrap();
        assert_eq!(json, "\"goldilocks_1\"");
        let window: RollingWindow = serde_json::from_str("\"90d\"").unwrap();
        assert_eq!(window, RollingWindow::Days90);
    }
}
