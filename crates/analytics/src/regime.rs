//! Fixed-threshold VIX regime classification and segmentation.

use core_types::{RegimeBucket, TradeRecord};

/// Upper (inclusive) VIX bound of Zombieland.
pub const ZOMBIELAND_MAX_VIX: f64 = 17.0;
/// Upper (inclusive) VIX bound of the first Goldilocks bucket.
pub const GOLDILOCKS_1_MAX_VIX: f64 = 24.0;
/// Upper (inclusive) VIX bound of the second Goldilocks bucket. Anything above is Chaos.
pub const GOLDILOCKS_2_MAX_VIX: f64 = 32.0;

/// Maps a VIX reading to its bucket.
///
/// Called once per trade, at entry, by whoever builds the `TradeRecord`. The
/// engine itself never reclassifies a trade.
pub fn classify_vix(vix: f64) -> RegimeBucket {
    if vix <= ZOMBIELAND_MAX_VIX {
        RegimeBucket::Zombieland
    } else if vix <= GOLDILOCKS_1_MAX_VIX {
        RegimeBucket::Goldilocks1
    } else if vix <= GOLDILOCKS_2_MAX_VIX {
        RegimeBucket::Goldilocks2
    } else {
        RegimeBucket::Chaos
    }
}

/// True for either Goldilocks sub-bucket. Display aggregation only.
pub fn is_goldilocks(bucket: RegimeBucket) -> bool {
    matches!(bucket, RegimeBucket::Goldilocks1 | RegimeBucket::Goldilocks2)
}

/// Trades partitioned by their pre-assigned regime, one slot per bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegimeSegments {
    pub zombieland: Vec<TradeRecord>,
    pub goldilocks_1: Vec<TradeRecord>,
    pub goldilocks_2: Vec<TradeRecord>,
    pub chaos: Vec<TradeRecord>,
}

impl RegimeSegments {
    pub fn get(&self, bucket: RegimeBucket) -> &[TradeRecord] {
        match bucket {
            RegimeBucket::Zombieland => &self.zombieland,
            RegimeBucket::Goldilocks1 => &self.goldilocks_1,
            RegimeBucket::Goldilocks2 => &self.goldilocks_2,
            RegimeBucket::Chaos => &self.chaos,
        }
    }

    fn slot_mut(&mut self, bucket: RegimeBucket) -> &mut Vec<TradeRecord> {
        match bucket {
            RegimeBucket::Zombieland => &mut self.zombieland,
            RegimeBucket::Goldilocks1 => &mut self.goldilocks_1,
            RegimeBucket::Goldilocks2 => &mut self.goldilocks_2,
            RegimeBucket::Chaos => &mut self.chaos,
        }
    }
}

/// Groups trades by `TradeRecord::regime`. Order within each slot follows the input.
pub fn segment(trades: &[TradeRecord]) -> RegimeSegments {
    let mut segments = RegimeSegments::default();
    for trade in trades {
        segments.slot_mut(trade.regime()).push(trade.clone());
    }
    segments
}
