use crate::signature::slugify;
use core_types::StrategyCategory;
use std::collections::HashMap;

/// Label tokens that identify a calendar, diagonal or event play.
const EVENT_KEYWORDS: &[&str] = &["calendar", "diagonal", "event", "earnings", "compression"];

/// Label tokens that identify a debit or long-volatility structure.
const CONVEX_KEYWORDS: &[&str] = &["debit", "long", "backspread", "convex", "expansion"];

/// Label tokens that identify a credit or short-premium structure.
const PREMIUM_KEYWORDS: &[&str] = &[
    "credit", "short", "condor", "covered", "wheel", "premium", "collection", "sold",
];

/// Maps free-form strategy labels onto the closed category set.
///
/// Exact aliases win. Otherwise the label's tokens are matched against the
/// event, convex and premium keyword lists, in that order, so "Long Calendar"
/// is an event play and "Long Straddle" is convex.
#[derive(Debug, Clone, Default)]
pub struct StrategyMapper {
    aliases: HashMap<String, StrategyCategory>,
}

impl StrategyMapper {
    pub fn new(aliases: &HashMap<String, StrategyCategory>) -> Self {
        Self {
            aliases: aliases
                .iter()
                .map(|(label, category)| (slugify(label), *category))
                .collect(),
        }
    }

    pub fn map(&self, label: &str) -> Option<StrategyCategory> {
        let slug = slugify(label);
        if let Some(category) = self.aliases.get(&slug) {
            return Some(*category);
        }

        let tokens: Vec<&str> = slug.split('_').collect();
        let matches = |keywords: &[&str]| tokens.iter().any(|t| keywords.contains(t));

        if matches(EVENT_KEYWORDS) {
            Some(StrategyCategory::EventCompression)
        } else if matches(CONVEX_KEYWORDS) {
            Some(StrategyCategory::ConvexExpansion)
        } else if matches(PREMIUM_KEYWORDS) {
            Some(StrategyCategory::PremiumCollection)
        } else {
            None
        }
    }
}
