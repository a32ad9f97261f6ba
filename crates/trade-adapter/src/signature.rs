//! Structure signatures: display-only grouping keys such as `butterfly_call_25`.

use rust_decimal::Decimal;

/// Lowercases `text` and collapses every run of non-alphanumeric characters
/// into a single underscore.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Builds `{structure}_{option_type}_{wing_width}`, skipping absent or blank
/// parts. With no parts at all the slugged strategy label is used instead.
pub fn structure_signature(
    structure: Option<&str>,
    option_type: Option<&str>,
    wing_width: Option<Decimal>,
    strategy_label: &str,
) -> String {
    let parts: Vec<String> = [
        structure.map(slugify),
        option_type.map(slugify),
        wing_width.map(|w| slugify(&w.normalize().to_string())),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        slugify(strategy_label)
    } else {
        parts.join("_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Iron Condor"), "iron_condor");
        assert_eq!(slugify("  Put--Credit  Spread "), "put_credit_spread");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_full_signature() {
        assert_eq!(
            structure_signature(Some("Butterfly"), Some("CALL"), Some(dec!(25)), "Fly"),
            "butterfly_call_25"
        );
    }

    #[test]
    fn test_fractional_wing_width_drops_trailing_zeros() {
        assert_eq!(
            structure_signature(Some("vertical"), Some("put"), Some(dec!(2.50)), "x"),
            "vertical_put_2_5"
        );
    }

    #[test]
    fn test_absent_parts_are_skipped() {
        assert_eq!(
            structure_signature(Some("Iron Condor"), None, Some(dec!(10)), "IC"),
            "iron_condor_10"
        );
    }

    #[test]
    fn test_falls_back_to_label() {
        assert_eq!(
            structure_signature(None, Some("  "), None, "Earnings Calendar"),
            "earnings_calendar"
        );
    }
}
