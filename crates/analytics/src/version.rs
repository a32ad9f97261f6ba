//! Semantic version tagging for every result the engine produces.
//!
//! Bump policy: patch for bugfixes, minor when a metric is added, major for any
//! change to a formula or to the normalization bounds. Consumers must check
//! major-version compatibility before reading a result's fields.

use crate::error::AnalyticsError;

/// The version attached to every `DistributionResult`, `RegimeDistributionResult`
/// and `StrategyMixExposure`.
pub const ENGINE_VERSION: &str = "1.0.0";

/// Parses "MAJOR.MINOR.PATCH". Anything else (missing parts, extra parts,
/// non-numeric parts, pre-release suffixes) is rejected.
pub fn parse_version(version: &str) -> Result<(u32, u32, u32), AnalyticsError> {
    let invalid = || AnalyticsError::InvalidVersion(version.to_string());

    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let mut numbers = [0u32; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        // `u32::from_str` tolerates a leading '+', which is not a valid version digit.
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *slot = part.parse().map_err(|_| invalid())?;
    }

    Ok((numbers[0], numbers[1], numbers[2]))
}

/// True when `version` shares the engine's major version.
///
/// An unparseable version is never compatible.
pub fn is_compatible(version: &str) -> bool {
    is_compatible_with(version, ENGINE_VERSION)
}

/// True when both versions parse and share a major version.
pub fn is_compatible_with(version: &str, reference: &str) -> bool {
    match (parse_version(version), parse_version(reference)) {
        (Ok((major, _, _)), Ok((reference_major, _, _))) => major == reference_major,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version_parses() {
        assert_eq!(parse_version(ENGINE_VERSION).unwrap(), (1, 0, 0));
    }

    #[test]
    fn test_parse_rejects_malformed_versions() {
        for bad in ["", "1", "1.0", "1.0.0.0", "1.a.0", "v1.0.0", "1.0.0-beta", "1..0", "+1.0.0"] {
            assert!(parse_version(bad).is_err(), "expected '{bad}' to be rejected");
        }
    }

    #[test]
    fn test_compatibility_is_same_major() {
        assert!(is_compatible("1.0.0"));
        assert!(is_compatible("1.4.2"));
        assert!(!is_compatible("2.0.0"));
        assert!(!is_compatible("0.9.9"));
        assert!(!is_compatible("garbage"));
        assert!(is_compatible_with("3.1.0", "3.0.7"));
    }
}
