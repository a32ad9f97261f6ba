use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{AdapterSettings, Defaults, LogFormat, LoggingSettings, Settings};

/// Prefix for environment overrides, e.g. `RISKSHAPE__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "RISKSHAPE";

/// Loads the application configuration from the `config.toml` file.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Loads configuration from `path` (optional, may be absent) layered under
/// `RISKSHAPE__*` environment variables, then validates it.
pub fn load_config_from(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;

    Ok(settings)
}

/// Parses configuration from TOML text, without environment overrides.
pub fn load_config_from_str(toml: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Settings>()?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.adapter.minor_units_per_major == 0 {
        return Err(ConfigError::ValidationError(
            "adapter.minor_units_per_major must be greater than 0".to_string(),
        ));
    }
    if settings.logging.level.parse::<tracing::Level>().is_err() {
        return Err(ConfigError::ValidationError(format!(
            "logging.level '{}' is not a valid level",
            settings.logging.level
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{RollingWindow, StrategyCategory};
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = load_config_from_str("").unwrap();
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert_eq!(settings.adapter.minor_units_per_major, 100);
        assert_eq!(settings.defaults.window, RollingWindow::Days30);
    }

    #[test]
    fn test_full_config() {
        let settings = load_config_from_str(
            r#"
            [logging]
            level = "debug"
            format = "json"
            directory = "logs"

            [adapter]
            minor_units_per_major = 1000

            [adapter.strategy_aliases]
            wheel = "premium_collection"
            earnings_crush = "event_compression"

            [defaults]
            window = "90d"
            "#,
        )
        .unwrap();

        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.directory.as_deref(), Some(Path::new("logs")));
        assert_eq!(settings.adapter.minor_units_per_major, 1000);
        assert_eq!(
            settings.adapter.strategy_aliases.get("wheel"),
            Some(&StrategyCategory::PremiumCollection)
        );
        assert_eq!(settings.defaults.window, RollingWindow::Days90);
    }

    #[test]
    fn test_unsupported_window_is_rejected() {
        assert!(load_config_from_str("[defaults]\nwindow = \"14d\"").is_err());
    }

    #[test]
    fn test_zero_minor_units_is_rejected() {
        let err = load_config_from_str("[adapter]\nminor_units_per_major = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.adapter.minor_units_per_major, 100);
    }

    #[test]
    fn test_loads_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();
        let settings = load_config_from(file.path()).unwrap();
        assert_eq!(settings.logging.level, "warn");
    }
}
