use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid version string '{0}': expected MAJOR.MINOR.PATCH")]
    InvalidVersion(String),
}
