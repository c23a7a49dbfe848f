use thiserror::Error;

/// Why the ship asset never made it into the scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("asset request returned HTTP {0}")]
    Http(u16),
    #[error("could not parse model: {0}")]
    Parse(String),
    #[error("model contains no triangle geometry")]
    NoGeometry,
    #[error("asset load timed out after {0:.1}s")]
    Timeout(f64),
    #[error("asset resolved after its load was already settled or timed out")]
    Late,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("please enter a valid email address")]
    InvalidEmail,
    #[error("a message is already being sent")]
    AlreadySubmitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown scene variant {0:?}")]
    UnknownVariant(String),
    #[error("invalid scene overrides: {0}")]
    Overrides(String),
}
