//! Error types for the viewer.

use thiserror::Error;

/// Main error type for the viewer.
#[derive(Error, Debug)]
pub enum Error {
    /// The intensity field received a string that does not parse to a
    /// finite number. The previously stored value is kept.
    #[error("invalid intensity input: {input:?}")]
    InvalidIntensityInput { input: String },

    /// A per-frame update ran while no scene was mounted.
    #[error("mesh not ready: no scene is mounted")]
    MeshNotReady,

    /// A bundled asset could not be read or parsed.
    #[error("failed to load asset {path:?}: {reason}")]
    AssetLoadFailed { path: String, reason: String },

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias using the viewer's Error type.
pub type Result<T> = std::result::Result<T, Error>;
