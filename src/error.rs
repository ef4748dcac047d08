use std::fmt;

use thiserror::Error;

/// Top-level error type for the point collection engine.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Coarse classification of a [`CollectError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required reference is unset.
    MissingInput,
    /// A transform chain is broken or cannot be inverted.
    TransformUnresolved,
    /// The output reference is neither a labeled list nor a mesh.
    UnsupportedSinkType,
    /// Anchor and sampling frames coincide, or a scalar is out of range.
    InvalidConfiguration,
    /// A persisted value could not be interpreted.
    UnrecognizedPersistedValue,
}

impl CollectError {
    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(ConfigError::MissingInput(_)) => ErrorKind::MissingInput,
            Self::Config(ConfigError::InvalidConfiguration(_)) => {
                ErrorKind::InvalidConfiguration
            }
            Self::Config(
                ConfigError::UnrecognizedPersistedValue { .. } | ConfigError::Malformed(_),
            ) => ErrorKind::UnrecognizedPersistedValue,
            Self::Transform(_) => ErrorKind::TransformUnresolved,
            Self::Sink(SinkError::UnsupportedSinkType(_)) => ErrorKind::UnsupportedSinkType,
            Self::Sink(SinkError::NotFound) => ErrorKind::MissingInput,
        }
    }
}

/// The configuration slot a [`ConfigError::MissingInput`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    SamplingFrame,
    AnchorFrame,
    Output,
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SamplingFrame => "sampling frame",
            Self::AnchorFrame => "anchor frame",
            Self::Output => "output",
        })
    }
}

/// Errors related to the collection configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no {0} set")]
    MissingInput(InputRole),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unrecognized value {value:?} for attribute {attribute}")]
    UnrecognizedPersistedValue {
        attribute: &'static str,
        value: String,
    },

    #[error("malformed persisted settings: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors related to resolving spatial transforms.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("transform unresolved: {0}")]
    Unresolved(String),
}

/// Errors related to output point sinks.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("unsupported sink type: {0}")]
    UnsupportedSinkType(String),

    #[error("output node not found")]
    NotFound,
}

/// Convenience type alias for results using [`CollectError`].
pub type Result<T> = std::result::Result<T, CollectError>;
