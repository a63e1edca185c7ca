use std::path::PathBuf;
use thiserror::Error;

use super::models::CatalogKind;

/// Failure to turn a bundled data file into a [`Catalog`](super::models::Catalog).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{kind} catalog not found at {}", path.display())]
    Missing { kind: CatalogKind, path: PathBuf },

    #[error("failed to read {kind} catalog at {}: {source}", path.display())]
    Io {
        kind: CatalogKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} catalog is malformed: {reason}")]
    Malformed { kind: CatalogKind, reason: String },

    #[error("{kind} catalog entry #{index} is missing required field `{field}`")]
    MissingField {
        kind: CatalogKind,
        index: usize,
        field: &'static str,
    },

    #[error("{kind} catalog entry #{index} has an invalid `{field}`: {reason}")]
    InvalidField {
        kind: CatalogKind,
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("unknown catalog `{0}`")]
    UnknownCatalog(String),
}

/// Failure to produce a command string. Never carries partial output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("missing value for `{0}`")]
    MissingParameter(String),

    #[error("invalid value {value:?} for `{name}`: expected {expected}")]
    InvalidParameter {
        name: String,
        value: String,
        expected: String,
    },
}

impl RenderError {
    pub fn invalid(name: &str, value: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Name of the placeholder the error refers to.
    #[must_use]
    pub fn parameter(&self) -> &str {
        match self {
            Self::MissingParameter(name) | Self::InvalidParameter { name, .. } => name,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to write clipboard: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize favorites: {0}")]
    Serialize(#[from] toml::ser::Error),
}
