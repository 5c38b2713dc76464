//! Error kinds for every stage of the pipeline.
//!
//! Decode/load failures abort the whole run before generation starts.
//! [`GenerateError`] aborts a single top-level declaration only.
use std::path::PathBuf;

/// A schema node that did not match its expected shape.
#[derive(Debug, thiserror::Error)]
#[error("at JSON path {path} → {message}")]
pub struct DecodeError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("couldn't read schema file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse schema file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("no scalar spec is provided for scalar: {0}")]
    UnknownScalar(String),
    #[error("unrecognized field spec for field `{field}`")]
    UnrecognizedFieldSpec { field: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ScalarConfigError {
    #[error("couldn't read scalar mapping file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scalar mapping: {0}")]
    Decode(#[from] DecodeError),
    #[error("scalar `{0}` maps to an empty target type")]
    EmptyType(String),
    #[error("scalar `{0}` sets an import alias without an import")]
    AliasWithoutImport(String),
}
