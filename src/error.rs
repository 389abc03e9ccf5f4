use std::path::PathBuf;
use thiserror::Error;

use crate::coerce::Kind;
use crate::types::SourceKind;

/// The error returned by an invocation. Names the stage that failed; the first
/// failure aborts every remaining source and the default pass.
#[derive(Debug, Error)]
pub enum CascadeError {
    #[error("failed to cascade {kind}: {source}")]
    Source {
        kind: SourceKind,
        #[source]
        source: SourceError,
    },

    #[error("failed to set default value: {0}")]
    Default(#[source] SourceError),
}

impl CascadeError {
    /// The underlying failure, regardless of stage.
    pub fn source_error(&self) -> &SourceError {
        match self {
            CascadeError::Source { source, .. } => source,
            CascadeError::Default(source) => source,
        }
    }

    /// The source kind whose stage failed ([`SourceKind::Default`] for the default pass).
    pub fn kind(&self) -> SourceKind {
        match self {
            CascadeError::Source { kind, .. } => *kind,
            CascadeError::Default(_) => SourceKind::Default,
        }
    }
}

/// Why a single source failed.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{kind} file not readable {path}: {source}")]
    Read {
        kind: SourceKind,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("toml decode error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("yaml decode error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ini load error: {0}")]
    Ini(#[from] ini::ParseError),

    #[error("{kind} decode error: invalid value for '{field}': {source}")]
    Decode {
        kind: SourceKind,
        field: String,
        source: serde_json::Error,
    },

    #[error("{kind} decode error: expected a table at {}, found {found}", table_location(.field))]
    NotATable {
        kind: SourceKind,
        field: String,
        found: &'static str,
    },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(
        "unrecognized option{}: {}",
        if .0.len() == 1 { "" } else { "s" },
        .0.join(", ")
    )]
    UnrecognizedOptions(Vec<String>),
}

fn table_location(field: &str) -> String {
    if field.is_empty() {
        "the document root".to_string()
    } else {
        format!("'{field}'")
    }
}

/// A raw string that cannot be parsed into the field's declared scalar kind.
#[derive(Debug, Error)]
#[error("failed to convert '{value}' to {kind} for '{field}': {source}")]
pub struct ConversionError {
    pub field: String,
    pub value: String,
    pub kind: Kind,
    pub source: Box<dyn std::error::Error + Send + Sync>,
}
