use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for asciimage operations.
#[derive(Debug, Error)]
pub enum AsciimageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty input: no image lines given")]
    EmptyInput,

    #[error("Ragged input: line {line} has length {found}, expected {expected}")]
    RaggedInput {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "Misaligned pixels: row {row} has {found} pixel(s) after removing whitespace, expected {expected}"
    )]
    MisalignedPixels {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("No documents: structured input contains no documents")]
    NoDocuments,

    #[error("No 'image' key in structured document")]
    NoImageKey,

    #[error("Multi-layer images are not supported ({count} documents given)")]
    MultiLayerUnsupported { count: usize },

    #[error("Unsupported input shape: {0}")]
    UnsupportedInputShape(String),

    #[error("Failed to parse YAML: {source}")]
    YamlParse {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write image JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid metadata override '{raw}': {message}")]
    InvalidOverride { raw: String, message: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
