//! Input shapes and format autodetection.
//!
//! An image can arrive as a block of text, as grid lines, or as documents
//! that were already decoded from YAML. Text and lines are ambiguous: they may
//! hold a bare grid or a serialized document. In auto mode both readings are
//! tried, preferring the structured one for text and the raw one for lines,
//! and the error of the second attempt is reported if neither works.

use std::fmt;
use std::str::FromStr;

use serde_yaml::Value;
use tracing::debug;

use super::io_text;
use super::io_yaml;
use super::metadata::DocumentMetadata;
use super::model::Image;
use crate::error::AsciimageError;

/// The shapes an image source can take.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    /// A single block of text, possibly spanning several lines.
    Text(String),
    /// Structured documents, one per layer.
    Documents(Vec<Value>),
    /// Grid lines, one per row.
    Lines(Vec<String>),
}

impl Source {
    /// Picks the shape of an arbitrary decoded value.
    ///
    /// Strings are text, a mapping is a single document, a sequence of
    /// strings is lines and a sequence of mappings is documents.
    pub fn from_value(value: Value) -> Result<Self, AsciimageError> {
        match value {
            Value::String(text) => Ok(Source::Text(text)),
            Value::Mapping(_) => Ok(Source::Documents(vec![value])),
            Value::Sequence(items) => {
                if items.iter().all(Value::is_string) {
                    let lines = items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::String(s) => Some(s),
                            _ => None,
                        })
                        .collect();
                    Ok(Source::Lines(lines))
                } else if items.iter().all(Value::is_mapping) {
                    Ok(Source::Documents(items))
                } else {
                    Err(AsciimageError::UnsupportedInputShape(
                        "sequence mixes text and documents".to_string(),
                    ))
                }
            }
            other => Err(AsciimageError::UnsupportedInputShape(format!(
                "cannot read an image from {}",
                io_yaml::value_kind(&other)
            ))),
        }
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}

impl From<Vec<String>> for Source {
    fn from(lines: Vec<String>) -> Self {
        Source::Lines(lines)
    }
}

/// How to interpret a source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// Try both interpretations.
    #[default]
    Auto,
    /// Raw grid text only.
    Text,
    /// Structured YAML documents only.
    Yaml,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Auto => "auto",
            InputFormat::Text => "text",
            InputFormat::Yaml => "yaml",
        }
    }
}

impl FromStr for InputFormat {
    type Err = AsciimageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "text" | "txt" | "raw" => Ok(InputFormat::Text),
            "yaml" | "yml" => Ok(InputFormat::Yaml),
            other => Err(AsciimageError::UnsupportedFormat(format!(
                "'{}' (supported: auto, text, yaml)",
                other
            ))),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decodes an image from any source shape.
///
/// `metadata` is the caller's layer; it wins over anything a document
/// carries.
pub fn parse(
    source: &Source,
    format: InputFormat,
    metadata: &DocumentMetadata,
) -> Result<Image, AsciimageError> {
    match format {
        InputFormat::Text => parse_raw(source, metadata),
        InputFormat::Yaml => parse_structured(source, metadata),
        InputFormat::Auto => match source {
            Source::Text(_) => {
                first_then(source, metadata, parse_structured, parse_raw, "raw")
            }
            Source::Lines(_) => {
                first_then(source, metadata, parse_raw, parse_structured, "structured")
            }
            Source::Documents(_) => parse_structured(source, metadata),
        },
    }
}

type Attempt = fn(&Source, &DocumentMetadata) -> Result<Image, AsciimageError>;

fn first_then(
    source: &Source,
    metadata: &DocumentMetadata,
    first: Attempt,
    second: Attempt,
    second_name: &str,
) -> Result<Image, AsciimageError> {
    match first(source, metadata) {
        Ok(image) => Ok(image),
        Err(err) => {
            debug!(error = %err, fallback = second_name, "first interpretation failed");
            second(source, metadata)
        }
    }
}

/// Reads the source as a bare grid.
fn parse_raw(source: &Source, metadata: &DocumentMetadata) -> Result<Image, AsciimageError> {
    match source {
        Source::Text(text) => io_text::from_text_str(text, metadata),
        Source::Lines(lines) => io_text::from_lines(lines, metadata),
        Source::Documents(documents) => {
            let lines = documents
                .iter()
                .map(|doc| {
                    doc.as_str().ok_or_else(|| {
                        AsciimageError::UnsupportedInputShape(format!(
                            "grid lines must be text, found {}",
                            io_yaml::value_kind(doc)
                        ))
                    })
                })
                .collect::<Result<Vec<&str>, _>>()?;
            io_text::from_lines(&lines, metadata)
        }
    }
}

/// Reads the source as structured documents.
fn parse_structured(
    source: &Source,
    metadata: &DocumentMetadata,
) -> Result<Image, AsciimageError> {
    match source {
        Source::Text(text) => io_yaml::from_yaml_str(text, metadata),
        Source::Lines(lines) => io_yaml::from_yaml_str(&lines.join("\n"), metadata),
        Source::Documents(documents) => io_yaml::from_documents(documents, metadata),
    }
}
