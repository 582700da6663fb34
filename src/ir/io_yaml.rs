//! YAML-wrapped ASCIImage documents.
//!
//! A structured document is a mapping with an `image` entry holding the grid
//! text; every other entry is metadata:
//!
//! ```yaml
//! title: Arrow
//! fill: red
//! 1:
//!   open: true
//! image: |
//!   . 1 . .
//!   . . . 2
//!   . 3 . .
//! ```
//!
//! Only single-layer images are supported. A stream carrying several
//! documents is rejected rather than composited.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use super::io_text;
use super::metadata::DocumentMetadata;
use super::model::Image;
use crate::error::AsciimageError;

/// Key of the entry holding the grid text.
pub const IMAGE_KEY: &str = "image";

/// Decodes every document in a YAML stream.
///
/// Empty (null) documents are dropped.
pub fn documents_from_str(yaml: &str) -> Result<Vec<Value>, AsciimageError> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(yaml) {
        let value =
            Value::deserialize(document).map_err(|source| AsciimageError::YamlParse { source })?;
        if !value.is_null() {
            documents.push(value);
        }
    }
    Ok(documents)
}

/// Decodes an image from already-parsed documents.
///
/// # Errors
/// - `NoDocuments` if `documents` is empty.
/// - `MultiLayerUnsupported` if there is more than one document.
/// - `UnsupportedInputShape` if the document is not a mapping, or its
///   `image` entry is not text.
/// - `NoImageKey` if the mapping has no `image` entry.
/// - Any grid error from the image text.
pub fn from_documents(
    documents: &[Value],
    metadata: &DocumentMetadata,
) -> Result<Image, AsciimageError> {
    let document = match documents {
        [] => return Err(AsciimageError::NoDocuments),
        [single] => single,
        _ => {
            return Err(AsciimageError::MultiLayerUnsupported {
                count: documents.len(),
            })
        }
    };

    let Value::Mapping(mapping) = document else {
        return Err(AsciimageError::UnsupportedInputShape(format!(
            "expected a mapping document, found {}",
            value_kind(document)
        )));
    };

    from_mapping(mapping, metadata)
}

/// Decodes an image from a single document mapping.
pub fn from_mapping(
    mapping: &Mapping,
    metadata: &DocumentMetadata,
) -> Result<Image, AsciimageError> {
    let mut rest = mapping.clone();
    let image = rest.remove(IMAGE_KEY).ok_or(AsciimageError::NoImageKey)?;

    let mut layers = DocumentMetadata::from_mapping(&rest);
    layers.merge(metadata);

    match &image {
        Value::String(text) => io_text::from_text_str(text, &layers),
        Value::Sequence(items) => {
            let lines = items
                .iter()
                .map(|item| item.as_str().ok_or_else(|| image_not_text(&image)))
                .collect::<Result<Vec<&str>, _>>()?;
            io_text::from_lines(&lines, &layers)
        }
        other => Err(image_not_text(other)),
    }
}

/// Decodes an image from YAML text.
pub fn from_yaml_str(yaml: &str, metadata: &DocumentMetadata) -> Result<Image, AsciimageError> {
    let documents = documents_from_str(yaml)?;
    from_documents(&documents, metadata)
}

/// Short name of a YAML value's kind, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn image_not_text(value: &Value) -> AsciimageError {
    AsciimageError::UnsupportedInputShape(format!(
        "'{}' entry must be text, found {}",
        IMAGE_KEY,
        value_kind(value)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Coord, Element};

    fn none() -> DocumentMetadata {
        DocumentMetadata::default()
    }

    #[test]
    fn test_single_document() {
        let img = from_yaml_str("image: \"1\\n\"\nfill: red\n", &none()).expect("valid image");
        assert_eq!(img.elements, vec![Element::Point(Coord::new(0, 0))]);
        assert_eq!(img.effective(0).fill(), Some("red"));
        assert!(img.metadata.get(IMAGE_KEY).is_none());
    }

    #[test]
    fn test_block_scalar_and_overrides() {
        let yaml = "title: Check\n0:\n  open: true\nimage: |\n  1 . .\n  . 2 .\n  . . 3\n";
        let img = from_yaml_str(yaml, &none()).expect("valid image");
        assert_eq!((img.rows, img.cols), (3, 3));
        assert_eq!(img.elements.len(), 1);
        assert!(img.is_open(0));
        assert_eq!(
            img.metadata.get("title").and_then(Value::as_str),
            Some("Check")
        );
    }

    #[test]
    fn test_image_as_line_sequence() {
        let img = from_yaml_str("image:\n  - 'A.'\n  - '.A'\n", &none()).expect("valid image");
        assert_eq!(
            img.elements,
            vec![Element::Line(Coord::new(0, 0), Coord::new(1, 1))]
        );
    }

    #[test]
    fn test_caller_metadata_wins() {
        let caller = DocumentMetadata::from_mapping(
            &serde_yaml::from_str("fill: blue").expect("valid yaml"),
        );
        let img = from_yaml_str("image: '1'\nfill: red\n", &caller).expect("valid image");
        assert_eq!(img.effective(0).fill(), Some("blue"));
    }

    #[test]
    fn test_no_image_key() {
        let err = from_yaml_str("fill: red\n", &none()).unwrap_err();
        assert!(matches!(err, AsciimageError::NoImageKey));
    }

    #[test]
    fn test_no_documents() {
        assert!(matches!(
            from_documents(&[], &none()),
            Err(AsciimageError::NoDocuments)
        ));
    }

    #[test]
    fn test_multi_layer_unsupported() {
        let err = from_yaml_str("image: '1'\n---\nimage: '2'\n", &none()).unwrap_err();
        assert!(matches!(
            err,
            AsciimageError::MultiLayerUnsupported { count: 2 }
        ));
    }

    #[test]
    fn test_scalar_document_is_unsupported() {
        let err = from_yaml_str("1\n", &none()).unwrap_err();
        assert!(matches!(err, AsciimageError::UnsupportedInputShape(_)));
    }

    #[test]
    fn test_syntax_error() {
        let err = from_yaml_str("image: [unclosed\n", &none()).unwrap_err();
        assert!(matches!(err, AsciimageError::YamlParse { .. }));
    }
}
