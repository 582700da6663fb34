//! JSON serialization of decoded images.
//!
//! Renderers outside this crate can consume the JSON form directly. It is
//! also handy for inspecting what a grid decoded to.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::model::Image;
use crate::error::AsciimageError;

/// Writes an image to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_image_json(path: &Path, image: &Image) -> Result<(), AsciimageError> {
    let file = File::create(path).map_err(AsciimageError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, image).map_err(|source| AsciimageError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes an image to a JSON string.
///
/// Useful for testing without file I/O.
pub fn to_json_string(image: &Image) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(image)
}

/// Reads an image back from its JSON form.
pub fn from_json_str(json: &str) -> Result<Image, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::io_yaml::from_yaml_str;
    use crate::ir::DocumentMetadata;

    fn sample_image() -> Image {
        from_yaml_str(
            "title: Sample\n1:\n  fill: red\nimage: |\n  1 . A\n  . 2 A\n  B B B\n",
            &DocumentMetadata::default(),
        )
        .expect("valid image")
    }

    #[test]
    fn test_json_format() {
        let json = to_json_string(&sample_image()).expect("serialization failed");

        assert!(json.contains("\"rows\": 3"));
        assert!(json.contains("\"elements\""));
        assert!(json.contains("\"kind\": \"ellipse\""));
        assert!(json.contains("\"title\": \"Sample\""));
        assert!(json.contains("\"overrides\""));
    }

    #[test]
    fn test_json_restores_image() {
        let original = sample_image();
        let json = to_json_string(&original).expect("serialization failed");
        let restored = from_json_str(&json).expect("deserialization failed");

        assert_eq!(original.elements, restored.elements);
        assert_eq!(restored.effective(1).fill(), Some("red"));
    }

    #[test]
    fn test_write_image_json() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("image.json");
        write_image_json(&path, &sample_image()).expect("write json");

        let written = std::fs::read_to_string(&path).expect("read json");
        assert!(written.contains("\"cols\": 3"));
    }
}
