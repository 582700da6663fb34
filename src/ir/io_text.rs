//! Raw ASCIImage text.
//!
//! The plain form of an image is just its grid: one line of characters per
//! row, optionally padded with whitespace. Metadata can only come from the
//! caller in this form.

use std::fs;
use std::io::Read;
use std::path::Path;

use super::grid::Grid;
use super::metadata::DocumentMetadata;
use super::model::Image;
use crate::error::AsciimageError;

/// Decodes an image from its grid lines.
///
/// # Errors
/// Returns the grid normalization errors: `EmptyInput`, `RaggedInput` or
/// `MisalignedPixels`.
pub fn from_lines<S: AsRef<str>>(
    lines: &[S],
    metadata: &DocumentMetadata,
) -> Result<Image, AsciimageError> {
    let grid = Grid::from_lines(lines)?;
    Ok(Image::from_grid(&grid, metadata.clone()))
}

/// Decodes an image from a block of grid text.
pub fn from_text_str(text: &str, metadata: &DocumentMetadata) -> Result<Image, AsciimageError> {
    let lines: Vec<&str> = text.lines().collect();
    from_lines(&lines, metadata)
}

/// Reads a whole input file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, AsciimageError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(AsciimageError::Io)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(AsciimageError::Io)
}

/// Decodes a grid-only text file.
pub fn read_text_file(path: &Path, metadata: &DocumentMetadata) -> Result<Image, AsciimageError> {
    let text = read_input(path)?;
    from_text_str(&text, metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Coord, Element};
    use std::io::Write;

    #[test]
    fn test_from_text_str() {
        let img = from_text_str(
            ". 1 .\n. . .\n. 1 .\n",
            &DocumentMetadata::default(),
        )
        .expect("valid image");
        assert_eq!((img.rows, img.cols), (3, 3));
        assert_eq!(
            img.elements,
            vec![Element::Line(Coord::new(0, 1), Coord::new(2, 1))]
        );
    }

    #[test]
    fn test_ragged_lines() {
        let err = from_lines(&["ab", "a"], &DocumentMetadata::default()).unwrap_err();
        assert!(matches!(err, AsciimageError::RaggedInput { .. }));
    }

    #[test]
    fn test_empty_text() {
        let err = from_text_str("", &DocumentMetadata::default()).unwrap_err();
        assert!(matches!(err, AsciimageError::EmptyInput));
    }

    #[test]
    fn test_read_text_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        write!(file, "1.\n.2\n").expect("write temp file");

        let img = read_text_file(file.path(), &DocumentMetadata::default()).expect("read image");
        assert_eq!(img.elements.len(), 1);
    }
}
