//! The decoded image.
//!
//! An [`Image`] is what a renderer receives: the grid size, the elements in
//! classification order, and the metadata needed to style each of them.

use serde::{Deserialize, Serialize};

use super::classify::classify;
use super::element::{Element, ElementKind};
use super::grid::Grid;
use super::metadata::{self, DocumentMetadata, Metadata, Options, Overrides};

/// A fully decoded ASCIImage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Number of grid rows.
    pub rows: usize,

    /// Number of grid columns.
    pub cols: usize,

    /// Elements in classification order; override indices refer to this list.
    pub elements: Vec<Element>,

    /// Defaults merged with the document's global metadata.
    pub metadata: Metadata,

    /// Per-element overrides, keyed by element index.
    #[serde(default, skip_serializing_if = "Overrides::is_empty")]
    pub overrides: Overrides,
}

impl Image {
    /// Classifies a grid and attaches metadata using the default options.
    pub fn from_grid(grid: &Grid, document: DocumentMetadata) -> Self {
        Self::from_grid_with_options(grid, document, &Options::default())
    }

    /// Classifies a grid and attaches metadata on top of the given defaults.
    pub fn from_grid_with_options(
        grid: &Grid,
        document: DocumentMetadata,
        defaults: &Options,
    ) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            elements: classify(grid),
            metadata: metadata::resolve(defaults, &document.global),
            overrides: document.overrides,
        }
    }

    /// The effective properties of element `index`.
    pub fn effective(&self, index: usize) -> Metadata {
        metadata::effective(&self.metadata, &self.overrides, index)
    }

    /// True if element `index` should be drawn as an open path.
    pub fn is_open(&self, index: usize) -> bool {
        self.effective(index).is_open()
    }

    /// Number of elements of a given kind.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Coord;
    use serde_yaml::Mapping;

    fn image(lines: &[&str], yaml: &str) -> Image {
        let grid = Grid::from_lines(lines).expect("valid grid");
        let mapping: Mapping = serde_yaml::from_str(yaml).expect("valid yaml");
        Image::from_grid(&grid, DocumentMetadata::from_mapping(&mapping))
    }

    #[test]
    fn test_image_from_grid() {
        let img = image(&["1.", ".2", "AA"], "{}");
        assert_eq!(img.rows, 3);
        assert_eq!(img.cols, 2);
        assert_eq!(
            img.elements,
            vec![
                Element::Path(vec![Coord::new(0, 0), Coord::new(1, 1)]),
                Element::Line(Coord::new(2, 0), Coord::new(2, 1)),
            ]
        );
        assert_eq!(img.count(ElementKind::Path), 1);
        assert_eq!(img.count(ElementKind::Ellipse), 0);
    }

    #[test]
    fn test_is_open_follows_override() {
        let img = image(&["12", "AA"], "fill: red\n0:\n  open: true\n");
        assert!(img.is_open(0));
        assert!(!img.is_open(1));
        assert_eq!(img.effective(1).fill(), Some("red"));
    }

    #[test]
    fn test_custom_defaults() {
        let grid = Grid::from_lines(&["1"]).unwrap();
        let defaults = Options {
            open: true,
            ..Default::default()
        };
        let img = Image::from_grid_with_options(&grid, DocumentMetadata::default(), &defaults);
        assert!(img.is_open(0));
    }
}
