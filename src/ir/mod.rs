//! Intermediate representation for decoded ASCIImages.
//!
//! This module holds everything between the input text and the [`Image`]
//! value handed to a renderer: the grid, the mark catalog, classification of
//! marks into elements, and metadata resolution.
//!
//! # Pipeline
//!
//! 1. **Front-end** ([`source`], [`io_text`], [`io_yaml`]): picks raw or
//!    YAML-wrapped input and extracts the grid lines plus metadata.
//! 2. **Grid** ([`Grid`]): strips whitespace padding and checks the lines
//!    form a rectangle.
//! 3. **Classification** ([`classify`]): walks the [`mark::CATALOG`] in order
//!    and turns each mark's occurrences into points, lines, paths and
//!    ellipses.
//! 4. **Metadata** ([`metadata`]): layers defaults, document metadata and
//!    per-element overrides.
//!
//! # Example
//!
//! ```
//! use asciimage::ir::{io_text, Coord, DocumentMetadata, Element};
//!
//! let image = io_text::from_lines(&["1 . 2", ". . ."], &DocumentMetadata::default()).unwrap();
//! assert_eq!(
//!     image.elements,
//!     vec![Element::Path(vec![Coord::new(0, 0), Coord::new(0, 2)])],
//! );
//! ```

pub mod classify;
mod coord;
mod element;
mod grid;
pub mod io_json;
pub mod io_text;
pub mod io_yaml;
pub mod mark;
pub mod metadata;
mod model;
pub mod source;

// Re-export core types for convenient access
pub use classify::{classify, Occurrences};
pub use coord::Coord;
pub use element::{Element, ElementKind};
pub use grid::Grid;
pub use mark::Mark;
pub use metadata::{DocumentMetadata, Metadata, Options, Overrides};
pub use model::Image;
pub use source::{InputFormat, Source};
