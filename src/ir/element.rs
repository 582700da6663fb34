//! Geometric elements produced by classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::coord::Coord;

/// The kind of an [`Element`], without its coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Point,
    Line,
    Path,
    Ellipse,
}

impl ElementKind {
    /// Lower case name, as used in reports and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Point => "point",
            ElementKind::Line => "line",
            ElementKind::Path => "path",
            ElementKind::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A geometric primitive anchored on grid cells.
///
/// `Point`, `Line` and `Ellipse` always come from a single mark. A `Path`
/// comes from a run of distinct marks that each occur once, and lists its
/// points in catalog order rather than spatial order. Ellipses keep the raw
/// coordinates of their mark; renderers take the extent from [`Element::bounds`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "points", rename_all = "lowercase")]
pub enum Element {
    Point(Coord),
    Line(Coord, Coord),
    Path(Vec<Coord>),
    Ellipse(Vec<Coord>),
}

impl Element {
    /// Returns the kind of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Point(_) => ElementKind::Point,
            Element::Line(..) => ElementKind::Line,
            Element::Path(_) => ElementKind::Path,
            Element::Ellipse(_) => ElementKind::Ellipse,
        }
    }

    /// The anchor coordinates, in element order.
    pub fn points(&self) -> Vec<Coord> {
        match self {
            Element::Point(p) => vec![*p],
            Element::Line(a, b) => vec![*a, *b],
            Element::Path(points) | Element::Ellipse(points) => points.clone(),
        }
    }

    /// Number of anchor coordinates.
    pub fn len(&self) -> usize {
        match self {
            Element::Point(_) => 1,
            Element::Line(..) => 2,
            Element::Path(points) | Element::Ellipse(points) => points.len(),
        }
    }

    /// Always false for classified elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-left and bottom-right corners of the cells the element touches.
    pub fn bounds(&self) -> (Coord, Coord) {
        let points = self.points();
        let min_row = points.iter().map(|p| p.row).min().unwrap_or(0);
        let min_col = points.iter().map(|p| p.col).min().unwrap_or(0);
        let max_row = points.iter().map(|p| p.row).max().unwrap_or(0);
        let max_col = points.iter().map(|p| p.col).max().unwrap_or(0);
        (Coord::new(min_row, min_col), Coord::new(max_row, max_col))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        for p in self.points() {
            write!(f, " {}", p)?;
        }
        Ok(())
    }
}
