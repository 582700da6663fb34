//! Grid normalization.
//!
//! Turns raw image lines into a rectangular character grid. Whitespace inside
//! a line is padding for the eye, so it is removed before the pixels are laid
//! out, but the raw lines still have to agree on their length.

use tracing::debug;

use super::coord::Coord;
use crate::error::AsciimageError;

/// A validated rectangular grid of characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Builds a grid from image lines.
    ///
    /// # Errors
    /// - [`AsciimageError::EmptyInput`] if there are no lines, or no pixels
    ///   remain once whitespace is removed.
    /// - [`AsciimageError::RaggedInput`] if the raw lines differ in length.
    /// - [`AsciimageError::MisalignedPixels`] if the lines differ in length
    ///   after whitespace removal.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, AsciimageError> {
        if lines.is_empty() {
            return Err(AsciimageError::EmptyInput);
        }

        let raw: Vec<&str> = lines.iter().map(|l| chomp(l.as_ref())).collect();
        let expected = raw[0].chars().count();
        for (idx, line) in raw.iter().enumerate().skip(1) {
            let found = line.chars().count();
            if found != expected {
                return Err(AsciimageError::RaggedInput {
                    line: idx + 1,
                    expected,
                    found,
                });
            }
        }

        let pixels: Vec<Vec<char>> = raw
            .iter()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();

        let cols = pixels[0].len();
        for (idx, row) in pixels.iter().enumerate().skip(1) {
            if row.len() != cols {
                return Err(AsciimageError::MisalignedPixels {
                    row: idx + 1,
                    expected: cols,
                    found: row.len(),
                });
            }
        }

        if cols == 0 {
            return Err(AsciimageError::EmptyInput);
        }

        let rows = pixels.len();
        debug!(rows, cols, "normalized grid");

        Ok(Self {
            rows,
            cols,
            cells: pixels.into_iter().flatten().collect(),
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The character at a position, if it is inside the grid.
    pub fn get(&self, at: Coord) -> Option<char> {
        if at.row < self.rows && at.col < self.cols {
            Some(self.cells[at.row * self.cols + at.col])
        } else {
            None
        }
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (Coord::new(i / cols, i % cols), *c))
    }
}

/// Drops one trailing line terminator.
fn chomp(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}
