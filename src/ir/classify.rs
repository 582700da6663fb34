//! Mark classification.
//!
//! Each mark's occurrences are collected from the grid, then the catalog is
//! walked in order. A mark that repeats becomes its own element straight away:
//! a line for two occurrences, an ellipse for three or more. Marks that occur
//! exactly once are folded into a run while they keep following each other in
//! catalog order; a run closes as a path, or as a lone point if nothing joined
//! it.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::coord::Coord;
use super::element::Element;
use super::grid::Grid;
use super::mark::Mark;

/// Where each catalog mark occurs in a grid, in row-major order.
///
/// Every mark has an entry, possibly empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrences {
    by_mark: BTreeMap<Mark, Vec<Coord>>,
}

impl Occurrences {
    /// Scans the grid and records each mark's positions.
    ///
    /// Characters outside the catalog are skipped.
    pub fn scan(grid: &Grid) -> Self {
        let mut by_mark: BTreeMap<Mark, Vec<Coord>> =
            Mark::all().map(|mark| (mark, Vec::new())).collect();

        for (at, c) in grid.cells() {
            if let Some(mark) = Mark::from_char(c) {
                by_mark.entry(mark).or_default().push(at);
            }
        }

        Self { by_mark }
    }

    /// Positions of one mark.
    pub fn get(&self, mark: Mark) -> &[Coord] {
        self.by_mark.get(&mark).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over every mark in catalog order with its positions.
    pub fn iter(&self) -> impl Iterator<Item = (Mark, &[Coord])> {
        self.by_mark.iter().map(|(m, l)| (*m, l.as_slice()))
    }

    /// Marks that occur at least once, in catalog order.
    pub fn used_marks(&self) -> Vec<Mark> {
        self.iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(m, _)| m)
            .collect()
    }
}

/// Classifies a grid into its ordered list of elements.
pub fn classify(grid: &Grid) -> Vec<Element> {
    classify_occurrences(&Occurrences::scan(grid))
}

/// Classifies an already scanned occurrence map.
pub fn classify_occurrences(occurrences: &Occurrences) -> Vec<Element> {
    let mut elements = Vec::new();
    let mut run: Vec<Coord> = Vec::new();
    let mut last: Option<Mark> = None;

    for (mark, list) in occurrences.iter() {
        let adjacent = last.is_some_and(|prev| prev.precedes(mark));
        let breaks_run = list.len() != 1 || !adjacent;

        if breaks_run && !run.is_empty() {
            close_run(&mut run, &mut elements);
            last = None;
        }

        if list.is_empty() {
            continue;
        }

        if list.len() == 1 {
            run.push(list[0]);
            last = Some(mark);
        } else {
            let element = repeated_mark(list);
            trace!(mark = %mark, element = %element, "closed repeated mark");
            elements.push(element);
        }
    }

    close_run(&mut run, &mut elements);

    debug!(elements = elements.len(), "classified marks");
    elements
}

/// Turns the pending run into a point or a path and clears it.
fn close_run(run: &mut Vec<Coord>, elements: &mut Vec<Element>) {
    let element = match run.len() {
        0 => return,
        1 => Element::Point(run[0]),
        _ => Element::Path(run.clone()),
    };
    trace!(element = %element, "closed run");
    elements.push(element);
    run.clear();
}

/// Element for a mark with two or more occurrences.
fn repeated_mark(list: &[Coord]) -> Element {
    match list {
        [a, b] => Element::Line(*a, *b),
        _ => Element::Ellipse(list.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ElementKind;

    fn classify_lines(lines: &[&str]) -> Vec<Element> {
        classify(&Grid::from_lines(lines).expect("valid grid"))
    }

    #[test]
    fn test_occurrences_prepopulated() {
        let grid = Grid::from_lines(&["1.", ".."]).unwrap();
        let occ = Occurrences::scan(&grid);
        assert_eq!(occ.iter().count(), 60);
        assert_eq!(occ.get(Mark::from_char('1').unwrap()), &[Coord::new(0, 0)]);
        assert!(occ.get(Mark::from_char('2').unwrap()).is_empty());
        assert_eq!(occ.used_marks(), vec![Mark::from_char('1').unwrap()]);
    }

    #[test]
    fn test_lone_point() {
        let els = classify_lines(&["..", ".1"]);
        assert_eq!(els, vec![Element::Point(Coord::new(1, 1))]);
    }

    #[test]
    fn test_adjacent_marks_form_path_in_catalog_order() {
        let els = classify_lines(&["2.", ".1"]);
        assert_eq!(
            els,
            vec![Element::Path(vec![Coord::new(1, 1), Coord::new(0, 0)])]
        );
    }

    #[test]
    fn test_mixed_example_grid() {
        // '1' and '2' are adjacent in the catalog, as are 'A' and 'B'.
        let els = classify_lines(&["1A", "B2"]);
        assert_eq!(
            els,
            vec![
                Element::Path(vec![Coord::new(0, 0), Coord::new(1, 1)]),
                Element::Path(vec![Coord::new(0, 1), Coord::new(1, 0)]),
            ]
        );
    }

    #[test]
    fn test_gap_in_catalog_splits_points() {
        let els = classify_lines(&["1.3"]);
        assert_eq!(
            els,
            vec![
                Element::Point(Coord::new(0, 0)),
                Element::Point(Coord::new(0, 2)),
            ]
        );
    }

    #[test]
    fn test_repeated_mark_is_line() {
        let els = classify_lines(&["AA"]);
        assert_eq!(els, vec![Element::Line(Coord::new(0, 0), Coord::new(0, 1))]);
    }

    #[test]
    fn test_three_occurrences_is_ellipse() {
        let els = classify_lines(&[".1.", "1.1"]);
        assert_eq!(
            els,
            vec![Element::Ellipse(vec![
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 2),
            ])]
        );
    }

    #[test]
    fn test_repeated_mark_breaks_run() {
        // 1 once, 2 twice, 3 once: the line sits between two points.
        let els = classify_lines(&["12.", "2.3"]);
        let kinds: Vec<ElementKind> = els.iter().map(Element::kind).collect();
        assert_eq!(
            kinds,
            vec![ElementKind::Point, ElementKind::Line, ElementKind::Point]
        );
        assert_eq!(els[1], Element::Line(Coord::new(0, 1), Coord::new(1, 0)));
    }

    #[test]
    fn test_run_crosses_digit_letter_boundary() {
        let els = classify_lines(&["9A"]);
        assert_eq!(
            els,
            vec![Element::Path(vec![Coord::new(0, 0), Coord::new(0, 1)])]
        );
    }

    #[test]
    fn test_lowercase_o_is_background() {
        let els = classify_lines(&["nop"]);
        assert_eq!(
            els,
            vec![Element::Path(vec![Coord::new(0, 0), Coord::new(0, 2)])]
        );
    }

    #[test]
    fn test_no_marks_no_elements() {
        assert!(classify_lines(&["..", "#0"]).is_empty());
    }

    #[test]
    fn test_long_path() {
        let els = classify_lines(&["1234"]);
        assert_eq!(els.len(), 1);
        assert_eq!(els[0].kind(), ElementKind::Path);
        assert_eq!(els[0].len(), 4);
    }
}
