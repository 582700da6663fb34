#![allow(dead_code)]

use asciimage::ir::mark::CATALOG;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(128);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A cell character: mostly background, otherwise a mark from a small
/// slice of the catalog so that repeats and adjacency both show up.
pub fn arb_cell() -> impl Strategy<Value = char> {
    prop_oneof![
        3 => Just('.'),
        1 => Just('#'),
        1 => Just('o'),
        4 => prop::sample::select(CATALOG[..12].to_vec()),
        1 => prop::sample::select(CATALOG.to_vec()),
    ]
}

/// Rectangular grid lines without whitespace.
pub fn arb_grid_lines(max_rows: usize, max_cols: usize) -> impl Strategy<Value = Vec<String>> {
    (1..=max_rows, 1..=max_cols).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(
            prop::collection::vec(arb_cell(), cols).prop_map(|cells| cells.into_iter().collect()),
            rows,
        )
    })
}

/// Pads every pixel with a single space, the way images are usually written.
pub fn spaced(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            line.chars()
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
