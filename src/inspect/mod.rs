//! Image inspection and statistics.
//!
//! Produces a summary of what a grid decoded to: the element mix, how many
//! anchors they use, and which metadata is in play.

mod report;

pub use report::{InspectReport, KindCount, MetadataSection, SummarySection};

use serde_yaml::Value;

use crate::ir::metadata::keys;
use crate::ir::{ElementKind, Image};

/// Options for image inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self { bar_width: 20 }
    }
}

const RECOGNIZED: [&str; 5] = [
    keys::FILL,
    keys::STROKE,
    keys::STROKE_WIDTH,
    keys::OPEN,
    keys::ALIASED,
];

/// Inspect an image and produce a report.
pub fn inspect_image(image: &Image, opts: &InspectOptions) -> InspectReport {
    let summary = SummarySection {
        rows: image.rows,
        cols: image.cols,
        elements: image.elements.len(),
        anchors: image.elements.iter().map(|e| e.len()).sum(),
        open_elements: (0..image.elements.len())
            .filter(|&i| image.is_open(i))
            .count(),
    };

    let elements = [
        ElementKind::Point,
        ElementKind::Line,
        ElementKind::Path,
        ElementKind::Ellipse,
    ]
    .into_iter()
    .map(|kind| KindCount {
        kind: kind.to_string(),
        count: image.count(kind),
    })
    .collect();

    let options = RECOGNIZED
        .iter()
        .filter_map(|key| {
            image
                .metadata
                .get(key)
                .map(|value| (key.to_string(), display_value(value)))
        })
        .collect();

    let extra_keys = image
        .metadata
        .iter()
        .map(|(key, _)| key)
        .filter(|key| !RECOGNIZED.contains(key))
        .map(str::to_string)
        .collect();

    InspectReport {
        summary,
        elements,
        metadata: MetadataSection {
            options,
            extra_keys,
            overridden: image.overrides.iter().map(|(i, _)| i).collect(),
        },
        bar_width: opts.bar_width,
    }
}

/// Single-line rendering of a metadata value.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "~".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().replace('\n', " "))
            .unwrap_or_default(),
    }
}
