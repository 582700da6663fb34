//! Image validation for asciimage.
//!
//! Decoding never fails on well-formed grids, but the result can still be
//! surprising to a renderer. This module checks for:
//! - Overrides that point past the end of the element list
//! - Styling that does not apply to the element it targets
//! - Recognized options with values of the wrong type

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use serde_yaml::Value;

use crate::ir::metadata::keys;
use crate::ir::{ElementKind, Image, Metadata};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates an image and returns a report of all issues found.
pub fn validate_image(image: &Image, _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    if image.elements.is_empty() {
        report.add(ValidationIssue::warning(
            IssueCode::NoElements,
            "Grid contains no marks",
            IssueContext::Image,
        ));
    }

    validate_options(&image.metadata, IssueContext::Image, &mut report);
    validate_overrides(image, &mut report);

    for (index, element) in image.elements.iter().enumerate() {
        if element.kind() != ElementKind::Path && image.is_open(index) {
            report.add(ValidationIssue::warning(
                IssueCode::OpenOnNonPath,
                format!("Open flag has no effect on a {}", element.kind()),
                IssueContext::Element { index },
            ));
        }
    }

    report
}

/// Validates every per-element override.
fn validate_overrides(image: &Image, report: &mut ValidationReport) {
    for (index, properties) in image.overrides.iter() {
        if index >= image.elements.len() {
            report.add(ValidationIssue::warning(
                IssueCode::OverrideOutOfRange,
                format!(
                    "Override for element {} but the image has {} element(s)",
                    index,
                    image.elements.len()
                ),
                IssueContext::Override { index },
            ));
        }

        validate_options(properties, IssueContext::Override { index }, report);
    }
}

/// Checks the types of the recognized options in one property set.
fn validate_options(meta: &Metadata, context: IssueContext, report: &mut ValidationReport) {
    for key in [keys::FILL, keys::STROKE] {
        if let Some(value) = meta.get(key) {
            if !value.is_string() {
                report.add(type_error(key, "a string", value, context.clone()));
            }
        }
    }

    for key in [keys::OPEN, keys::ALIASED] {
        if let Some(value) = meta.get(key) {
            if !value.is_bool() {
                report.add(type_error(key, "a boolean", value, context.clone()));
            }
        }
    }

    if let Some(value) = meta.get(keys::STROKE_WIDTH) {
        match value.as_f64() {
            Some(width) if width.is_finite() && width >= 0.0 => {}
            Some(width) => report.add(ValidationIssue::error(
                IssueCode::InvalidStrokeWidth,
                format!("Stroke width {} must be a non-negative number", width),
                context,
            )),
            None => report.add(type_error(keys::STROKE_WIDTH, "a number", value, context)),
        }
    }
}

fn type_error(key: &str, expected: &str, value: &Value, context: IssueContext) -> ValidationIssue {
    ValidationIssue::error(
        IssueCode::InvalidOptionType,
        format!(
            "Option '{}' must be {}, found {}",
            key,
            expected,
            crate::ir::io_yaml::value_kind(value)
        ),
        context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::io_yaml::from_yaml_str;
    use crate::ir::DocumentMetadata;

    fn image(yaml: &str) -> Image {
        from_yaml_str(yaml, &DocumentMetadata::default()).expect("valid image")
    }

    fn codes(report: &ValidationReport) -> Vec<IssueCode> {
        report.issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn test_valid_image() {
        let report = validate_image(
            &image("fill: red\n0:\n  open: true\nimage: |\n  1 2\n  . .\n"),
            &ValidateOptions::default(),
        );
        assert!(report.is_clean(), "unexpected issues: {}", report);
    }

    #[test]
    fn test_no_elements() {
        let report = validate_image(&image("image: '..'\n"), &ValidateOptions::default());
        assert_eq!(report.warning_count(), 1);
        assert_eq!(codes(&report), vec![IssueCode::NoElements]);
    }

    #[test]
    fn test_override_out_of_range() {
        let report = validate_image(
            &image("5:\n  fill: red\nimage: '1'\n"),
            &ValidateOptions::default(),
        );
        assert_eq!(codes(&report), vec![IssueCode::OverrideOutOfRange]);
        assert!(report.is_ok());
    }

    #[test]
    fn test_open_on_line() {
        let report = validate_image(
            &image("open: true\nimage: 'AA'\n"),
            &ValidateOptions::default(),
        );
        assert_eq!(codes(&report), vec![IssueCode::OpenOnNonPath]);
    }

    #[test]
    fn test_wrong_option_types() {
        let report = validate_image(
            &image("fill: 3\nopen: 'yes'\n0:\n  stroke_width: wide\nimage: '1'\n"),
            &ValidateOptions::default(),
        );
        assert_eq!(report.error_count(), 3);
        assert!(codes(&report)
            .iter()
            .all(|c| *c == IssueCode::InvalidOptionType));
    }

    #[test]
    fn test_negative_stroke_width() {
        let report = validate_image(
            &image("stroke_width: -2\nimage: '1'\n"),
            &ValidateOptions::default(),
        );
        assert_eq!(codes(&report), vec![IssueCode::InvalidStrokeWidth]);
    }

    #[test]
    fn test_report_json() {
        let report = validate_image(&image("image: '..'\n"), &ValidateOptions::default());
        let json = report.to_json_value();
        assert_eq!(json["warning_count"], 1);
        assert_eq!(json["issues"][0]["code"], "NoElements");
        assert_eq!(json["issues"][0]["context"]["scope"], "image");
    }
}
