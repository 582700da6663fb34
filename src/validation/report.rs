//! Validation report types for structured error reporting.
//!
//! This module provides rich, structured validation results that can be
//! displayed to users, serialized as JSON, or processed programmatically.

use serde::Serialize;
use std::fmt;

/// The result of validating an image.
///
/// Contains all issues found during validation, categorized by severity.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// JSON form of the report, with counts up front.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "error_count": self.error_count(),
            "warning_count": self.warning_count(),
            "issues": self.issues,
        })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    /// How serious the issue is.
    pub severity: Severity,
    /// Stable code for programmatic handling.
    pub code: IssueCode,
    /// Human-readable description.
    pub message: String,
    /// Where the issue was found.
    pub context: IssueContext,
}

impl ValidationIssue {
    /// Creates a new issue.
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    /// Creates a new error.
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    /// Creates a new warning.
    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// A warning that doesn't prevent rendering but may indicate mistakes.
    Warning,
    /// An error that a renderer cannot make sense of.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    /// The grid contains no marks at all.
    NoElements,
    /// An override targets an element index that does not exist.
    OverrideOutOfRange,
    /// The open-path flag is set on something that is not a path.
    OpenOnNonPath,
    /// A recognized option has a value of the wrong type.
    InvalidOptionType,
    /// The stroke width is negative or not finite.
    InvalidStrokeWidth,
}

/// Context about where a validation issue occurred.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum IssueContext {
    /// Issue with the image as a whole.
    Image,
    /// Issue with a specific element.
    Element { index: usize },
    /// Issue with the override for an index.
    Override { index: usize },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Image => write!(f, "image"),
            IssueContext::Element { index } => write!(f, "element {}", index),
            IssueContext::Override { index } => write!(f, "override {}", index),
        }
    }
}
