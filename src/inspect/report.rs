//! Inspect report types and terminal formatting.

use serde::Serialize;
use std::fmt;

/// The result of inspecting an image.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Grid size and element totals.
    pub summary: SummarySection,
    /// Element counts per kind.
    pub elements: Vec<KindCount>,
    /// Metadata overview.
    pub metadata: MetadataSection,
    /// Display options for formatting.
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

/// Grid size and element totals.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SummarySection {
    pub rows: usize,
    pub cols: usize,
    /// Total number of elements.
    pub elements: usize,
    /// Anchor coordinates across all elements.
    pub anchors: usize,
    /// Elements drawn as open paths.
    pub open_elements: usize,
}

/// Number of elements of one kind.
#[derive(Clone, Debug, Serialize)]
pub struct KindCount {
    pub kind: String,
    pub count: usize,
}

/// Metadata overview.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MetadataSection {
    /// Effective global options, rendered as text.
    pub options: Vec<(String, String)>,
    /// Keys the resolver does not interpret.
    pub extra_keys: Vec<String>,
    /// Element indices that carry an override.
    pub overridden: Vec<usize>,
}

const INNER: usize = 57;

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "╭─────────────────────────────────────────────────────────────╮")?;
        writeln!(f, "│              🖼   ASCIImage Inspection Report                │")?;
        writeln!(f, "╰─────────────────────────────────────────────────────────────╯")?;
        writeln!(f)?;

        self.fmt_summary(f)?;
        writeln!(f)?;
        self.fmt_elements(f)?;
        writeln!(f)?;
        self.fmt_metadata(f)?;

        Ok(())
    }
}

impl InspectReport {
    fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;

        section_top(f, "Summary")?;
        line(f, "")?;
        line(f, &format!("  Grid:          {:>4} x {}", s.rows, s.cols))?;
        line(f, &format!("  Elements:      {:>8}", s.elements))?;
        line(f, &format!("  Anchors:       {:>8}", s.anchors))?;
        if s.open_elements > 0 {
            line(f, &format!("  Open:          {:>8}", s.open_elements))?;
        }
        line(f, "")?;
        section_bottom(f)
    }

    fn fmt_elements(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section_top(f, "Elements")?;
        line(f, "")?;

        let max_count = self.elements.iter().map(|e| e.count).max().unwrap_or(0);
        if max_count == 0 {
            line(f, "  No elements found.")?;
        } else {
            for entry in &self.elements {
                let bar = render_bar(entry.count, max_count, self.bar_width);
                line(
                    f,
                    &format!("  {:<10} {:>7}  {}", entry.kind, entry.count, bar),
                )?;
            }
        }

        line(f, "")?;
        section_bottom(f)
    }

    fn fmt_metadata(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metadata;

        section_top(f, "Metadata")?;
        line(f, "")?;
        for (key, value) in &m.options {
            line(f, &format!("  {:<14} {}", key, value))?;
        }
        if !m.extra_keys.is_empty() {
            line(f, &format!("  {:<14} {}", "other keys", m.extra_keys.join(", ")))?;
        }
        if !m.overridden.is_empty() {
            let indices: Vec<String> = m.overridden.iter().map(|i| i.to_string()).collect();
            line(f, &format!("  {:<14} {}", "overrides", indices.join(", ")))?;
        }
        line(f, "")?;
        section_bottom(f)
    }
}

fn section_top(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let used = title.chars().count() + 3;
    writeln!(f, "┌─ {} {}┐", title, "─".repeat(INNER + 2 - used.min(INNER + 2)))
}

fn section_bottom(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "└{}┘", "─".repeat(INNER + 2))
}

fn line(f: &mut fmt::Formatter<'_>, content: &str) -> fmt::Result {
    writeln!(f, "│ {:<width$} │", truncate(content, INNER), width = INNER)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// A horizontal bar proportional to `count / max`.
fn render_bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || width == 0 {
        return String::new();
    }
    let filled = ((count as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.max(usize::from(count > 0)))
}
