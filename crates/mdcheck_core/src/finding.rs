//! Finding and edit types.
//!
//! A [`Finding`] is one reported issue; an [`Edit`] is the precise text
//! mutation that would resolve it. Every coordinate in both types refers to
//! the *original* (pre-edit) document. Findings are created by checks during
//! one run and never mutated afterward.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use mdcheck_token::Location;

/// A proposed text mutation, in one of two shapes.
///
/// Coordinates are 1-based and always expressed against the original
/// document; edits never reference each other and carry no derived offsets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Edit {
    /// Replace `delete_length` characters starting at `(line, column)` with
    /// `insert`. Empty `insert` deletes; zero `delete_length` inserts.
    ReplaceText {
        /// Target line (1-based).
        line: u32,
        /// Target column (1-based, counted in characters).
        column: u32,
        /// Number of characters to delete.
        delete_length: u32,
        /// Replacement text. Must not contain newlines.
        #[serde(default)]
        insert: String,
    },
    /// Replace `delete_count` whole lines starting at `start_line` with the
    /// lines of `insert` (split on newlines). Empty `insert` deletes the
    /// lines; zero `delete_count` inserts before `start_line`.
    ReplaceLines {
        /// First line of the replaced span (1-based).
        start_line: u32,
        /// Number of whole lines to delete.
        delete_count: u32,
        /// Replacement text, possibly spanning multiple lines.
        #[serde(default)]
        insert: String,
    },
}

impl Edit {
    /// Replaces `delete_length` characters at `(line, column)`.
    pub fn replace_text(line: u32, column: u32, delete_length: u32, insert: impl Into<String>) -> Self {
        Self::ReplaceText {
            line,
            column,
            delete_length,
            insert: insert.into(),
        }
    }

    /// Inserts text at `(line, column)` without deleting anything.
    pub fn insert_text(line: u32, column: u32, insert: impl Into<String>) -> Self {
        Self::replace_text(line, column, 0, insert)
    }

    /// Deletes `delete_length` characters at `(line, column)`.
    pub fn delete_text(line: u32, column: u32, delete_length: u32) -> Self {
        Self::replace_text(line, column, delete_length, "")
    }

    /// Replaces a single whole line.
    pub fn replace_line(line: u32, insert: impl Into<String>) -> Self {
        Self::ReplaceLines {
            start_line: line,
            delete_count: 1,
            insert: insert.into(),
        }
    }

    /// Deletes `delete_count` whole lines starting at `start_line`.
    pub fn delete_lines(start_line: u32, delete_count: u32) -> Self {
        Self::ReplaceLines {
            start_line,
            delete_count,
            insert: String::new(),
        }
    }

    /// Inserts lines before `start_line`.
    pub fn insert_lines(start_line: u32, insert: impl Into<String>) -> Self {
        Self::ReplaceLines {
            start_line,
            delete_count: 0,
            insert: insert.into(),
        }
    }

    /// First line this edit touches.
    pub fn line(&self) -> u32 {
        match self {
            Edit::ReplaceText { line, .. } => *line,
            Edit::ReplaceLines { start_line, .. } => *start_line,
        }
    }
}

/// A reported issue with a location and an optional fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// All ids naming the rule that produced this finding: the primary id
    /// first, then its aliases. Never empty.
    pub rule_ids: Vec<String>,

    /// Human-readable description of the issue.
    pub message: String,

    /// Line the issue is on (1-based, in the original document).
    pub line: u32,

    /// Column the issue starts at (1-based), when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    /// Number of characters highlighted, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    /// Full region for multi-line issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Location>,

    /// Additional explanation (expected vs. actual, for example).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Offending excerpt from the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Proposed fix. Absent for report-only findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<Edit>,
}

impl Finding {
    /// Creates a new finding.
    pub fn new(rule_ids: Vec<String>, message: impl Into<String>, line: u32) -> Self {
        Self {
            rule_ids,
            message: message.into(),
            line,
            column: None,
            length: None,
            range: None,
            detail: None,
            context: None,
            edit: None,
        }
    }

    /// Sets the start column.
    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }

    /// Sets the highlighted length.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the multi-line range.
    pub fn with_range(mut self, range: Location) -> Self {
        self.range = Some(range);
        self
    }

    /// Sets the detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the offending excerpt.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attaches a proposed fix.
    pub fn with_edit(mut self, edit: Edit) -> Self {
        self.edit = Some(edit);
        self
    }

    /// The primary rule id.
    pub fn primary_id(&self) -> &str {
        self.rule_ids.first().map(String::as_str).unwrap_or("")
    }
}

/// The canonical report order: line ascending, then column ascending with
/// missing columns first, then primary rule id lexicographically.
///
/// This is the externally visible order of every finding sequence the
/// engine produces.
pub fn canonical_order(a: &Finding, b: &Finding) -> Ordering {
    a.line
        .cmp(&b.line)
        .then_with(|| match (a.column, b.column) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.cmp(&y),
        })
        .then_with(|| a.primary_id().cmp(b.primary_id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn finding(id: &str, line: u32, column: Option<u32>) -> Finding {
        let mut f = Finding::new(vec![id.to_string()], "msg", line);
        f.column = column;
        f
    }

    #[test]
    fn test_finding_builder_chain() {
        let f = Finding::new(vec!["MD009".into(), "no-trailing-spaces".into()], "Trailing spaces", 3)
            .with_column(6)
            .with_length(3)
            .with_context("Hello   ")
            .with_edit(Edit::delete_text(3, 6, 3));

        assert_eq!(f.primary_id(), "MD009");
        assert_eq!(f.line, 3);
        assert_eq!(f.column, Some(6));
        assert_eq!(f.length, Some(3));
        assert!(f.edit.is_some());
        assert!(f.range.is_none());
    }

    #[test]
    fn test_edit_constructors() {
        assert_eq!(
            Edit::insert_text(2, 5, "x"),
            Edit::ReplaceText {
                line: 2,
                column: 5,
                delete_length: 0,
                insert: "x".into()
            }
        );
        assert_eq!(
            Edit::delete_lines(4, 2),
            Edit::ReplaceLines {
                start_line: 4,
                delete_count: 2,
                insert: String::new()
            }
        );
        assert_eq!(Edit::replace_line(7, "## B").line(), 7);
    }

    #[test]
    fn test_canonical_order_by_line() {
        let a = finding("MD001", 1, None);
        let b = finding("MD001", 2, None);
        assert_eq!(canonical_order(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_canonical_order_missing_column_first() {
        let a = finding("MD001", 3, None);
        let b = finding("MD001", 3, Some(1));
        assert_eq!(canonical_order(&a, &b), Ordering::Less);
        assert_eq!(canonical_order(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_canonical_order_rule_id_tiebreak() {
        let a = finding("MD009", 3, Some(5));
        let b = finding("MD010", 3, Some(5));
        assert_eq!(canonical_order(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_canonical_order_total() {
        let mut findings = vec![
            finding("MD010", 2, Some(4)),
            finding("MD001", 2, None),
            finding("MD009", 1, Some(9)),
            finding("MD009", 2, Some(4)),
        ];
        findings.sort_by(canonical_order);
        let ids: Vec<(&str, u32)> = findings.iter().map(|f| (f.primary_id(), f.line)).collect();
        assert_eq!(
            ids,
            vec![("MD009", 1), ("MD001", 2), ("MD009", 2), ("MD010", 2)]
        );
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let f = finding("MD012", 3, None);
        let json = serde_json::to_string(&f).unwrap();
        assert!(json.contains("rule_ids"));
        assert!(!json.contains("column"));
        assert!(!json.contains("edit"));
    }

    #[test]
    fn test_edit_serialization_tag() {
        let edit = Edit::replace_text(1, 2, 3, "x");
        let json = serde_json::to_string(&edit).unwrap();
        assert!(json.contains("\"kind\":\"replace_text\""));

        let back: Edit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, edit);
    }
}
