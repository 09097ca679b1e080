//! line-length: lines stay under a maximum length.
//!
//! Length is measured in user-perceived characters (grapheme clusters), so
//! accented and CJK text is not over-counted. Report-only: wrapping prose
//! is an editorial decision, not a mechanical one.
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | line_length | number | 80 | Maximum line length |
//! | code_blocks | boolean | true | Measure lines inside code blocks |

use serde_json::{Value, json};
use unicode_segmentation::UnicodeSegmentation;

use crate::check::{Check, CheckContext, CheckError, CheckMeta};
use crate::finding::Finding;

const META: CheckMeta = CheckMeta {
    aliases: &["MD013", "line-length"],
    description: "Line length",
    tags: &["line_length"],
};

/// Flags lines longer than the configured maximum.
pub struct LineLength;

impl Check for LineLength {
    fn meta(&self) -> &CheckMeta {
        &META
    }

    fn default_settings(&self) -> Value {
        json!({"line_length": 80, "code_blocks": true})
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError> {
        let maximum = ctx.option_u32("line_length", 80);
        let code_blocks = ctx.option_bool("code_blocks", true);

        let mut findings = Vec::new();
        for (idx, text) in ctx.lines().iter().enumerate() {
            let line = idx as u32 + 1;
            if !code_blocks && ctx.index().line_in_code_block(line) {
                continue;
            }
            let width = text.graphemes(true).count() as u32;
            if width > maximum {
                findings.push(
                    Finding::new(META.rule_ids(), "Line length", line)
                        .with_column(maximum + 1)
                        .with_length(width - maximum)
                        .with_detail(format!("Expected: {maximum}; Actual: {width}")),
                );
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::run_check;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_lines_pass() {
        assert!(run_check(&LineLength, "short\n", json!({})).is_empty());
    }

    #[test]
    fn long_line_flagged_at_limit_column() {
        let long = "x".repeat(85);
        let findings = run_check(&LineLength, &format!("{long}\n"), json!({}));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, Some(81));
        assert_eq!(findings[0].length, Some(5));
        assert!(findings[0].edit.is_none());
    }

    #[test]
    fn custom_limit() {
        let findings = run_check(&LineLength, "0123456789\n", json!({"line_length": 5}));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].detail.as_deref(), Some("Expected: 5; Actual: 10"));
    }

    #[test]
    fn graphemes_counted_not_bytes() {
        // 6 characters, 18 bytes.
        let findings = run_check(&LineLength, "日本語日本語\n", json!({"line_length": 6}));
        assert!(findings.is_empty());
    }

    #[test]
    fn code_blocks_can_be_excluded() {
        let long = "y".repeat(30);
        let source = format!("```\n{long}\n```\n");
        assert_eq!(
            run_check(&LineLength, &source, json!({"line_length": 10})).len(),
            1
        );
        assert!(
            run_check(
                &LineLength,
                &source,
                json!({"line_length": 10, "code_blocks": false})
            )
            .is_empty()
        );
    }
}
