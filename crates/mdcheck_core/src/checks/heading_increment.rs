//! heading-increment: heading levels increment one step at a time.
//!
//! A document that jumps from `# A` straight to `### B` skipped a level.
//! ATX headings get an auto-fix that rewrites the heading to the expected
//! level; setext headings are report-only since levels above two cannot be
//! expressed in that form.

use crate::check::{Check, CheckContext, CheckError, CheckMeta};
use crate::finding::{Edit, Finding};
use mdcheck_token::TokenKind;

const META: CheckMeta = CheckMeta {
    aliases: &["MD001", "heading-increment"],
    description: "Heading levels should only increment by one level at a time",
    tags: &["headings"],
};

/// Flags heading levels that skip over an intermediate level.
pub struct HeadingIncrement;

impl Check for HeadingIncrement {
    fn meta(&self) -> &CheckMeta {
        &META
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError> {
        let mut findings = Vec::new();
        let mut previous: Option<u8> = None;

        for token in ctx.tokens().descendants().filter(|t| t.is_heading()) {
            let level = token.heading_level().unwrap_or(1);
            if let Some(prev) = previous
                && level > prev + 1
            {
                let expected = prev + 1;
                let line = token.start_line();
                let mut finding = Finding::new(
                    META.rule_ids(),
                    "Heading levels should only increment by one level at a time",
                    line,
                )
                .with_detail(format!("Expected h{expected}, found h{level}"));

                if let Some(text) = ctx.line(line) {
                    finding = finding.with_context(text.to_string());
                    if token.kind == TokenKind::AtxHeading
                        && let Some(idx) = text.find('#')
                    {
                        // Keep whatever precedes the marker (indentation,
                        // block-quote prefix) and swap the hash run.
                        let prefix = &text[..idx];
                        let rest = text[idx..].trim_start_matches('#');
                        let fixed = format!("{prefix}{}{rest}", "#".repeat(expected as usize));
                        finding = finding.with_edit(Edit::replace_line(line, fixed));
                    }
                }
                findings.push(finding);
            }
            previous = Some(level);
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{fix_check, run_check};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn increments_by_one_pass() {
        let findings = run_check(&HeadingIncrement, "# A\n## B\n### C\n", json!({}));
        assert!(findings.is_empty());
    }

    #[test]
    fn level_jump_is_flagged() {
        let findings = run_check(&HeadingIncrement, "# A\n### B\n", json!({}));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 2);
        assert_eq!(findings[0].detail.as_deref(), Some("Expected h2, found h3"));
    }

    #[test]
    fn fix_rewrites_heading_to_expected_level() {
        let fixed = fix_check(&HeadingIncrement, "# A\n### B\n", json!({}));
        assert_eq!(fixed, "# A\n## B");
    }

    #[test]
    fn decreasing_levels_are_fine() {
        let findings = run_check(&HeadingIncrement, "# A\n## B\n# C\n## D\n", json!({}));
        assert!(findings.is_empty());
    }

    #[test]
    fn setext_jump_is_report_only() {
        // h1 (setext) followed by an h3 ATX is a jump with a fix; an h1 ATX
        // followed by a setext h2 is fine.
        let findings = run_check(&HeadingIncrement, "Title\n=====\n\n### Deep\n", json!({}));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].edit.is_some());

        let findings = run_check(&HeadingIncrement, "# A\n\nSub\n---\n", json!({}));
        assert!(findings.is_empty());
    }

    #[test]
    fn empty_document() {
        let findings = run_check(&HeadingIncrement, "", json!({}));
        assert!(findings.is_empty());
    }

    #[test]
    fn headings_inside_block_quotes_count() {
        let findings = run_check(&HeadingIncrement, "> # A\n> ### B\n", json!({}));
        assert_eq!(findings.len(), 1);
    }
}
