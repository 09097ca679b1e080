//! no-trailing-spaces: no spaces at the end of lines.
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | br_spaces | number | 2 | Trailing-space count allowed as a hard line break (2 or more to take effect) |
//! | strict | boolean | false | Flag hard-break spaces too |

use serde_json::{Value, json};

use crate::check::{Check, CheckContext, CheckError, CheckMeta};
use crate::finding::{Edit, Finding};

const META: CheckMeta = CheckMeta {
    aliases: &["MD009", "no-trailing-spaces"],
    description: "Trailing spaces",
    tags: &["whitespace"],
};

/// Flags and strips trailing spaces.
pub struct NoTrailingSpaces;

impl Check for NoTrailingSpaces {
    fn meta(&self) -> &CheckMeta {
        &META
    }

    fn default_settings(&self) -> Value {
        json!({"br_spaces": 2, "strict": false})
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError> {
        let br_spaces = ctx.option_u32("br_spaces", 2);
        let strict = ctx.option_bool("strict", false);

        let mut findings = Vec::new();
        for (idx, text) in ctx.lines().iter().enumerate() {
            let trimmed = text.trim_end_matches(' ');
            let trailing = (text.chars().count() - trimmed.chars().count()) as u32;
            if trailing == 0 {
                continue;
            }
            // A run of exactly `br_spaces` spaces spells a hard line break.
            if !strict && br_spaces >= 2 && trailing == br_spaces {
                continue;
            }

            let line = idx as u32 + 1;
            let column = trimmed.chars().count() as u32 + 1;
            findings.push(
                Finding::new(META.rule_ids(), "Trailing spaces", line)
                    .with_column(column)
                    .with_length(trailing)
                    .with_detail(format!("Expected: 0 or {br_spaces}; Actual: {trailing}"))
                    .with_edit(Edit::delete_text(line, column, trailing)),
            );
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{fix_check, run_check};
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_lines_pass() {
        let findings = run_check(&NoTrailingSpaces, "no trailing\nspaces here\n", json!({}));
        assert!(findings.is_empty());
    }

    #[test]
    fn trailing_spaces_flagged_with_position() {
        let findings = run_check(&NoTrailingSpaces, "Hello   \n", json!({}));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[0].column, Some(6));
        assert_eq!(findings[0].length, Some(3));
    }

    #[test]
    fn fix_strips_trailing_spaces() {
        let fixed = fix_check(&NoTrailingSpaces, "Hello   \nWorld \n", json!({}));
        assert_eq!(fixed, "Hello\nWorld");
    }

    #[test]
    fn hard_break_spaces_allowed_by_default() {
        let findings = run_check(&NoTrailingSpaces, "line break  \n", json!({}));
        assert!(findings.is_empty());
    }

    #[test]
    fn hard_break_spaces_flagged_in_strict_mode() {
        let findings = run_check(&NoTrailingSpaces, "line break  \n", json!({"strict": true}));
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn custom_br_spaces() {
        let findings = run_check(&NoTrailingSpaces, "a   \nb  \n", json!({"br_spaces": 3}));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 2);
    }

    #[test]
    fn multibyte_line_positions_counted_in_characters() {
        let findings = run_check(&NoTrailingSpaces, "日本語 \n", json!({}));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, Some(4));
        let fixed = fix_check(&NoTrailingSpaces, "日本語 \n", json!({}));
        assert_eq!(fixed, "日本語");
    }

    #[test]
    fn empty_document() {
        assert!(run_check(&NoTrailingSpaces, "", json!({})).is_empty());
    }
}
