//! hr-style: one thematic-break style throughout the document.
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | style | string | "consistent" | `consistent`, or the exact break text (e.g. `---`, `* * *`) |

use serde_json::{Value, json};

use crate::check::{Check, CheckContext, CheckError, CheckMeta};
use crate::finding::{Edit, Finding};
use mdcheck_token::TokenKind;

const META: CheckMeta = CheckMeta {
    aliases: &["MD035", "hr-style"],
    description: "Horizontal rule style",
    tags: &["hr"],
};

/// Enforces a single thematic-break spelling.
pub struct HrStyle;

impl Check for HrStyle {
    fn meta(&self) -> &CheckMeta {
        &META
    }

    fn default_settings(&self) -> Value {
        json!({"style": "consistent"})
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError> {
        let style = ctx.option_str("style", "consistent");

        let mut findings = Vec::new();
        let mut expected: Option<String> = if style == "consistent" {
            None
        } else {
            Some(style.to_string())
        };

        for token in ctx.tokens().tokens_of_kind(TokenKind::HorizontalRule) {
            let observed = token.text.trim().to_string();
            let Some(want) = &expected else {
                expected = Some(observed);
                continue;
            };
            if observed == *want {
                continue;
            }

            let line = token.start_line();
            findings.push(
                Finding::new(META.rule_ids(), "Horizontal rule style", line)
                    .with_context(observed.clone())
                    .with_detail(format!("Expected: {want}; Actual: {observed}"))
                    .with_edit(Edit::replace_line(line, want.clone())),
            );
        }

        Ok(findings)
    }
}
