//! no-hard-tabs: spaces instead of hard tabs.
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | spaces_per_tab | number | 1 | Spaces each tab is replaced with |
//! | code_blocks | boolean | true | Flag tabs inside code blocks |

use serde_json::{Value, json};

use crate::check::{Check, CheckContext, CheckError, CheckMeta};
use crate::finding::{Edit, Finding};

const META: CheckMeta = CheckMeta {
    aliases: &["MD010", "no-hard-tabs"],
    description: "Hard tabs",
    tags: &["whitespace"],
};

/// Flags hard tabs and replaces them with spaces.
pub struct NoHardTabs;

impl Check for NoHardTabs {
    fn meta(&self) -> &CheckMeta {
        &META
    }

    fn default_settings(&self) -> Value {
        json!({"spaces_per_tab": 1, "code_blocks": true})
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError> {
        let spaces_per_tab = ctx.option_u32("spaces_per_tab", 1) as usize;
        let code_blocks = ctx.option_bool("code_blocks", true);

        let mut findings = Vec::new();
        for (idx, text) in ctx.lines().iter().enumerate() {
            let line = idx as u32 + 1;
            if !code_blocks && ctx.index().line_in_code_block(line) {
                continue;
            }
            for (char_idx, ch) in text.chars().enumerate() {
                if ch != '\t' {
                    continue;
                }
                let column = char_idx as u32 + 1;
                findings.push(
                    Finding::new(META.rule_ids(), "Hard tabs", line)
                        .with_column(column)
                        .with_length(1)
                        .with_edit(Edit::replace_text(
                            line,
                            column,
                            1,
                            " ".repeat(spaces_per_tab),
                        )),
                );
            }
        }

        Ok(findings)
    }
}
