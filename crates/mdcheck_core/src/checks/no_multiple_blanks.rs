//! no-multiple-blanks: collapse runs of consecutive blank lines.
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | maximum | number | 1 | Consecutive blank lines allowed |
//!
//! Blank lines inside code blocks are content and never counted.

use serde_json::{Value, json};

use crate::check::{Check, CheckContext, CheckError, CheckMeta};
use crate::finding::{Edit, Finding};
use mdcheck_token::Location;

const META: CheckMeta = CheckMeta {
    aliases: &["MD012", "no-multiple-blanks"],
    description: "Multiple consecutive blank lines",
    tags: &["whitespace", "blank_lines"],
};

/// Flags blank-line runs longer than the configured maximum and deletes the
/// excess lines.
pub struct NoMultipleBlanks;

impl Check for NoMultipleBlanks {
    fn meta(&self) -> &CheckMeta {
        &META
    }

    fn default_settings(&self) -> Value {
        json!({"maximum": 1})
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError> {
        let maximum = ctx.option_u32("maximum", 1);

        let mut findings = Vec::new();
        let mut run: u32 = 0;
        let mut first_excess: u32 = 0;

        let flush = |run: u32, first_excess: u32, findings: &mut Vec<Finding>| {
            if run > maximum {
                let excess = run - maximum;
                findings.push(
                    Finding::new(META.rule_ids(), "Multiple consecutive blank lines", first_excess)
                        .with_detail(format!("Expected: {maximum}; Actual: {run}"))
                        .with_range(Location::lines(first_excess, first_excess + excess - 1, 0))
                        .with_edit(Edit::delete_lines(first_excess, excess)),
                );
            }
        };

        for (idx, text) in ctx.lines().iter().enumerate() {
            let line = idx as u32 + 1;
            let blank = text.trim().is_empty() && !ctx.index().line_in_code_block(line);
            if blank {
                run += 1;
                if run == maximum + 1 {
                    first_excess = line;
                }
            } else {
                flush(run, first_excess, &mut findings);
                run = 0;
            }
        }
        flush(run, first_excess, &mut findings);

        Ok(findings)
    }
}
