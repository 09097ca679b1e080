//! heading-style: one heading style throughout the document.
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | style | string | "consistent" | One of `consistent`, `atx`, `atx_closed`, `setext` |
//!
//! With `consistent`, the first heading sets the expected style. Conversions
//! between the two ATX forms are auto-fixed; conversions to or from setext
//! change the line structure of the document and are report-only. Under
//! `setext`, headings deeper than level two cannot be expressed and are
//! exempt.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::check::{Check, CheckContext, CheckError, CheckMeta};
use crate::finding::{Edit, Finding};
use mdcheck_token::{Token, TokenKind};

const META: CheckMeta = CheckMeta {
    aliases: &["MD003", "heading-style"],
    description: "Heading style",
    tags: &["headings"],
};

/// The style axis for headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StyleOption {
    #[default]
    Consistent,
    Atx,
    AtxClosed,
    Setext,
}

/// The style one heading actually uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObservedStyle {
    Atx,
    AtxClosed,
    Setext,
}

impl ObservedStyle {
    fn of(token: &Token) -> Self {
        match token.kind {
            TokenKind::SetextHeading => ObservedStyle::Setext,
            _ => match token.data {
                mdcheck_token::TokenData::Heading { closed: true, .. } => ObservedStyle::AtxClosed,
                _ => ObservedStyle::Atx,
            },
        }
    }

    fn name(self) -> &'static str {
        match self {
            ObservedStyle::Atx => "atx",
            ObservedStyle::AtxClosed => "atx_closed",
            ObservedStyle::Setext => "setext",
        }
    }
}

/// Enforces a single heading style across the document.
pub struct HeadingStyle;

impl Check for HeadingStyle {
    fn meta(&self) -> &CheckMeta {
        &META
    }

    fn default_settings(&self) -> Value {
        json!({"style": "consistent"})
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError> {
        let option: StyleOption = ctx
            .settings()
            .get("style")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        let mut findings = Vec::new();
        let mut expected: Option<ObservedStyle> = match option {
            StyleOption::Consistent => None,
            StyleOption::Atx => Some(ObservedStyle::Atx),
            StyleOption::AtxClosed => Some(ObservedStyle::AtxClosed),
            StyleOption::Setext => Some(ObservedStyle::Setext),
        };

        for token in ctx.tokens().descendants().filter(|t| t.is_heading()) {
            let observed = ObservedStyle::of(token);
            let Some(want) = expected else {
                expected = Some(observed);
                continue;
            };
            if observed == want {
                continue;
            }
            // Setext has no form for levels three and up.
            if want == ObservedStyle::Setext && token.heading_level().unwrap_or(1) > 2 {
                continue;
            }

            let line = token.start_line();
            let mut finding = Finding::new(META.rule_ids(), "Heading style", line).with_detail(
                format!("Expected: {}; Actual: {}", want.name(), observed.name()),
            );
            if let Some(text) = ctx.line(line) {
                finding = finding.with_context(text.to_string());
                if let Some(edit) = atx_conversion(text, line, observed, want) {
                    finding = finding.with_edit(edit);
                }
            }
            findings.push(finding);
        }

        Ok(findings)
    }
}

/// Fix for conversions between the two ATX forms. Anything involving setext
/// is structural and stays report-only.
fn atx_conversion(
    text: &str,
    line: u32,
    observed: ObservedStyle,
    want: ObservedStyle,
) -> Option<Edit> {
    match (observed, want) {
        (ObservedStyle::Atx, ObservedStyle::AtxClosed) => {
            let level = text.trim_start().chars().take_while(|&c| c == '#').count();
            let width = text.trim_end().chars().count() as u32;
            Some(Edit::insert_text(
                line,
                width + 1,
                format!(" {}", "#".repeat(level)),
            ))
        }
        (ObservedStyle::AtxClosed, ObservedStyle::Atx) => {
            let trimmed = text.trim_end();
            let without_hashes = trimmed.trim_end_matches('#').trim_end();
            let keep = without_hashes.chars().count() as u32;
            let width = text.chars().count() as u32;
            Some(Edit::delete_text(line, keep + 1, width - keep))
        }
        _ => None,
    }
}
