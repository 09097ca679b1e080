//! code-fence-style: one fence character throughout the document.
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | style | string | "consistent" | One of `consistent`, `backtick`, `tilde` |
//!
//! The fix rewrites the whole fenced block (open and close fence lines) in
//! one line-range edit, leaving the code content untouched.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::check::{Check, CheckContext, CheckError, CheckMeta};
use crate::finding::{Edit, Finding};
use mdcheck_token::{TokenData, TokenKind};

const META: CheckMeta = CheckMeta {
    aliases: &["MD048", "code-fence-style"],
    description: "Code fence style",
    tags: &["code"],
};

/// The style axis for fence markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StyleOption {
    #[default]
    Consistent,
    Backtick,
    Tilde,
}

impl StyleOption {
    fn marker(self) -> Option<char> {
        match self {
            StyleOption::Consistent => None,
            StyleOption::Backtick => Some('`'),
            StyleOption::Tilde => Some('~'),
        }
    }
}

fn marker_name(marker: char) -> &'static str {
    if marker == '`' { "backtick" } else { "tilde" }
}

/// Enforces a single fence character for fenced code blocks.
pub struct CodeFenceStyle;

impl Check for CodeFenceStyle {
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
        let mut expected = option.marker();

        for token in ctx.tokens().tokens_of_kind(TokenKind::FencedCode) {
            let TokenData::Fence { marker, .. } = token.data else {
                continue;
            };
            let Some(want) = expected else {
                expected = Some(marker);
                continue;
            };
            if marker == want {
                continue;
            }

            let start_line = token.start_line();
            let end_line = token.end_line();
            let span = end_line - start_line + 1;
            let rewritten: Vec<String> = (start_line..=end_line)
                .map(|n| {
                    let text = ctx.line(n).unwrap_or_default();
                    if n == start_line || (n == end_line && is_close_fence(text, marker)) {
                        swap_fence_marker(text, marker, want)
                    } else {
                        text.to_string()
                    }
                })
                .collect();

            findings.push(
                Finding::new(META.rule_ids(), "Code fence style", start_line)
                    .with_detail(format!(
                        "Expected: {}; Actual: {}",
                        marker_name(want),
                        marker_name(marker)
                    ))
                    .with_edit(Edit::ReplaceLines {
                        start_line,
                        delete_count: span,
                        insert: rewritten.join("\n"),
                    }),
            );
        }

        Ok(findings)
    }
}

fn is_close_fence(text: &str, marker: char) -> bool {
    let t = text.trim();
    !t.is_empty() && t.chars().all(|c| c == marker)
}

/// Replaces the run of fence characters on a fence line, keeping
/// indentation and the info string.
fn swap_fence_marker(text: &str, from: char, to: char) -> String {
    let Some(start) = text.find(from) else {
        return text.to_string();
    };
    let run = text[start..].chars().take_while(|&c| c == from).count();
    let mut result = String::with_capacity(text.len());
    result.push_str(&text[..start]);
    result.extend(std::iter::repeat_n(to, run));
    result.push_str(&text[start + run * from.len_utf8()..]);
    result
}
