//! The check contract.
//!
//! A check is an independent, pure analysis of one document. It receives a
//! read-only [`CheckContext`] and returns findings; it must not hold state
//! across calls and must be deterministic for a given context, which is what
//! makes results reproducible and checks schedulable in parallel.

use serde_json::Value;
use thiserror::Error;

use mdcheck_token::{Token, TokenIndex};

use crate::document::Document;
use crate::finding::Finding;

/// Static declaration of a check: its ids, description, and tags.
#[derive(Debug, Clone, Copy)]
pub struct CheckMeta {
    /// All equivalent ids for this check, primary id first. Never empty.
    pub aliases: &'static [&'static str],
    /// Human description of what the check enforces.
    pub description: &'static str,
    /// Grouping tags (e.g. `headings`, `whitespace`).
    pub tags: &'static [&'static str],
}

impl CheckMeta {
    /// The primary id (first alias).
    pub fn primary_id(&self) -> &'static str {
        self.aliases.first().copied().unwrap_or("")
    }

    /// All ids as owned strings, for attaching to findings.
    pub fn rule_ids(&self) -> Vec<String> {
        self.aliases.iter().map(|s| s.to_string()).collect()
    }
}

/// Failure of one check over one document.
///
/// Recorded by the engine and surfaced alongside results; never aborts
/// sibling checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CheckError {
    /// What went wrong.
    pub message: String,
}

impl CheckError {
    /// Creates a new check error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Everything a check may read while analyzing one document: the shared
/// immutable snapshot, the prebuilt token index, and the options resolved
/// for this specific check (defaults merged with user settings).
pub struct CheckContext<'a> {
    document: &'a Document,
    index: &'a TokenIndex<'a>,
    settings: &'a Value,
}

impl<'a> CheckContext<'a> {
    /// Creates a context for one check over one document.
    pub fn new(document: &'a Document, index: &'a TokenIndex<'a>, settings: &'a Value) -> Self {
        Self {
            document,
            index,
            settings,
        }
    }

    /// The document under analysis.
    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// All lines of the document.
    pub fn lines(&self) -> &'a [String] {
        self.document.lines()
    }

    /// Text of one line (1-based).
    pub fn line(&self, number: u32) -> Option<&'a str> {
        self.document.line(number)
    }

    /// Root of the token tree.
    pub fn tokens(&self) -> &'a Token {
        self.document.tokens()
    }

    /// The line-containment index.
    pub fn index(&self) -> &'a TokenIndex<'a> {
        self.index
    }

    /// The resolved options for this check.
    pub fn settings(&self) -> &'a Value {
        self.settings
    }

    /// An integer option, falling back when absent or mistyped.
    pub fn option_u32(&self, name: &str, fallback: u32) -> u32 {
        self.settings
            .get(name)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(fallback)
    }

    /// A boolean option, falling back when absent or mistyped.
    pub fn option_bool(&self, name: &str, fallback: bool) -> bool {
        self.settings
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(fallback)
    }

    /// A string option, falling back when absent or mistyped.
    pub fn option_str(&self, name: &str, fallback: &'a str) -> &'a str {
        self.settings
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
    }
}

/// An independent analysis producing findings for one document.
///
/// Implementations must be pure reads of the context: no mutation of shared
/// state, no I/O, deterministic output, and tolerance of empty documents.
/// A check that attaches an edit to a finding guarantees that applying that
/// edit alone resolves exactly that violation; the edit engine's idempotence
/// depends on it.
pub trait Check: Send + Sync {
    /// Static metadata: aliases, description, tags.
    fn meta(&self) -> &CheckMeta;

    /// Default options, as a JSON object. User settings are merged over
    /// these key by key.
    fn default_settings(&self) -> Value {
        Value::Object(serde_json::Map::new())
    }

    /// Analyzes the document and returns findings in document order.
    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_accessors() {
        let meta = CheckMeta {
            aliases: &["MD009", "no-trailing-spaces"],
            description: "Trailing spaces",
            tags: &["whitespace"],
        };
        assert_eq!(meta.primary_id(), "MD009");
        assert_eq!(meta.rule_ids(), vec!["MD009", "no-trailing-spaces"]);
    }

    #[test]
    fn test_option_helpers() {
        let doc = Document::from_parts(
            "t.md",
            vec!["x".to_string()],
            mdcheck_token::Token::new(
                mdcheck_token::TokenKind::Document,
                "x",
                mdcheck_token::Location::lines(1, 1, 1),
            ),
        );
        let index = doc.token_index();
        let settings = serde_json::json!({"maximum": 3, "strict": true, "style": "atx"});
        let ctx = CheckContext::new(&doc, &index, &settings);

        assert_eq!(ctx.option_u32("maximum", 1), 3);
        assert_eq!(ctx.option_u32("missing", 7), 7);
        assert!(ctx.option_bool("strict", false));
        assert_eq!(ctx.option_str("style", "consistent"), "atx");
        assert_eq!(ctx.option_str("missing", "consistent"), "consistent");
    }

    #[test]
    fn test_check_error_display() {
        let err = CheckError::new("boom");
        assert_eq!(err.to_string(), "boom");
    }
}
