//! Immutable per-run document snapshot.

use mdcheck_parser::{ParseError, Parser};
use mdcheck_token::{Token, TokenIndex};

/// The fixed view of one document handed to every check.
///
/// Holds the raw line sequence (no trailing newlines stored), the structural
/// token tree built once by the parser, and an opaque source identifier.
/// Immutable for the duration of a run; line numbers are 1-based and stable.
#[derive(Debug)]
pub struct Document {
    source_id: String,
    lines: Vec<String>,
    tokens: Token,
}

impl Document {
    /// Builds a document by parsing `text` with the given parser.
    pub fn parse(
        source_id: impl Into<String>,
        text: &str,
        parser: &dyn Parser,
    ) -> Result<Self, ParseError> {
        let tokens = parser.parse(text)?;
        Ok(Self {
            source_id: source_id.into(),
            lines: text.lines().map(str::to_string).collect(),
            tokens,
        })
    }

    /// Builds a document from already-split lines and a prebuilt token tree.
    pub fn from_parts(source_id: impl Into<String>, lines: Vec<String>, tokens: Token) -> Self {
        Self {
            source_id: source_id.into(),
            lines,
            tokens,
        }
    }

    /// The opaque source identifier (usually a path).
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// All lines, in order, without trailing newlines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of one line (1-based).
    pub fn line(&self, number: u32) -> Option<&str> {
        if number == 0 {
            return None;
        }
        self.lines.get(number as usize - 1).map(String::as_str)
    }

    /// Root of the structural token tree.
    pub fn tokens(&self) -> &Token {
        &self.tokens
    }

    /// Builds the line-containment index over the token tree.
    ///
    /// The engine builds this once per run and shares it with every check.
    pub fn token_index(&self) -> TokenIndex<'_> {
        TokenIndex::new(&self.tokens, self.lines.len())
    }

    /// Reassembles the document text (lines joined with `\n`).
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
