//! Token definition.
//!
//! A [`Token`] is one node of the structural index built over a document by
//! the parser. Each token exclusively owns its children; there are no parent
//! back-references and no cycles, so the tree is always traversed top-down.
//! The tree is built once per run and read-only afterward.

use serde::Serialize;

use crate::{Location, Position};

/// The structural kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Root document node.
    Document,
    /// Paragraph of running text.
    Paragraph,
    /// `#`-prefixed heading.
    AtxHeading,
    /// Heading underlined with `=` or `-`.
    SetextHeading,
    /// Item in an ordered or unordered list.
    ListItem,
    /// Code block delimited by ``` or ~~~ fences.
    FencedCode,
    /// Code block formed by 4-space indentation.
    IndentedCode,
    /// `>`-prefixed block quote.
    BlockQuote,
    /// Single row of a pipe table.
    TableRow,
    /// Raw HTML block.
    HtmlFlow,
    /// Thematic break (`---`, `***`, `___`).
    HorizontalRule,
}

/// Kind-specific payload attached to a token.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenData {
    #[default]
    None,
    /// Heading level (1-6) and whether the ATX form carries closing hashes.
    Heading { level: u8, closed: bool },
    /// Fence character (`` ` `` or `~`), fence length, and the info string.
    Fence {
        marker: char,
        length: u8,
        info: Option<String>,
    },
    /// List marker character and whether the list is ordered.
    ListMarker { marker: char, ordered: bool },
}

/// A node in the structural token tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The structural kind of this token.
    pub kind: TokenKind,

    /// Raw source text covered by this token, newlines included for
    /// multi-line tokens.
    pub text: String,

    /// Region of the source this token covers (1-based).
    pub location: Location,

    /// Child tokens, in document order. Exclusively owned.
    pub children: Vec<Token>,

    /// Kind-specific properties.
    #[serde(skip_serializing_if = "TokenData::is_none")]
    pub data: TokenData,
}

impl TokenData {
    fn is_none(&self) -> bool {
        matches!(self, TokenData::None)
    }
}

impl Token {
    /// Creates a new leaf token.
    pub fn new(kind: TokenKind, text: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
            children: Vec::new(),
            data: TokenData::None,
        }
    }

    /// Creates a new parent token with children.
    pub fn with_children(
        kind: TokenKind,
        text: impl Into<String>,
        location: Location,
        children: Vec<Token>,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
            children,
            data: TokenData::None,
        }
    }

    /// Attaches kind-specific data.
    pub fn with_data(mut self, data: TokenData) -> Self {
        self.data = data;
        self
    }

    /// First line covered by this token (1-based).
    #[inline]
    pub fn start_line(&self) -> u32 {
        self.location.start.line
    }

    /// Last line covered by this token (1-based).
    #[inline]
    pub fn end_line(&self) -> u32 {
        self.location.end.line
    }

    /// Start position of this token.
    #[inline]
    pub fn start(&self) -> Position {
        self.location.start
    }

    /// Returns true for either heading form.
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, TokenKind::AtxHeading | TokenKind::SetextHeading)
    }

    /// Returns true for either code-block form.
    pub fn is_code_block(&self) -> bool {
        matches!(self.kind, TokenKind::FencedCode | TokenKind::IndentedCode)
    }

    /// Returns true for a list item.
    pub fn is_list_item(&self) -> bool {
        self.kind == TokenKind::ListItem
    }

    /// Heading level, if this token is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self.data {
            TokenData::Heading { level, .. } => Some(level),
            _ => None,
        }
    }

    /// Fence info string, if this token is a fenced code block.
    pub fn fence_info(&self) -> Option<&str> {
        match &self.data {
            TokenData::Fence { info, .. } => info.as_deref(),
            _ => None,
        }
    }

    /// Depth-first iterator over this token and all its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Collects all descendant tokens (including self) of the given kind,
    /// in document order.
    pub fn tokens_of_kind(&self, kind: TokenKind) -> Vec<&Token> {
        self.descendants().filter(|t| t.kind == kind).collect()
    }
}

/// Depth-first, document-order traversal over a token tree.
pub struct Descendants<'a> {
    stack: Vec<&'a Token>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.stack.pop()?;
        self.stack.extend(token.children.iter().rev());
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(line: u32, level: u8, text: &str) -> Token {
        Token::new(
            TokenKind::AtxHeading,
            text,
            Location::lines(line, line, text.len() as u32),
        )
        .with_data(TokenData::Heading {
            level,
            closed: false,
        })
    }

    #[test]
    fn test_leaf_token() {
        let token = heading(1, 2, "## Title");
        assert_eq!(token.kind, TokenKind::AtxHeading);
        assert!(token.is_heading());
        assert!(!token.is_code_block());
        assert_eq!(token.heading_level(), Some(2));
        assert_eq!(token.start_line(), 1);
        assert_eq!(token.end_line(), 1);
    }

    #[test]
    fn test_fence_data() {
        let location = Location::lines(4, 6, 3);
        let token = Token::new(TokenKind::FencedCode, "```rust\nfn x() {}\n```", location)
            .with_data(TokenData::Fence {
                marker: '`',
                length: 3,
                info: Some("rust".into()),
            });

        assert!(token.is_code_block());
        assert_eq!(token.fence_info(), Some("rust"));
        assert_eq!(token.heading_level(), None);
    }

    #[test]
    fn test_descendants_order() {
        let tree = Token::with_children(
            TokenKind::Document,
            "",
            Location::lines(1, 3, 0),
            vec![
                heading(1, 1, "# A"),
                Token::with_children(
                    TokenKind::BlockQuote,
                    "> x\n> y",
                    Location::lines(2, 3, 3),
                    vec![Token::new(
                        TokenKind::Paragraph,
                        "x\ny",
                        Location::lines(2, 3, 1),
                    )],
                ),
            ],
        );

        let kinds: Vec<TokenKind> = tree.descendants().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Document,
                TokenKind::AtxHeading,
                TokenKind::BlockQuote,
                TokenKind::Paragraph,
            ]
        );
    }

    #[test]
    fn test_tokens_of_kind() {
        let tree = Token::with_children(
            TokenKind::Document,
            "",
            Location::lines(1, 4, 0),
            vec![heading(1, 1, "# A"), heading(3, 2, "## B")],
        );

        let headings = tree.tokens_of_kind(TokenKind::AtxHeading);
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].start_line(), 1);
        assert_eq!(headings[1].start_line(), 3);
        assert!(tree.tokens_of_kind(TokenKind::TableRow).is_empty());
    }

    #[test]
    fn test_serialize_kind_kebab_case() {
        let token = heading(1, 1, "# A");
        let json = serde_json::to_string(&token).unwrap();
        assert!(json.contains("atx-heading"));
    }
}
