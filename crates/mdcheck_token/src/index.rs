//! Line-to-token containment index.
//!
//! Built once per run from the token tree, the index answers "which tokens
//! contain line N" without upward pointers: for every line it stores the
//! chain of tokens covering that line, outermost first. Nearest-ancestor
//! queries walk that chain in reverse.

use crate::{Token, TokenKind};

/// Precomputed map from line number to the containment path of tokens
/// covering that line.
pub struct TokenIndex<'a> {
    /// `paths[i]` is the containment path for line `i + 1`, outermost first.
    /// The root document token is not included.
    paths: Vec<Vec<&'a Token>>,
}

impl<'a> TokenIndex<'a> {
    /// Builds the index for a document of `line_count` lines.
    ///
    /// Lines not covered by any token (for example blank separator lines)
    /// get an empty path.
    pub fn new(root: &'a Token, line_count: usize) -> Self {
        let mut paths: Vec<Vec<&'a Token>> = vec![Vec::new(); line_count];
        for child in &root.children {
            Self::collect(child, &mut paths);
        }
        Self { paths }
    }

    fn collect(token: &'a Token, paths: &mut [Vec<&'a Token>]) {
        let first = token.start_line() as usize;
        let last = token.end_line() as usize;
        for line in first..=last.min(paths.len()) {
            if line >= 1 {
                paths[line - 1].push(token);
            }
        }
        for child in &token.children {
            Self::collect(child, paths);
        }
    }

    /// Containment path for a line (1-based), outermost token first.
    pub fn path_at_line(&self, line: u32) -> &[&'a Token] {
        if line == 0 {
            return &[];
        }
        self.paths
            .get(line as usize - 1)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The innermost token containing the given line.
    pub fn innermost_at_line(&self, line: u32) -> Option<&'a Token> {
        self.path_at_line(line).last().copied()
    }

    /// The innermost token of the given kind containing the line, searching
    /// from the inside out.
    pub fn nearest_of_kind(&self, line: u32, kind: TokenKind) -> Option<&'a Token> {
        self.path_at_line(line)
            .iter()
            .rev()
            .find(|t| t.kind == kind)
            .copied()
    }

    /// Returns true if the line falls inside any code block.
    pub fn line_in_code_block(&self, line: u32) -> bool {
        self.path_at_line(line).iter().any(|t| t.is_code_block())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Location, Token, TokenKind};

    fn sample_tree() -> Token {
        // 1: # Title
        // 2:
        // 3: > quoted
        // 4: > ```
        // 5: > code
        // 6: > ```
        Token::with_children(
            TokenKind::Document,
            "",
            Location::lines(1, 6, 5),
            vec![
                Token::new(TokenKind::AtxHeading, "# Title", Location::lines(1, 1, 7)),
                Token::with_children(
                    TokenKind::BlockQuote,
                    "> quoted\n> ```\n> code\n> ```",
                    Location::lines(3, 6, 5),
                    vec![
                        Token::new(TokenKind::Paragraph, "quoted", Location::lines(3, 3, 6)),
                        Token::new(
                            TokenKind::FencedCode,
                            "```\ncode\n```",
                            Location::lines(4, 6, 3),
                        ),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_innermost_at_line() {
        let tree = sample_tree();
        let index = TokenIndex::new(&tree, 6);

        assert_eq!(
            index.innermost_at_line(1).map(|t| t.kind),
            Some(TokenKind::AtxHeading)
        );
        assert_eq!(index.innermost_at_line(2), None);
        assert_eq!(
            index.innermost_at_line(3).map(|t| t.kind),
            Some(TokenKind::Paragraph)
        );
        assert_eq!(
            index.innermost_at_line(5).map(|t| t.kind),
            Some(TokenKind::FencedCode)
        );
    }

    #[test]
    fn test_path_outermost_first() {
        let tree = sample_tree();
        let index = TokenIndex::new(&tree, 6);

        let path = index.path_at_line(5);
        let kinds: Vec<TokenKind> = path.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::BlockQuote, TokenKind::FencedCode]);
    }

    #[test]
    fn test_nearest_of_kind() {
        let tree = sample_tree();
        let index = TokenIndex::new(&tree, 6);

        assert_eq!(
            index.nearest_of_kind(5, TokenKind::BlockQuote).map(|t| t.start_line()),
            Some(3)
        );
        assert_eq!(index.nearest_of_kind(1, TokenKind::BlockQuote), None);
    }

    #[test]
    fn test_line_in_code_block() {
        let tree = sample_tree();
        let index = TokenIndex::new(&tree, 6);

        assert!(!index.line_in_code_block(3));
        assert!(index.line_in_code_block(4));
        assert!(index.line_in_code_block(5));
        assert!(index.line_in_code_block(6));
    }

    #[test]
    fn test_out_of_range_lines() {
        let tree = sample_tree();
        let index = TokenIndex::new(&tree, 6);

        assert!(index.path_at_line(0).is_empty());
        assert!(index.path_at_line(99).is_empty());
        assert_eq!(index.innermost_at_line(99), None);
    }
}
