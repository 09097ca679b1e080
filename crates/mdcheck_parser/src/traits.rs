//! Parser trait definition.

use mdcheck_token::Token;

use crate::ParseError;

/// Trait for building a structural token tree from source text.
///
/// Implementations convert raw document text into the [`Token`] tree that
/// checks query instead of re-deriving structure themselves. Positions in
/// the produced tree are 1-based and match the raw line split of the input.
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions do not include the leading dot (e.g., `["md", "markdown"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a token tree rooted at a document token.
    fn parse(&self, source: &str) -> Result<Token, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
