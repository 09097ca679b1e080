//! # mdcheck_parser
//!
//! Block-level Markdown parsing for mdcheck.
//!
//! This crate turns raw document text into the structural token tree defined
//! by `mdcheck_token`. The engine consumes the [`Parser`] trait; the bundled
//! [`MarkdownParser`] is a block-level implementation covering the structures
//! checks care about (headings, code blocks, quotes, lists, tables, HTML
//! blocks, thematic breaks, paragraphs).
//!
//! Positions in the produced tree are 1-based and match the raw line split
//! of the input, so token queries and direct line scans agree on numbering.

mod error;
mod markdown;
mod traits;

pub use error::ParseError;
pub use markdown::MarkdownParser;
pub use traits::Parser;
