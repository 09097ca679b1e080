//! # mdcheck_token
//!
//! Structural token tree for mdcheck.
//!
//! This crate defines the read-only structural index built over a Markdown
//! document: the [`Token`] tree produced by a parser, the 1-based
//! [`Position`]/[`Location`] coordinate types shared with findings and
//! edits, and the [`TokenIndex`] that answers containment queries per line.
//!
//! ## Ownership model
//!
//! Every token exclusively owns its children. There are no parent
//! back-references and no cycles; the tree is traversed top-down only.
//! "Nearest ancestor" queries go through [`TokenIndex`], which precomputes
//! a per-line containment path once per run.

mod index;
mod span;
mod token;

pub use index::TokenIndex;
pub use span::{Location, Position};
pub use token::{Descendants, Token, TokenData, TokenKind};
