//! # mdcheck_core
//!
//! Core lint engine for mdcheck.
//!
//! This crate provides:
//! - The immutable per-run [`Document`] snapshot handed to every check
//! - The [`Finding`]/[`Edit`] data model with original-document coordinates
//! - The [`Check`] contract and the alias-keyed [`CheckRegistry`]
//! - The [`Linter`] execution engine (parallel checks, canonical report
//!   order, per-check failure isolation)
//! - The edit engine ([`apply_edits`]): whole-set conflict detection and a
//!   bottom-to-top single-pass rewrite
//! - The iterative [`FixCoordinator`] and parallel batch runners
//! - A starter set of built-in checks
//!
//! ## Example
//!
//! ```rust
//! use mdcheck_core::{Document, LintSettings, Linter, checks};
//! use mdcheck_parser::MarkdownParser;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = checks::builtin_registry()?;
//! let linter = Linter::new(registry, LintSettings::new());
//!
//! let document = Document::parse("README.md", "# A\n### B\n", &MarkdownParser::new())?;
//! let outcome = linter.lint(&document);
//! for finding in &outcome.findings {
//!     println!("{}:{} {}", finding.line, finding.primary_id(), finding.message);
//! }
//! # Ok(())
//! # }
//! ```

mod batch;
mod check;
pub mod checks;
mod coordinator;
mod document;
mod editor;
mod engine;
mod error;
mod finding;
mod registry;
mod settings;

pub use batch::{FileReport, FixPathsResult, FixReport, LintPathsResult, fix_paths, lint_paths};
pub use check::{Check, CheckContext, CheckError, CheckMeta};
pub use coordinator::{FixCoordinator, FixOutcome};
pub use document::Document;
pub use editor::{
    ConflictPolicy, ConflictReport, EditConflict, RewriteResult, apply_edits, apply_edits_to_file,
};
pub use engine::{CancellationFlag, CheckFailure, LintOutcome, Linter};
pub use error::EngineError;
pub use finding::{Edit, Finding, canonical_order};
pub use registry::CheckRegistry;
pub use settings::{CheckSetting, LintSettings};

pub use mdcheck_token::{Location, Position, Token, TokenData, TokenIndex, TokenKind};
