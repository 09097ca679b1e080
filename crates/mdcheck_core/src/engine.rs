//! The execution engine: runs the active checks over one document.
//!
//! Checks are mutually independent pure reads of the same immutable
//! document, so they run in parallel with no locking; each worker collects
//! its own findings and the buffers are merged after the parallel section.
//! One failing check never aborts its siblings — its failure is recorded
//! and surfaced alongside the results.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::warn;

use mdcheck_parser::Parser;

use crate::check::CheckContext;
use crate::document::Document;
use crate::error::EngineError;
use crate::finding::{Finding, canonical_order};
use crate::registry::CheckRegistry;
use crate::settings::LintSettings;

/// Failure of one check over one document, recorded without aborting the
/// run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    /// Primary id of the failing check.
    pub check: String,
    /// What went wrong.
    pub message: String,
}

/// Result of linting one document: the findings in canonical report order,
/// plus any per-check failures.
#[derive(Debug, Default)]
pub struct LintOutcome {
    /// Findings sorted by line, then column (absent first), then rule id.
    pub findings: Vec<Finding>,
    /// Checks that failed on this document.
    pub failures: Vec<CheckFailure>,
}

impl LintOutcome {
    /// Returns true if any finding carries an edit.
    pub fn has_fixable_findings(&self) -> bool {
        self.findings.iter().any(|f| f.edit.is_some())
    }
}

/// Orchestrates one run: resolves the active checks and executes them over
/// a document.
pub struct Linter {
    registry: CheckRegistry,
    settings: LintSettings,
}

impl Linter {
    /// Creates a linter over the given registry and settings.
    pub fn new(registry: CheckRegistry, settings: LintSettings) -> Self {
        Self { registry, settings }
    }

    /// The registry backing this linter.
    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// The settings for this run.
    pub fn settings(&self) -> &LintSettings {
        &self.settings
    }

    /// Lints one document with every active check.
    pub fn lint(&self, document: &Document) -> LintOutcome {
        self.lint_cancellable(document, &AtomicBool::new(false))
    }

    /// Lints one document, consulting `cancel` between check invocations.
    ///
    /// Cancellation is coarse-grained: a check that has already started
    /// runs to completion, and checks not yet started are skipped.
    pub fn lint_cancellable(&self, document: &Document, cancel: &AtomicBool) -> LintOutcome {
        let index = document.token_index();
        let active = self.registry.active_checks(&self.settings);

        let results: Vec<Result<Vec<Finding>, CheckFailure>> = active
            .par_iter()
            .filter(|_| !cancel.load(Ordering::Relaxed))
            .map(|check| {
                let resolved = self.settings.resolved_options(check.as_ref());
                let ctx = CheckContext::new(document, &index, &resolved);
                check.run(&ctx).map_err(|error| {
                    warn!(
                        check = check.meta().primary_id(),
                        source = document.source_id(),
                        "check failed: {error}"
                    );
                    CheckFailure {
                        check: check.meta().primary_id().to_string(),
                        message: error.message,
                    }
                })
            })
            .collect();

        let mut outcome = LintOutcome::default();
        for result in results {
            match result {
                Ok(findings) => outcome.findings.extend(findings),
                Err(failure) => outcome.failures.push(failure),
            }
        }
        outcome.findings.sort_by(canonical_order);
        outcome
    }

    /// Convenience: parses `text` and lints the resulting document.
    pub fn lint_text(
        &self,
        source_id: &str,
        text: &str,
        parser: &dyn Parser,
    ) -> Result<LintOutcome, EngineError> {
        let document = Document::parse(source_id, text, parser)?;
        Ok(self.lint(&document))
    }
}

/// Shared handle used to request cancellation of in-flight runs.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Creates a new, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// The underlying flag, for passing into [`Linter::lint_cancellable`].
    pub fn as_atomic(&self) -> &AtomicBool {
        &self.0
    }
}
