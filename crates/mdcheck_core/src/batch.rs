//! Parallel linting across files.
//!
//! Each file gets its own independent document and engine pass; there is no
//! cross-file shared state, so files are processed in parallel. A file that
//! fails to read or parse is recorded and never aborts the batch.

use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::warn;

use mdcheck_parser::Parser;

use crate::coordinator::{FixCoordinator, FixOutcome};
use crate::document::Document;
use crate::engine::{LintOutcome, Linter};
use crate::error::EngineError;

/// Lint results for one file.
#[derive(Debug)]
pub struct FileReport {
    /// The file that was linted.
    pub path: PathBuf,
    /// Findings and per-check failures for the file.
    pub outcome: LintOutcome,
}

/// Per-file successes plus per-file failures.
pub type LintPathsResult = (Vec<FileReport>, Vec<(PathBuf, EngineError)>);

/// Lints the given paths in parallel.
pub fn lint_paths<P: Parser + Sync>(
    paths: &[PathBuf],
    linter: &Linter,
    parser: &P,
) -> LintPathsResult {
    let results: Vec<Result<FileReport, (PathBuf, EngineError)>> = paths
        .par_iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .map_err(|e| (path.clone(), EngineError::Io(e)))?;
            let document = Document::parse(path.display().to_string(), &text, parser)
                .map_err(|e| (path.clone(), EngineError::Parse(e)))?;
            Ok(FileReport {
                path: path.clone(),
                outcome: linter.lint(&document),
            })
        })
        .collect();

    partition(results)
}

/// Fix results for one file.
#[derive(Debug)]
pub struct FixReport {
    /// The file that was fixed.
    pub path: PathBuf,
    /// How the fix loop ended.
    pub outcome: FixOutcome,
    /// Whether the file was rewritten on disk.
    pub modified: bool,
}

/// Per-file fix successes plus per-file failures.
pub type FixPathsResult = (Vec<FixReport>, Vec<(PathBuf, EngineError)>);

/// Runs the iterative fix loop over the given paths in parallel, rewriting
/// each changed file in place.
pub fn fix_paths<P: Parser + Sync>(
    paths: &[PathBuf],
    linter: &Linter,
    parser: &P,
) -> FixPathsResult {
    let coordinator = FixCoordinator::new();
    let results: Vec<Result<FixReport, (PathBuf, EngineError)>> = paths
        .par_iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .map_err(|e| (path.clone(), EngineError::Io(e)))?;
            let (fixed, outcome) = coordinator
                .run(linter, parser, &path.display().to_string(), &text)
                .map_err(|e| (path.clone(), e))?;
            let modified = fixed != text;
            if modified {
                fs::write(path, &fixed).map_err(|e| (path.clone(), EngineError::Io(e)))?;
            }
            Ok(FixReport {
                path: path.clone(),
                outcome,
                modified,
            })
        })
        .collect();

    partition(results)
}

fn partition<T>(
    results: Vec<Result<T, (PathBuf, EngineError)>>,
) -> (Vec<T>, Vec<(PathBuf, EngineError)>) {
    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(report) => successes.push(report),
            Err((path, error)) => {
                warn!("failed to process {}: {}", path.display(), error);
                failures.push((path, error));
            }
        }
    }
    (successes, failures)
}
