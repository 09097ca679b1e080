//! Iterative fix application.
//!
//! Applying one round of edits can surface new violations (a deleted blank
//! line may create a new run of blanks, a rewritten heading may now exceed
//! the length limit), so fixing runs as a lint → rewrite → re-lint loop.
//! Content hashes of every intermediate state guard against rule pairs that
//! undo each other's fixes forever.

use blake3::Hash;
use tracing::debug;

use mdcheck_parser::Parser;

use crate::document::Document;
use crate::editor::{ConflictPolicy, apply_edits};
use crate::engine::Linter;
use crate::error::EngineError;

const DEFAULT_MAX_ITERATIONS: usize = 5;

/// How an iterative fix run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    /// No fixable findings remain (or no further progress was possible).
    Converged {
        /// Number of rewrite rounds performed.
        iterations: usize,
    },
    /// A rewrite reproduced an earlier content state.
    CycleDetected {
        /// Number of states in the repeating cycle.
        cycle_length: usize,
    },
    /// The iteration budget ran out with fixable findings remaining.
    MaxIterationsReached,
}

/// Drives lint → rewrite → re-lint rounds to a fixed point.
pub struct FixCoordinator {
    max_iterations: usize,
}

impl FixCoordinator {
    /// Creates a coordinator with the default iteration budget.
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Overrides the iteration budget.
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Repeatedly lints and rewrites `text` until no fixable findings
    /// remain, a cycle is detected, or the iteration budget runs out.
    ///
    /// Conflicting edits within one round fall back to keeping the earlier
    /// edit; whatever they left unresolved is picked up by the next round.
    /// Returns the final text and how the loop ended.
    pub fn run(
        &self,
        linter: &Linter,
        parser: &dyn Parser,
        source_id: &str,
        text: &str,
    ) -> Result<(String, FixOutcome), EngineError> {
        let mut content = text.to_string();
        let mut history: Vec<Hash> = vec![blake3::hash(content.as_bytes())];

        for iteration in 0..self.max_iterations {
            let document = Document::parse(source_id, &content, parser)?;
            let outcome = linter.lint(&document);
            if !outcome.has_fixable_findings() {
                return Ok((content, FixOutcome::Converged { iterations: iteration }));
            }

            let rewrite = apply_edits(
                document.lines(),
                &outcome.findings,
                ConflictPolicy::SkipLaterConflicts,
            )?;
            if !rewrite.modified {
                // Remaining edits were all dropped or skipped; no progress
                // is possible.
                return Ok((content, FixOutcome::Converged { iterations: iteration }));
            }

            let mut next = rewrite.text();
            if content.ends_with('\n') {
                next.push('\n');
            }
            debug!(
                source = source_id,
                iteration,
                applied = rewrite.applied,
                "applied fix round"
            );

            let hash = blake3::hash(next.as_bytes());
            if let Some(seen) = history.iter().position(|h| *h == hash) {
                return Ok((
                    next,
                    FixOutcome::CycleDetected {
                        cycle_length: history.len() - seen,
                    },
                ));
            }
            history.push(hash);
            content = next;
        }

        Ok((content, FixOutcome::MaxIterationsReached))
    }
}

impl Default for FixCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::check::{Check, CheckContext, CheckError, CheckMeta};
    use crate::finding::{Edit, Finding};
    use crate::registry::CheckRegistry;
    use crate::settings::LintSettings;
    use mdcheck_parser::MarkdownParser;
    use pretty_assertions::assert_eq;

    /// Rewrites any line equal to `from` into `to`.
    struct Rewriter {
        meta: &'static CheckMeta,
        from: &'static str,
        to: &'static str,
    }

    impl Check for Rewriter {
        fn meta(&self) -> &CheckMeta {
            self.meta
        }

        fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError> {
            Ok(ctx
                .lines()
                .iter()
                .enumerate()
                .filter(|(_, text)| text.as_str() == self.from)
                .map(|(idx, _)| {
                    let line = idx as u32 + 1;
                    Finding::new(self.meta.rule_ids(), "rewrite", line)
                        .with_edit(Edit::replace_line(line, self.to))
                })
                .collect())
        }
    }

    const REWRITE_A: CheckMeta = CheckMeta {
        aliases: &["MD801"],
        description: "",
        tags: &[],
    };
    const REWRITE_B: CheckMeta = CheckMeta {
        aliases: &["MD802"],
        description: "",
        tags: &[],
    };

    fn linter_with(checks: Vec<Arc<dyn Check>>) -> Linter {
        let mut registry = CheckRegistry::new();
        for check in checks {
            registry.register(check).unwrap();
        }
        Linter::new(registry, LintSettings::new())
    }

    #[test]
    fn test_converges_after_chained_rewrites() {
        // "alpha" -> "beta" (MD801), then "beta" -> "gamma" (MD802): two
        // rounds to the fixed point.
        let linter = linter_with(vec![
            Arc::new(Rewriter {
                meta: &REWRITE_A,
                from: "alpha",
                to: "beta",
            }),
            Arc::new(Rewriter {
                meta: &REWRITE_B,
                from: "beta",
                to: "gamma",
            }),
        ]);

        let coordinator = FixCoordinator::new();
        let (fixed, outcome) = coordinator
            .run(&linter, &MarkdownParser::new(), "t.md", "alpha\n")
            .unwrap();

        assert_eq!(fixed, "gamma\n");
        assert_eq!(outcome, FixOutcome::Converged { iterations: 2 });
    }

    #[test]
    fn test_clean_input_converges_immediately() {
        let linter = linter_with(vec![Arc::new(Rewriter {
            meta: &REWRITE_A,
            from: "alpha",
            to: "beta",
        })]);

        let (fixed, outcome) = FixCoordinator::new()
            .run(&linter, &MarkdownParser::new(), "t.md", "clean text\n")
            .unwrap();

        assert_eq!(fixed, "clean text\n");
        assert_eq!(outcome, FixOutcome::Converged { iterations: 0 });
    }

    #[test]
    fn test_cycle_detected() {
        // Two rules that undo each other forever.
        let linter = linter_with(vec![
            Arc::new(Rewriter {
                meta: &REWRITE_A,
                from: "ping",
                to: "pong",
            }),
            Arc::new(Rewriter {
                meta: &REWRITE_B,
                from: "pong",
                to: "ping",
            }),
        ]);

        let (_, outcome) = FixCoordinator::new()
            .run(&linter, &MarkdownParser::new(), "t.md", "ping\n")
            .unwrap();

        assert!(matches!(outcome, FixOutcome::CycleDetected { .. }));
    }

    #[test]
    fn test_max_iterations_reached() {
        // A chain longer than the budget: a0 -> a1 -> a2 -> ...
        struct Increment {
            meta: &'static CheckMeta,
        }
        impl Check for Increment {
            fn meta(&self) -> &CheckMeta {
                self.meta
            }
            fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, CheckError> {
                Ok(ctx
                    .lines()
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, text)| {
                        let n: u32 = text.strip_prefix('a')?.parse().ok()?;
                        if n >= 100 {
                            return None;
                        }
                        let line = idx as u32 + 1;
                        Some(
                            Finding::new(self.meta.rule_ids(), "bump", line)
                                .with_edit(Edit::replace_line(line, format!("a{}", n + 1))),
                        )
                    })
                    .collect())
            }
        }

        const INCREMENT: CheckMeta = CheckMeta {
            aliases: &["MD803"],
            description: "",
            tags: &[],
        };

        let linter = linter_with(vec![Arc::new(Increment { meta: &INCREMENT })]);
        let (fixed, outcome) = FixCoordinator::with_max_iterations(2)
            .run(&linter, &MarkdownParser::new(), "t.md", "a0\n")
            .unwrap();

        assert_eq!(fixed, "a2\n");
        assert_eq!(outcome, FixOutcome::MaxIterationsReached);
    }
}
