//! Full lint-and-fix pipeline over the built-in checks.

use mdcheck_core::{FixCoordinator, FixOutcome, LintSettings, Linter, checks, lint_paths};
use mdcheck_parser::MarkdownParser;
use pretty_assertions::assert_eq;
use serde_json::json;

fn builtin_linter() -> Linter {
    Linter::new(checks::builtin_registry().unwrap(), LintSettings::new())
}

#[test]
fn messy_document_is_fixed_to_a_stable_state() {
    let source = concat!(
        "# Title\t\n",
        "### Skipped level\n",
        "\n",
        "text with trailing   \n",
        "\n",
        "~~~\n",
        "code\n",
        "~~~\n",
        "\n",
        "\n",
        "\n",
        "end\n",
    );

    let linter = builtin_linter();
    let coordinator = FixCoordinator::new();
    let (fixed, outcome) = coordinator
        .run(&linter, &MarkdownParser::new(), "messy.md", source)
        .unwrap();

    // The tab fix leaves a trailing space behind, which the next round
    // strips: convergence takes more than one iteration.
    assert!(matches!(outcome, FixOutcome::Converged { iterations } if iterations >= 2));

    // Everything fixable is gone: the level jump, the tab, the trailing
    // spaces, the excess blanks. Fence style was already consistent.
    assert_eq!(
        fixed,
        concat!(
            "# Title\n",
            "## Skipped level\n",
            "\n",
            "text with trailing\n",
            "\n",
            "~~~\n",
            "code\n",
            "~~~\n",
            "\n",
            "end\n",
        )
    );

    // Running the loop again changes nothing.
    let (again, outcome) = coordinator
        .run(&linter, &MarkdownParser::new(), "messy.md", &fixed)
        .unwrap();
    assert_eq!(again, fixed);
    assert_eq!(outcome, FixOutcome::Converged { iterations: 0 });
}

#[test]
fn report_only_findings_survive_fixing() {
    let long = "w".repeat(120);
    let source = format!("{long}   \n");

    let linter = builtin_linter();
    let (fixed, _) = FixCoordinator::new()
        .run(&linter, &MarkdownParser::new(), "long.md", &source)
        .unwrap();

    // Trailing spaces were stripped, but the line is still over the limit
    // and still reported.
    let outcome = linter
        .lint_text("long.md", &fixed, &MarkdownParser::new())
        .unwrap();
    assert_eq!(outcome.findings.len(), 1);
    assert_eq!(outcome.findings[0].primary_id(), "MD013");
}

#[test]
fn settings_tune_checks_through_the_whole_pipeline() {
    let source = "X\n\n\n\nY\n";

    let settings = LintSettings::new().set_options("no-multiple-blanks", json!({"maximum": 3}));
    let linter = Linter::new(checks::builtin_registry().unwrap(), settings);
    let outcome = linter
        .lint_text("t.md", source, &MarkdownParser::new())
        .unwrap();
    assert!(outcome.findings.is_empty());

    let strict = Linter::new(checks::builtin_registry().unwrap(), LintSettings::new());
    let outcome = strict
        .lint_text("t.md", source, &MarkdownParser::new())
        .unwrap();
    assert_eq!(outcome.findings.len(), 1);
}

#[test]
fn batch_run_lints_files_independently() {
    let dir = tempfile::tempdir().unwrap();
    let clean = dir.path().join("clean.md");
    std::fs::write(&clean, "# Fine\n\ntext\n").unwrap();
    let dirty = dir.path().join("dirty.md");
    std::fs::write(&dirty, "# A\n### B\n").unwrap();

    let linter = builtin_linter();
    let (reports, failures) = lint_paths(
        &[clean.clone(), dirty.clone()],
        &linter,
        &MarkdownParser::new(),
    );

    assert!(failures.is_empty());
    assert_eq!(reports.len(), 2);
    let clean_report = reports.iter().find(|r| r.path == clean).unwrap();
    assert!(clean_report.outcome.findings.is_empty());
    let dirty_report = reports.iter().find(|r| r.path == dirty).unwrap();
    assert_eq!(dirty_report.outcome.findings.len(), 1);
    assert_eq!(dirty_report.outcome.findings[0].primary_id(), "MD001");
}
