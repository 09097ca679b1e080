//! The edit engine: turns a bag of proposed edits into one consistent
//! rewrite of the original text.
//!
//! Every edit carries coordinates against the original document, so the
//! engine applies them from the highest affected position to the lowest
//! (bottom-to-top, right-to-left within a line). Under that order no applied
//! edit ever shifts the coordinates of one applied after it, and no live
//! remapping step is needed. The precondition is that no two edits overlap,
//! which is why conflict detection runs first, over the entire edit set.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::finding::{Edit, Finding};

/// What to do when proposed edits overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Report the conflict and apply nothing. The default choice.
    Fail,
    /// Keep the earlier edit (in report order) of each conflicting pair and
    /// drop the later one. Degraded mode; callers opt in explicitly.
    SkipLaterConflicts,
}

/// One pair of overlapping edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditConflict {
    /// Rule ids of the earlier finding (in report order).
    pub first_rules: Vec<String>,
    /// Rule ids of the later finding.
    pub second_rules: Vec<String>,
    /// Line where the regions overlap.
    pub line: u32,
}

/// All conflicts found in one edit set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    /// The conflicting pairs, in position order.
    pub conflicts: Vec<EditConflict>,
}

fn primary(rules: &[String]) -> &str {
    rules.first().map(String::as_str).unwrap_or("?")
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conflicting edits:")?;
        for (i, c) in self.conflicts.iter().enumerate() {
            let sep = if i == 0 { " " } else { "; " };
            write!(
                f,
                "{sep}{} vs {} at line {}",
                primary(&c.first_rules),
                primary(&c.second_rules),
                c.line
            )?;
        }
        Ok(())
    }
}

/// Result of applying edits to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    /// The rewritten line sequence.
    pub lines: Vec<String>,
    /// Number of edits applied.
    pub applied: usize,
    /// Edits dropped for invalid coordinates (check-authoring bugs).
    pub dropped_invalid: usize,
    /// Edits skipped under [`ConflictPolicy::SkipLaterConflicts`].
    pub skipped_conflicts: usize,
    /// Whether the output differs from the input.
    pub modified: bool,
}

impl RewriteResult {
    /// The rewritten document text (lines joined with `\n`).
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// A point in (line, column) space. Line-range edits use column 0 so they
/// order before any character of the lines they touch.
type Point = (u32, u32);

/// Half-open region of the original document occupied by an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    start: Point,
    end: Point,
}

fn region_of(edit: &Edit) -> Region {
    match edit {
        Edit::ReplaceText {
            line,
            column,
            delete_length,
            ..
        } => Region {
            start: (*line, *column),
            end: (*line, column + delete_length),
        },
        Edit::ReplaceLines {
            start_line,
            delete_count,
            ..
        } => Region {
            start: (*start_line, 0),
            end: (start_line + delete_count, 0),
        },
    }
}

/// Half-open interval intersection. Two zero-width regions at the same
/// point (e.g. two insertions) do not overlap.
fn overlaps(a: Region, b: Region) -> bool {
    a.start < b.end && b.start < a.end
}

fn validate(edit: &Edit, lines: &[String]) -> Result<(), String> {
    match edit {
        Edit::ReplaceText {
            line,
            column,
            delete_length,
            insert,
        } => {
            if *line == 0 || *column == 0 {
                return Err("line and column are 1-based".to_string());
            }
            if insert.contains('\n') {
                return Err("character-range replacement must not contain newlines".to_string());
            }
            let Some(text) = lines.get(*line as usize - 1) else {
                return Err(format!(
                    "line {line} is beyond the document ({} lines)",
                    lines.len()
                ));
            };
            let width = text.chars().count() as u32;
            if column - 1 + delete_length > width {
                return Err(format!(
                    "columns [{column}, {}) exceed line width {width}",
                    column + delete_length
                ));
            }
            Ok(())
        }
        Edit::ReplaceLines {
            start_line,
            delete_count,
            ..
        } => {
            if *start_line == 0 {
                return Err("line numbers are 1-based".to_string());
            }
            let len = lines.len() as u32;
            // A pure insertion may target one past the last line.
            let max_start = if *delete_count == 0 { len + 1 } else { len };
            if *start_line > max_start || start_line - 1 + delete_count > len {
                return Err(format!(
                    "lines [{start_line}, {}) exceed the document ({len} lines)",
                    start_line + delete_count
                ));
            }
            Ok(())
        }
    }
}

struct Planned<'f> {
    finding: &'f Finding,
    edit: &'f Edit,
    region: Region,
}

/// Applies the edits carried by `findings` to `lines`.
///
/// `findings` is expected in report order (the execution engine's canonical
/// sort); under [`ConflictPolicy::SkipLaterConflicts`] that order decides
/// which edit of a conflicting pair survives. Edits with invalid coordinates
/// are dropped and logged; their findings remain reported — failure to
/// auto-fix never suppresses the underlying report.
pub fn apply_edits(
    lines: &[String],
    findings: &[Finding],
    policy: ConflictPolicy,
) -> Result<RewriteResult, EngineError> {
    let mut planned: Vec<Planned<'_>> = Vec::new();
    let mut dropped_invalid = 0;
    for finding in findings {
        let Some(edit) = &finding.edit else { continue };
        match validate(edit, lines) {
            Ok(()) => planned.push(Planned {
                finding,
                edit,
                region: region_of(edit),
            }),
            Err(reason) => {
                warn!(
                    rule = finding.primary_id(),
                    line = edit.line(),
                    "dropping invalid edit: {reason}"
                );
                dropped_invalid += 1;
            }
        }
    }

    // Conflict sweep over the entire set: regions sorted by start, tracking
    // the kept region that reaches furthest. Any overlapping pair surfaces
    // against that region.
    let mut order: Vec<usize> = (0..planned.len()).collect();
    order.sort_by_key(|&i| planned[i].region.start);

    let mut skip = vec![false; planned.len()];
    let mut conflicts = Vec::new();
    let mut active: Option<usize> = None;
    for &i in &order {
        let Some(j) = active else {
            active = Some(i);
            continue;
        };
        if overlaps(planned[i].region, planned[j].region) {
            // Report order (== index into `planned`) decides which edit of
            // the pair is the later one.
            let (first, second) = if j < i { (j, i) } else { (i, j) };
            conflicts.push(EditConflict {
                first_rules: planned[first].finding.rule_ids.clone(),
                second_rules: planned[second].finding.rule_ids.clone(),
                line: planned[first]
                    .region
                    .start
                    .0
                    .max(planned[second].region.start.0),
            });
            skip[second] = true;
            if second == j {
                active = Some(i);
            }
        } else {
            // Sorted by start, so a non-overlapping successor always ends at
            // or beyond the previous reach.
            active = Some(i);
        }
    }

    if !conflicts.is_empty() {
        match policy {
            ConflictPolicy::Fail => {
                return Err(EngineError::ConflictingEdits(ConflictReport { conflicts }));
            }
            ConflictPolicy::SkipLaterConflicts => {
                for c in &conflicts {
                    warn!(
                        first = primary(&c.first_rules),
                        second = primary(&c.second_rules),
                        line = c.line,
                        "skipping conflicting edit"
                    );
                }
            }
        }
    }
    let skipped_conflicts = skip.iter().filter(|s| **s).count();

    // Apply from the highest position to the lowest. At equal starts the
    // wider region goes first (an insertion at the boundary of a replaced
    // span must land after the replacement), then the later finding, so
    // same-point insertions end up in report order in the output.
    let mut kept: Vec<(usize, &Planned<'_>)> = planned
        .iter()
        .enumerate()
        .filter(|(i, _)| !skip[*i])
        .collect();
    kept.sort_by(|a, b| {
        (b.1.region.start, b.1.region.end, b.0).cmp(&(a.1.region.start, a.1.region.end, a.0))
    });

    let mut new_lines: Vec<String> = lines.to_vec();
    let mut applied = 0;
    for (_, p) in &kept {
        debug!(rule = p.finding.primary_id(), line = p.edit.line(), "applying edit");
        apply_one(&mut new_lines, p.edit);
        applied += 1;
    }

    let modified = new_lines != lines;
    Ok(RewriteResult {
        lines: new_lines,
        applied,
        dropped_invalid,
        skipped_conflicts,
        modified,
    })
}

fn apply_one(lines: &mut Vec<String>, edit: &Edit) {
    match edit {
        Edit::ReplaceText {
            line,
            column,
            delete_length,
            insert,
        } => {
            let text = &mut lines[*line as usize - 1];
            let start = byte_offset(text, column - 1);
            let end = byte_offset(text, column - 1 + delete_length);
            text.replace_range(start..end, insert);
        }
        Edit::ReplaceLines {
            start_line,
            delete_count,
            insert,
        } => {
            let idx = *start_line as usize - 1;
            let tail = lines.split_off(idx + *delete_count as usize);
            lines.truncate(idx);
            if !insert.is_empty() {
                lines.extend(insert.split('\n').map(str::to_string));
            }
            lines.extend(tail);
        }
    }
}

/// Byte offset of the `chars`-th character (clamped to the end of the line).
fn byte_offset(text: &str, chars: u32) -> usize {
    text.char_indices()
        .nth(chars as usize)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Applies the edits carried by `findings` to a file on disk, rewriting it
/// in place when anything changed. The original trailing-newline state is
/// preserved.
pub fn apply_edits_to_file(
    path: &Path,
    findings: &[Finding],
    policy: ConflictPolicy,
) -> Result<RewriteResult, EngineError> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    let result = apply_edits(&lines, findings, policy)?;
    if result.modified {
        let mut text = result.text();
        if content.ends_with('\n') {
            text.push('\n');
        }
        fs::write(path, text)?;
    }
    Ok(result)
}
