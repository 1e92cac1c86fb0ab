//! Confirmation gate and the apply phase of the rename pipeline.

use std::io::BufRead;

use crate::error::DocfixError;
use crate::plan::Validation;

/// The only answer that lets a rename run touch the filesystem.
pub const CONFIRM_TOKEN: &str = "YES";

/// Caller-supplied decision on whether ready plans may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    /// Interpret a typed answer. Only the exact token (after trimming) confirms.
    pub fn from_answer(answer: &str) -> Self {
        if answer.trim() == CONFIRM_TOKEN {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// Read a single line from `reader` and interpret it. EOF declines.
pub fn read_confirmation(reader: &mut impl BufRead) -> std::io::Result<Confirmation> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(Confirmation::from_answer(&line))
}

/// Counts from an apply run.
#[derive(Debug, Default)]
pub struct ApplySummary {
    pub renamed: usize,
    pub skipped_conflicts: usize,
    /// Renames that failed; the batch continued past each of them.
    pub failed: Vec<DocfixError>,
}

#[derive(Debug)]
pub enum ApplyOutcome {
    /// Confirmation was declined; nothing was touched.
    Aborted,
    Applied(ApplySummary),
}

/// Rename every ready plan, in order, when `confirmation` allows it.
///
/// Conflicting plans are never applied. A failed rename is recorded and
/// the remaining plans still run; earlier renames are not rolled back.
pub fn apply(validation: &Validation, confirmation: Confirmation) -> ApplyOutcome {
    if confirmation == Confirmation::Declined {
        tracing::info!(ready = validation.ready.len(), "rename declined");
        return ApplyOutcome::Aborted;
    }

    let mut summary = ApplySummary {
        skipped_conflicts: validation.conflicts.len(),
        ..Default::default()
    };

    for plan in &validation.ready {
        match std::fs::rename(plan.source(), plan.destination()) {
            Ok(()) => {
                tracing::debug!(
                    source = %plan.source().display(),
                    destination = %plan.destination().display(),
                    "renamed"
                );
                summary.renamed += 1;
            }
            Err(source) => {
                let err = DocfixError::Rename {
                    source_path: plan.source().to_path_buf(),
                    destination: plan.destination().to_path_buf(),
                    source,
                };
                tracing::warn!("{err}");
                summary.failed.push(err);
            }
        }
    }

    tracing::info!(
        renamed = summary.renamed,
        skipped = summary.skipped_conflicts,
        failed = summary.failed.len(),
        "apply complete"
    );
    ApplyOutcome::Applied(summary)
}
