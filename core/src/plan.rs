//! Rename plans and destination-conflict validation.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

/// A proposed rename awaiting validation and confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    source: PathBuf,
    destination: PathBuf,
    reason: &'static str,
}

impl RenamePlan {
    pub fn new(source: PathBuf, destination: PathBuf, reason: &'static str) -> Self {
        Self {
            source,
            destination,
            reason,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Human-readable description of the rule that produced this plan.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// Plans split by whether their destination is free.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Destination does not exist yet
    pub ready: Vec<RenamePlan>,
    /// Destination already exists or is claimed by an earlier ready plan;
    /// never applied
    pub conflicts: Vec<RenamePlan>,
}

impl Validation {
    pub fn total(&self) -> usize {
        self.ready.len() + self.conflicts.len()
    }
}

/// Partition `plans` into ready and conflicting plans, preserving order.
///
/// A plan conflicts when its destination exists on disk or when an earlier
/// ready plan already renames to the same destination. Destinations are
/// checked once, here. Nothing re-checks them right before the rename, so a
/// file created in between is overwritten on Unix.
pub fn validate(plans: Vec<RenamePlan>) -> Validation {
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let mut validation = Validation::default();

    for plan in plans {
        if plan.destination.exists() {
            tracing::debug!(
                source = %plan.source.display(),
                destination = %plan.destination.display(),
                "destination exists, skipping"
            );
            validation.conflicts.push(plan);
        } else if !claimed.insert(plan.destination.clone()) {
            tracing::debug!(
                source = %plan.source.display(),
                destination = %plan.destination.display(),
                "destination claimed by an earlier rename, skipping"
            );
            validation.conflicts.push(plan);
        } else {
            validation.ready.push(plan);
        }
    }

    validation
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn plan(dir: &Path, from: &str, to: &str) -> RenamePlan {
        RenamePlan::new(dir.join(from), dir.join(to), "test")
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("taken.html"), "")?;

        let plans = vec![
            plan(dir.path(), "a_docx", "a"),
            plan(dir.path(), "taken.html.docx", "taken.html"),
            plan(dir.path(), "b_docx", "b"),
        ];
        let validation = validate(plans.clone());

        assert_eq!(validation.total(), plans.len());
        assert_eq!(
            validation.ready,
            vec![plans[0].clone(), plans[2].clone()],
            "ready keeps input order"
        );
        assert_eq!(validation.conflicts, vec![plans[1].clone()]);
        for p in &validation.ready {
            assert!(!validation.conflicts.contains(p));
        }
        Ok(())
    }

    #[test]
    fn shared_destination_keeps_only_the_first_plan_ready() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let plans = vec![
            plan(dir.path(), "x._docx", "x"),
            plan(dir.path(), "x_docx", "x"),
            plan(dir.path(), "y_docx", "y"),
        ];

        let validation = validate(plans.clone());

        assert_eq!(validation.ready, vec![plans[0].clone(), plans[2].clone()]);
        assert_eq!(validation.conflicts, vec![plans[1].clone()]);
        Ok(())
    }

    #[test]
    fn empty_input_yields_empty_partition() {
        assert_eq!(validate(Vec::new()), Validation::default());
    }
}
