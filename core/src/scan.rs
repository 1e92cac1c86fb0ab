//! Plan builder: walk a directory and propose renames.

use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::error::DocfixError;
use crate::error::Result;
use crate::plan::RenamePlan;
use crate::rules::RuleSet;

/// How far below the root the walk descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkDepth {
    /// Direct children of the root only
    Flat,
    /// The whole tree
    #[default]
    Recursive,
}

impl WalkDepth {
    fn max_depth(self) -> usize {
        match self {
            Self::Flat => 1,
            Self::Recursive => usize::MAX,
        }
    }
}

/// Fail with [`DocfixError::DirectoryNotFound`] unless `root` is a directory.
pub fn ensure_directory(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(DocfixError::DirectoryNotFound {
            path: root.to_path_buf(),
        })
    }
}

/// Collect regular files under `root`, sorted by lower-cased path.
///
/// Symlinked directories are not descended into. A symlink that resolves to a
/// regular file counts as a file; dangling links are skipped. `filter` sees
/// each file name and decides whether the file is kept.
pub fn collect_files(
    root: &Path,
    depth: WalkDepth,
    mut filter: impl FnMut(&str) -> bool,
) -> Result<Vec<PathBuf>> {
    ensure_directory(root)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(depth.max_depth())
        .follow_links(false)
    {
        let entry = entry.map_err(|source| DocfixError::Walk {
            path: root.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };

        if filter(name) {
            files.push(entry.into_path());
        }
    }

    files.sort_by_cached_key(|path| path.to_string_lossy().to_lowercase());
    Ok(files)
}

/// Build the sorted list of rename plans for `root`.
///
/// At most one plan is produced per file: the first rule in `rules` that
/// matches its name.
pub fn build_plans(root: &Path, rules: &RuleSet, depth: WalkDepth) -> Result<Vec<RenamePlan>> {
    let files = collect_files(root, depth, |name| rules.first_match(name).is_some())?;

    let plans: Vec<RenamePlan> = files
        .into_iter()
        .filter_map(|source| {
            let name = source.file_name()?.to_str()?;
            let (renamed, reason) = rules.first_match(name)?;
            let destination = source.with_file_name(renamed);
            tracing::debug!(
                source = %source.display(),
                destination = %destination.display(),
                reason,
                "planned rename"
            );
            Some(RenamePlan::new(source, destination, reason))
        })
        .collect();

    tracing::info!(root = %root.display(), matches = plans.len(), "scan complete");
    Ok(plans)
}
