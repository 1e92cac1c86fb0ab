use std::path::Path;
use std::path::PathBuf;

use crate::error::DocfixError;
use crate::error::Result;
use crate::scan::WalkDepth;
use crate::scan::collect_files;
use crate::scan::ensure_directory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite files whose frontmatter changed
    InPlace,
    /// Report what would change, write nothing
    DryRun,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrontmatterSummary {
    pub scanned: usize,
    pub fixed: usize,
    /// Files that were (or, in a dry run, would be) rewritten, in scan order
    pub fixed_paths: Vec<PathBuf>,
}

/// Fix every `*.{extension}` file below `target`, in sorted path order.
///
/// Any read, decode, or write failure stops the run. Files fixed before the
/// failure keep their new content.
pub fn fix_tree(target: &Path, extension: &str, mode: WriteMode) -> Result<FrontmatterSummary> {
    ensure_directory(target)?;

    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let files = collect_files(target, WalkDepth::Recursive, |name| name.ends_with(&suffix))?;

    let mut summary = FrontmatterSummary::default();
    for path in files {
        summary.scanned += 1;
        if fix_file(&path, mode)? {
            summary.fixed += 1;
            summary.fixed_paths.push(path);
        }
    }

    tracing::info!(
        dir = %target.display(),
        scanned = summary.scanned,
        fixed = summary.fixed,
        dry_run = mode == WriteMode::DryRun,
        "frontmatter pass complete"
    );
    Ok(summary)
}

/// Rewrite one file's frontmatter. Returns whether it needed changes.
///
/// The file is only written when its content actually changed, so untouched
/// files keep their modification time.
pub fn fix_file(path: &Path, mode: WriteMode) -> Result<bool> {
    let bytes = std::fs::read(path).map_err(|source| DocfixError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| DocfixError::Encoding {
        path: path.to_path_buf(),
        source,
    })?;

    let (updated, changed) = super::rewrite(&text);
    if !changed {
        return Ok(false);
    }

    match mode {
        WriteMode::InPlace => {
            std::fs::write(path, updated.as_bytes()).map_err(|source| DocfixError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "rewrote frontmatter");
        }
        WriteMode::DryRun => {
            tracing::debug!(path = %path.display(), "frontmatter would change");
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const BROKEN: &str = "---\nsource: \"a\\b.html\"\n---\nbody\n";
    const FIXED: &str = "---\nsource: \"a/b.html\"\n---\nbody\n";
    const CLEAN: &str = "---\ntitle: fine\n---\n";

    fn write(dir: &Path, rel: &str, content: &[u8]) -> std::io::Result<PathBuf> {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    #[test]
    fn fixes_matching_files_only() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let broken = write(dir.path(), "guide/a.mdx", BROKEN.as_bytes())?;
        let clean = write(dir.path(), "b.mdx", CLEAN.as_bytes())?;
        let other = write(dir.path(), "c.md", BROKEN.as_bytes())?;

        let summary = fix_tree(dir.path(), "mdx", WriteMode::InPlace)?;

        assert_eq!(
            summary,
            FrontmatterSummary {
                scanned: 2,
                fixed: 1,
                fixed_paths: vec![broken.clone()],
            }
        );
        assert_eq!(fs::read_to_string(&broken)?, FIXED);
        assert_eq!(fs::read_to_string(&clean)?, CLEAN);
        assert_eq!(fs::read_to_string(&other)?, BROKEN);
        Ok(())
    }

    #[test]
    fn dry_run_writes_nothing() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let broken = write(dir.path(), "a.mdx", BROKEN.as_bytes())?;

        let summary = fix_tree(dir.path(), ".mdx", WriteMode::DryRun)?;

        assert_eq!(summary.fixed, 1);
        assert_eq!(fs::read_to_string(&broken)?, BROKEN);
        Ok(())
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let bad = write(dir.path(), "bad.mdx", &[b'-', b'-', b'-', b'\n', 0xff, 0xfe])?;

        let err = fix_tree(dir.path(), "mdx", WriteMode::InPlace).err();

        assert!(matches!(err, Some(DocfixError::Encoding { .. })));
        assert_eq!(fs::read(&bad)?, vec![b'-', b'-', b'-', b'\n', 0xff, 0xfe]);
        Ok(())
    }

    #[test]
    fn missing_target_is_directory_not_found() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let err = fix_tree(&dir.path().join("nope"), "mdx", WriteMode::InPlace).err();
        assert!(matches!(err, Some(DocfixError::DirectoryNotFound { .. })));
        Ok(())
    }

    #[test]
    fn empty_target_scans_nothing() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let summary = fix_tree(dir.path(), "mdx", WriteMode::InPlace)?;
        assert_eq!(summary, FrontmatterSummary::default());
        Ok(())
    }
}
