use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use docfix_core::DocfixConfig;
use docfix_core::config::absolute_root;
use docfix_core::frontmatter;
use docfix_core::frontmatter::WriteMode;

#[derive(Debug, Parser)]
pub struct FrontmatterArgs {
    /// Project root (defaults to current directory)
    #[arg(short = 'C', long = "cwd", value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file (default: $DOCFIX_CONFIG, then <root>/docfix.toml)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Folder to scan, relative to the root (default: src/content/docs_migrated)
    #[arg(long = "target", value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// File extension to scan (default: mdx)
    #[arg(long = "extension", value_name = "EXT")]
    pub extension: Option<String>,

    /// List files that would change without writing them
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

pub fn run(args: FrontmatterArgs) -> Result<()> {
    let stdout = std::io::stdout();
    run_with_output(args, &mut stdout.lock())
}

pub fn run_with_output(args: FrontmatterArgs, out: &mut impl Write) -> Result<()> {
    let root = absolute_root(args.cwd.as_deref().unwrap_or(Path::new(".")))?;
    let config = DocfixConfig::load(args.config.as_deref(), &root)?;

    let target = root.join(args.target.unwrap_or(config.frontmatter.target_dir));
    let extension = args.extension.unwrap_or(config.frontmatter.extension);
    let extension = extension.trim_start_matches('.');
    anyhow::ensure!(!extension.is_empty(), "--extension must not be empty");

    let mode = if args.dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::InPlace
    };

    tracing::debug!(dir = %target.display(), extension, ?mode, "starting frontmatter pass");
    let summary = frontmatter::fix_tree(&target, extension, mode)
        .with_context(|| format!("frontmatter pass over {} failed", target.display()))?;

    if summary.scanned == 0 {
        writeln!(out, "No .{extension} files found under {}", target.display())?;
        return Ok(());
    }

    if mode == WriteMode::DryRun {
        for path in &summary.fixed_paths {
            let shown = path.strip_prefix(&target).unwrap_or(path);
            writeln!(out, "WOULD FIX: {}", shown.display())?;
        }
    }

    writeln!(out, "Scanned: {}", summary.scanned)?;
    writeln!(out, "Fixed:   {}", summary.fixed)?;
    if mode == WriteMode::DryRun {
        writeln!(out, "(dry run, no files were written)")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const BROKEN: &str = "---\nroute: \"guide\\intro\"\n---\n";

    fn args(root: &Path) -> FrontmatterArgs {
        FrontmatterArgs {
            cwd: Some(root.to_path_buf()),
            config: None,
            target: None,
            extension: None,
            dry_run: false,
        }
    }

    fn run_capture(args: FrontmatterArgs) -> Result<String> {
        let mut out = Vec::new();
        run_with_output(args, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn default_target_is_docs_migrated() -> Result<()> {
        let dir = TempDir::new()?;
        let docs = dir.path().join("src/content/docs_migrated/guide");
        fs::create_dir_all(&docs)?;
        fs::write(docs.join("intro.mdx"), BROKEN)?;
        fs::write(docs.join("other.mdx"), "no frontmatter\n")?;

        let report = run_capture(args(dir.path()))?;

        assert_eq!(report, "Scanned: 2\nFixed:   1\n");
        assert_eq!(
            fs::read_to_string(docs.join("intro.mdx"))?,
            "---\nroute: \"guide/intro\"\n---\n"
        );
        Ok(())
    }

    #[test]
    fn flags_override_config_file() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(
            dir.path().join("docfix.toml"),
            "[frontmatter]\ntarget_dir = \"content\"\nextension = \"md\"\n",
        )?;
        fs::create_dir_all(dir.path().join("pages"))?;
        fs::write(dir.path().join("pages/a.markdown"), BROKEN)?;

        let report = run_capture(FrontmatterArgs {
            target: Some(PathBuf::from("pages")),
            extension: Some(".markdown".to_string()),
            dry_run: true,
            ..args(dir.path())
        })?;

        assert_eq!(
            report,
            "WOULD FIX: a.markdown\nScanned: 1\nFixed:   1\n(dry run, no files were written)\n"
        );
        assert_eq!(fs::read_to_string(dir.path().join("pages/a.markdown"))?, BROKEN);
        Ok(())
    }

    #[test]
    fn empty_target_reports_no_files() -> Result<()> {
        let dir = TempDir::new()?;
        fs::create_dir_all(dir.path().join("src/content/docs_migrated"))?;

        let report = run_capture(args(dir.path()))?;

        assert!(report.starts_with("No .mdx files found under "));
        Ok(())
    }

    #[test]
    fn missing_target_is_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        assert!(run_capture(args(dir.path())).is_err());
        Ok(())
    }
}
