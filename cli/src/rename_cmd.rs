//! Rename subcommands: dry-run report, YES gate, apply.

use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::ValueEnum;
use docfix_core::ApplyOutcome;
use docfix_core::Confirmation;
use docfix_core::RenamePlan;
use docfix_core::RuleSet;
use docfix_core::Validation;
use docfix_core::WalkDepth;
use docfix_core::apply;
use docfix_core::config::absolute_root;
use docfix_core::plan::validate;
use docfix_core::scan::build_plans;

#[derive(Debug, Parser)]
pub struct RenameArgs {
    /// Directory to clean up (defaults to current directory)
    #[arg(short = 'C', long = "cwd", value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Walk only the top folder or the whole tree (default depends on the command)
    #[arg(long = "depth", value_enum, value_name = "DEPTH")]
    pub depth: Option<DepthArg>,

    /// Apply without prompting for YES
    #[arg(long = "yes")]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DepthArg {
    Flat,
    Recursive,
}

impl From<DepthArg> for WalkDepth {
    fn from(value: DepthArg) -> Self {
        match value {
            DepthArg::Flat => WalkDepth::Flat,
            DepthArg::Recursive => WalkDepth::Recursive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameTool {
    DocxSuffixes,
    HtmlDocx,
    ImportedExtensions,
}

impl RenameTool {
    pub fn rules(self) -> RuleSet {
        match self {
            Self::DocxSuffixes => RuleSet::DOCX_SUFFIXES,
            Self::HtmlDocx => RuleSet::HTML_DOCX,
            Self::ImportedExtensions => RuleSet::IMPORTED_EXTENSIONS,
        }
    }

    pub fn default_depth(self) -> WalkDepth {
        match self {
            Self::DocxSuffixes => WalkDepth::Flat,
            Self::HtmlDocx | Self::ImportedExtensions => WalkDepth::Recursive,
        }
    }
}

/// Run a rename command against the process stdin/stdout.
pub fn run(tool: RenameTool, args: RenameArgs) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_with_io(tool, args, &mut stdin.lock(), &mut stdout.lock())
}

/// Run a rename command, reading the confirmation from `input` and writing
/// the report to `out`.
pub fn run_with_io(
    tool: RenameTool,
    args: RenameArgs,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let root = absolute_root(args.cwd.as_deref().unwrap_or(Path::new(".")))?;
    let depth = args.depth.map_or(tool.default_depth(), WalkDepth::from);
    let rules = tool.rules();
    tracing::debug!(?tool, ?depth, root = %root.display(), "starting rename command");

    let plans = build_plans(&root, &rules, depth)
        .with_context(|| format!("failed to scan {}", root.display()))?;

    if plans.is_empty() {
        writeln!(out, "No matching files found in: {}", root.display())?;
        writeln!(out, "{}", rules.hint())?;
        return Ok(());
    }

    let validation = validate(plans);
    write_report(out, &root, &validation)?;

    let confirmation = if args.yes {
        writeln!(out, "\nConfirmed with --yes.")?;
        Confirmation::Confirmed
    } else {
        write!(out, "\nType {} to apply these renames: ", apply::CONFIRM_TOKEN)?;
        out.flush()?;
        apply::read_confirmation(input).context("failed to read confirmation")?
    };

    let summary = match apply::apply(&validation, confirmation) {
        ApplyOutcome::Aborted => {
            writeln!(out, "Aborted. No files were changed.")?;
            return Ok(());
        }
        ApplyOutcome::Applied(summary) => summary,
    };

    for err in &summary.failed {
        writeln!(out, "FAIL : {err}")?;
    }
    writeln!(
        out,
        "\nDone. Renamed {} files. ({} skipped due to conflicts.)",
        summary.renamed, summary.skipped_conflicts
    )?;

    if !summary.failed.is_empty() {
        anyhow::bail!("{} rename(s) failed", summary.failed.len());
    }
    Ok(())
}

fn write_report(out: &mut impl Write, root: &Path, validation: &Validation) -> Result<()> {
    writeln!(out, "\nTarget folder: {}\n", root.display())?;
    writeln!(out, "=== PROPOSED RENAMES (DRY RUN) ===")?;
    for plan in &validation.ready {
        writeln!(out, "OK   : {}", describe(root, plan))?;
    }

    if !validation.conflicts.is_empty() {
        writeln!(out, "\n=== CONFLICTS (SKIPPED - DEST EXISTS) ===")?;
        for plan in &validation.conflicts {
            writeln!(out, "SKIP : {}", describe(root, plan))?;
        }
    }

    writeln!(
        out,
        "\nSummary: {} ready, {} conflicts, {} matches.",
        validation.ready.len(),
        validation.conflicts.len(),
        validation.total()
    )?;
    Ok(())
}

fn describe(root: &Path, plan: &RenamePlan) -> String {
    format!(
        "{}  ->  {}   [{}]",
        display_relative(root, plan.source()),
        display_relative(root, plan.destination()),
        plan.reason()
    )
}

fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
