//! `docfix` command line.
//!
//! ## Commands
//!
//! - `docfix docx-suffixes [-C DIR] [--depth flat|recursive] [--yes]`
//! - `docfix html-docx [-C DIR] [--depth flat|recursive] [--yes]`
//! - `docfix imported-extensions [-C DIR] [--depth flat|recursive] [--yes]`
//! - `docfix frontmatter [-C DIR] [--target DIR] [--extension EXT] [--dry-run]`
//!
//! ## Exit Codes
//!
//! - 0: Done, nothing to do, or confirmation declined
//! - 1: Fatal error (missing directory, unreadable file, bad config) or a
//!   rename that failed while applying

pub mod frontmatter_cmd;
pub mod rename_cmd;

use clap::Parser;
use clap::Subcommand;

pub use frontmatter_cmd::FrontmatterArgs;
pub use rename_cmd::RenameArgs;
pub use rename_cmd::RenameTool;

/// Clean up file names and frontmatter left behind by document conversion
#[derive(Debug, Parser)]
#[command(name = "docfix", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Strip trailing '._docx' / '_docx' from file names (flat by default)
    DocxSuffixes(RenameArgs),

    /// Rename '*.html.docx' to '*.html' across the tree
    HtmlDocx(RenameArgs),

    /// Fix '.html.docx', '_docx' and '*.html*.docx' names across the tree
    ImportedExtensions(RenameArgs),

    /// Replace backslashes in 'source:' / 'route:' frontmatter keys
    Frontmatter(FrontmatterArgs),
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::DocxSuffixes(args) => rename_cmd::run(RenameTool::DocxSuffixes, args),
            Command::HtmlDocx(args) => rename_cmd::run(RenameTool::HtmlDocx, args),
            Command::ImportedExtensions(args) => {
                rename_cmd::run(RenameTool::ImportedExtensions, args)
            }
            Command::Frontmatter(args) => frontmatter_cmd::run(args),
        }
    }
}
