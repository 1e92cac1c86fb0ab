//! Cleanup passes for trees produced by a document-conversion pipeline.
//!
//! Renames run as three explicit phases: [`scan::build_plans`] proposes,
//! [`plan::validate`] splits off destination conflicts, and [`apply::apply`]
//! renames only when handed a [`Confirmation::Confirmed`]. The frontmatter
//! pass ([`frontmatter::fix_tree`]) has no confirmation step and writes only
//! files whose content changed.

pub mod apply;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod plan;
pub mod rules;
pub mod scan;

pub use apply::ApplyOutcome;
pub use apply::ApplySummary;
pub use apply::Confirmation;
pub use config::DocfixConfig;
pub use error::DocfixError;
pub use error::Result;
pub use plan::RenamePlan;
pub use plan::Validation;
pub use rules::RuleSet;
pub use scan::WalkDepth;
