//! Tree construction with whitelist filtering.

/// The filtering stack machine.
pub mod builder;
/// Filter diagnostics.
pub mod issue;

pub use builder::{BuilderState, ParseReport, TreeBuilder};
pub use issue::{FilterIssue, IssueKind};
