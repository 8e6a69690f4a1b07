//! Whitelist-driven HTML filtering parser.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tag Registry** - the mutable whitelist of tag names with their void
//!   status, allowed parents, and allowed attributes
//! - **Tokenizer** - a single forward scan producing text runs, start tags,
//!   end tags, and a malformed marker
//! - **Tree Builder** - a stack machine that keeps whitelisted tags in valid
//!   context, drops everything else with its subtree, and stops at the first
//!   malformed tag
//!
//! # Not Implemented
//!
//! - HTML5 tree construction (implicit tags, foster parenting)
//! - Character reference decoding
//! - Script/style raw text handling
//! - URL or CSS sanitizing inside attribute values

/// The filter facade.
pub mod filter;
/// Tree construction with whitelist filtering.
pub mod parser;
/// The tag whitelist.
pub mod registry;
/// Markup tokenizer.
pub mod tokenizer;

pub use filter::HtmlFilter;
pub use parser::{BuilderState, FilterIssue, IssueKind, ParseReport, TreeBuilder};
pub use registry::{AllowedAttributes, AllowedParents, TagRegistry, TagRule};
pub use tokenizer::{Token, Tokenizer};
