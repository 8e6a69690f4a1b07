//! The public entry point: a tag whitelist plus the parse operation.

use sieve_common::Result;
use sieve_dom::Node;

use crate::parser::{ParseReport, TreeBuilder};
use crate::registry::{TagRegistry, TagRule};

/// A whitelist-driven HTML filter.
///
/// The filter owns its [`TagRegistry`]. Parsing borrows the registry
/// immutably, so registering a tag affects every parse started afterwards and
/// never one already finished.
///
/// ```ignore
/// let filter = HtmlFilter::new();
/// assert_eq!(filter.filter("<span>hi</span><blink>no</blink>"), "<span>hi</span>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlFilter {
    registry: TagRegistry,
}

impl HtmlFilter {
    /// A filter using the default whitelist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter using a caller-provided whitelist.
    #[must_use]
    pub const fn with_registry(registry: TagRegistry) -> Self {
        Self { registry }
    }

    /// The whitelist.
    #[must_use]
    pub const fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Mutable access to the whitelist.
    pub const fn registry_mut(&mut self) -> &mut TagRegistry {
        &mut self.registry
    }

    /// Allow a new tag, or replace the rule of an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`sieve_common::SieveError::EmptyTagName`] for an empty name.
    pub fn register_tag(&mut self, name: &str, rule: TagRule) -> Result<()> {
        self.registry.register_tag(name, rule)
    }

    /// Whether `name` is whitelisted.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.is_registered(name)
    }

    /// Parse and filter `input`, returning the kept top-level nodes.
    ///
    /// Never fails: unknown or misplaced tags are dropped with their subtree,
    /// unclosed tags are discarded, and a malformed tag truncates the result
    /// to what was complete before it.
    #[must_use]
    pub fn parse(&self, input: &str) -> Vec<Node> {
        self.parse_with_report(input).nodes
    }

    /// Like [`parse`](Self::parse), but also returns what was dropped and why.
    #[must_use]
    pub fn parse_with_report(&self, input: &str) -> ParseReport {
        TreeBuilder::new(&self.registry).run(input)
    }

    /// Parse and serialize in one step.
    #[must_use]
    pub fn filter(&self, input: &str) -> String {
        self.parse_with_report(input).text()
    }
}
