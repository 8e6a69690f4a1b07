use strum_macros::Display;

use sieve_dom::{Node, TagNode, TextNode, serialize};

use super::issue::{FilterIssue, IssueKind};
use crate::registry::{AllowedAttributes, TagRegistry, TagRule};
use crate::tokenizer::helpers::attribute_name;
use crate::tokenizer::{Token, Tokenizer};

/// State of the tree builder.
///
/// ```text
///            unknown / misplaced tag
///   Active ─────────────────────────▶ Skipping ──┐ same-name open: depth + 1
///     ▲                                 │   ▲────┘ same-name close: depth - 1
///     └──────── depth reaches 0 ────────┘
///   Active or Skipping ── Malformed ──▶ Halted
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BuilderState {
    /// Tokens are added to the current container.
    Active,
    /// Inside a dropped subtree, waiting for the end tag that closes it.
    Skipping {
        /// Lowercased name of the dropped tag.
        name: String,
        /// Number of unclosed same-name tags, including the dropped one.
        depth: usize,
    },
    /// A malformed construct ended the parse.
    Halted,
}

/// An element on the stack of open elements, with the children gathered so
/// far.
#[derive(Debug)]
struct OpenElement {
    name: String,
    /// Lowercased name used for matching end tags and parent rules.
    key: String,
    attributes: Vec<String>,
    children: Vec<Node>,
    offset: usize,
}

/// Everything a parse produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    /// Top-level nodes in document order.
    pub nodes: Vec<Node>,
    /// Filter decisions, in the order they were made.
    pub issues: Vec<FilterIssue>,
    /// Whether a malformed tag cut the input short.
    pub halted: bool,
}

impl ParseReport {
    /// Serialize the kept nodes.
    #[must_use]
    pub fn text(&self) -> String {
        serialize(&self.nodes)
    }
}

/// Builds the filtered node tree from a token stream.
///
/// The builder keeps an explicit stack of open elements instead of recursing,
/// so nesting depth is bounded by the heap, not the call stack. Only tags that
/// are registered and appear under an allowed parent ever reach the output;
/// everything else is dropped together with its subtree.
pub struct TreeBuilder<'r> {
    registry: &'r TagRegistry,
    state: BuilderState,
    stack_of_open_elements: Vec<OpenElement>,
    /// Completed top-level nodes.
    output: Vec<Node>,
    issues: Vec<FilterIssue>,
}

impl<'r> TreeBuilder<'r> {
    /// Create a builder that filters against `registry`.
    #[must_use]
    pub const fn new(registry: &'r TagRegistry) -> Self {
        Self {
            registry,
            state: BuilderState::Active,
            stack_of_open_elements: Vec::new(),
            output: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Tokenize `input` and build the filtered tree in one pass.
    #[must_use]
    pub fn run(mut self, input: &str) -> ParseReport {
        let mut tokenizer = Tokenizer::new(input);
        while self.state != BuilderState::Halted {
            let Some(token) = tokenizer.next_token() else {
                break;
            };
            self.process_token(token, tokenizer.token_start());
        }
        self.finish()
    }

    /// Current state of the machine.
    #[must_use]
    pub const fn state(&self) -> &BuilderState {
        &self.state
    }

    /// Number of currently open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack_of_open_elements.len()
    }

    /// Feed one token that started at byte `offset` of the input.
    ///
    /// Tokens pushed after the builder has halted are ignored.
    pub fn process_token(&mut self, token: Token, offset: usize) {
        match self.state {
            BuilderState::Halted => {}
            BuilderState::Skipping { .. } => self.handle_skipping(token, offset),
            BuilderState::Active => self.handle_active(token, offset),
        }
    }

    /// End the parse and hand back the result.
    ///
    /// Elements that are still open are discarded with their children. A
    /// pending skip is simply abandoned.
    #[must_use]
    pub fn finish(mut self) -> ParseReport {
        let halted = self.state == BuilderState::Halted;
        if !halted {
            for open in self.stack_of_open_elements.drain(..) {
                self.issues
                    .push(FilterIssue::tag(IssueKind::UnclosedTag, open.name, open.offset));
            }
        }
        ParseReport {
            nodes: self.output,
            issues: self.issues,
            halted,
        }
    }

    fn handle_active(&mut self, token: Token, offset: usize) {
        match token {
            Token::Text { data } => self.insert_node(Node::Text(TextNode::new(data))),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => self.handle_start_tag(name, attributes, self_closing, offset),
            Token::EndTag { name } => self.handle_end_tag(name, offset),
            Token::Malformed => self.halt(offset),
        }
    }

    fn handle_skipping(&mut self, token: Token, offset: usize) {
        let BuilderState::Skipping { name, depth } = &mut self.state else {
            return;
        };
        match token {
            Token::StartTag {
                name: open,
                self_closing: false,
                ..
            } if open.eq_ignore_ascii_case(name.as_str()) => *depth += 1,
            Token::EndTag { name: close } if close.eq_ignore_ascii_case(name.as_str()) => {
                *depth -= 1;
                if *depth == 0 {
                    self.state = BuilderState::Active;
                }
            }
            Token::Malformed => self.halt(offset),
            // Text and unrelated tags inside a dropped subtree vanish with it.
            Token::Text { .. } | Token::StartTag { .. } | Token::EndTag { .. } => {}
        }
    }

    fn handle_start_tag(
        &mut self,
        name: String,
        attributes: Vec<String>,
        self_closing: bool,
        offset: usize,
    ) {
        let registry = self.registry;
        let key = name.to_ascii_lowercase();

        let Some(rule) = registry.rule(&key) else {
            self.drop_tag(IssueKind::UnknownTag, name, key, self_closing, offset);
            return;
        };

        let parent = self
            .stack_of_open_elements
            .last()
            .map(|open| open.key.as_str());
        if !rule.allowed_parents.permits(parent) {
            let self_closing = self_closing || rule.is_void;
            self.drop_tag(IssueKind::DisallowedParent, name, key, self_closing, offset);
            return;
        }

        let attributes = self.filter_attributes(&name, attributes, rule, offset);
        if rule.is_void || self_closing {
            self.insert_node(Node::Tag(TagNode::self_closing(name, attributes)));
        } else {
            self.stack_of_open_elements.push(OpenElement {
                name,
                key,
                attributes,
                children: Vec::new(),
                offset,
            });
        }
    }

    /// Only an end tag naming the current element closes it. Anything else,
    /// including end tags for void elements, is ignored.
    fn handle_end_tag(&mut self, name: String, offset: usize) {
        let closes_current = self
            .stack_of_open_elements
            .last()
            .is_some_and(|open| open.key.eq_ignore_ascii_case(&name));
        if !closes_current {
            self.issues
                .push(FilterIssue::tag(IssueKind::StrayEndTag, name, offset));
            return;
        }
        if let Some(open) = self.stack_of_open_elements.pop() {
            let tag = TagNode::with_children(open.name, open.attributes, open.children);
            self.insert_node(Node::Tag(tag));
        }
    }

    /// Drop a tag. A self-closing tag has no subtree, so only a container
    /// switches the builder into skipping mode.
    fn drop_tag(
        &mut self,
        kind: IssueKind,
        name: String,
        key: String,
        self_closing: bool,
        offset: usize,
    ) {
        self.issues.push(FilterIssue::tag(kind, name, offset));
        if !self_closing {
            self.state = BuilderState::Skipping {
                name: key,
                depth: 1,
            };
        }
    }

    fn filter_attributes(
        &mut self,
        tag: &str,
        attributes: Vec<String>,
        rule: &TagRule,
        offset: usize,
    ) -> Vec<String> {
        if rule.allowed_attributes == AllowedAttributes::Any {
            return attributes;
        }
        let mut kept = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            if rule.allowed_attributes.permits(attribute_name(&attribute)) {
                kept.push(attribute);
            } else {
                self.issues.push(FilterIssue {
                    kind: IssueKind::DroppedAttribute,
                    tag: Some(tag.to_string()),
                    attribute: Some(attribute_name(&attribute).to_string()),
                    offset,
                });
            }
        }
        kept
    }

    fn halt(&mut self, offset: usize) {
        self.issues.push(FilterIssue {
            kind: IssueKind::Malformed,
            tag: None,
            attribute: None,
            offset,
        });
        self.state = BuilderState::Halted;
    }

    /// Append to the current element, or to the top level when nothing is open.
    fn insert_node(&mut self, node: Node) {
        match self.stack_of_open_elements.last_mut() {
            Some(open) => open.children.push(node),
            None => self.output.push(node),
        }
    }
}
