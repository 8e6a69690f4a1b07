//! Output node model for the Sieve HTML filter.
//!
//! The filter produces an owned tree of [`Node`]s. There are exactly two kinds
//! of node, so the model is a closed enum rather than a trait hierarchy.
//!
//! # Serialization
//!
//! [`Node::text`] reconstructs markup from a node:
//! - text nodes are emitted verbatim
//! - tags are emitted with their raw attributes in source order
//! - self-closing and void tags are always normalized to `<name ... />`

use core::fmt;

/// A node of the filtered output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A run of character data.
    Text(TextNode),
    /// A whitelisted tag together with its kept subtree.
    Tag(TagNode),
}

/// Character data, stored exactly as it appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    content: String,
}

impl TextNode {
    /// Create a text node from raw content.
    #[must_use]
    pub const fn new(content: String) -> Self {
        Self { content }
    }

    /// The stored content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Serialize the node. Text is returned verbatim.
    #[must_use]
    pub fn text(&self) -> String {
        self.content.clone()
    }
}

/// A tag that survived filtering.
///
/// Invariant: `children` is empty whenever `self_closing` is set. The
/// constructors are the only way to build a `TagNode`, and neither allows
/// children on a self-closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    name: String,
    attributes: Vec<String>,
    children: Vec<Node>,
    self_closing: bool,
}

impl TagNode {
    /// Create a self-closing tag. Void elements are always built this way.
    #[must_use]
    pub const fn self_closing(name: String, attributes: Vec<String>) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
            self_closing: true,
        }
    }

    /// Create a container tag with its (possibly empty) children.
    #[must_use]
    pub const fn with_children(name: String, attributes: Vec<String>, children: Vec<Node>) -> Self {
        Self {
            name,
            attributes,
            children,
            self_closing: false,
        }
    }

    /// Tag name with the casing used in the source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw attribute text in source order, e.g. `class="test"`.
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Whether the tag serializes as `<name ... />`.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Serialize the tag and its subtree.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for attribute in &self.attributes {
            out.push(' ');
            out.push_str(attribute);
        }
        if self.self_closing {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_markup(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl Node {
    /// Serialize this node back into markup.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    /// Returns the tag if this node is one.
    #[must_use]
    pub const fn as_tag(&self) -> Option<&TagNode> {
        match self {
            Self::Tag(tag) => Some(tag),
            Self::Text(_) => None,
        }
    }

    /// Returns the text node if this node is one.
    #[must_use]
    pub const fn as_text(&self) -> Option<&TextNode> {
        match self {
            Self::Text(text) => Some(text),
            Self::Tag(_) => None,
        }
    }

    /// Attributes of a tag node; empty for text.
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        match self {
            Self::Tag(tag) => tag.attributes(),
            Self::Text(_) => &[],
        }
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&text.content),
            Self::Tag(tag) => tag.write_markup(out),
        }
    }
}

impl From<TextNode> for Node {
    fn from(text: TextNode) -> Self {
        Self::Text(text)
    }
}

impl From<TagNode> for Node {
    fn from(tag: TagNode) -> Self {
        Self::Tag(tag)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Concatenate the serialization of a sequence of top-level nodes.
#[must_use]
pub fn serialize(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_markup(&mut out);
    }
    out
}

/// Render an indented debug view of a node sequence.
///
/// Text is quoted, with newlines escaped and spaces shown as `·` so that
/// whitespace-only runs stay visible.
#[must_use]
pub fn tree_string(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_tree(node, 0, &mut out);
    }
    out
}

/// Print the debug view produced by [`tree_string`] to stdout.
pub fn print_tree(nodes: &[Node]) {
    print!("{}", tree_string(nodes));
}

fn write_tree(node: &Node, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    match node {
        Node::Text(text) => {
            let display = text.content.replace('\n', "\\n").replace(' ', "\u{00B7}");
            out.push_str(&format!("{prefix}\"{display}\"\n"));
        }
        Node::Tag(tag) => {
            let closing = if tag.self_closing { " /" } else { "" };
            if tag.attributes.is_empty() {
                out.push_str(&format!("{prefix}<{}{closing}>\n", tag.name));
            } else {
                out.push_str(&format!(
                    "{prefix}<{} {}{closing}>\n",
                    tag.name,
                    tag.attributes.join(" ")
                ));
            }
            for child in &tag.children {
                write_tree(child, indent + 1, out);
            }
        }
    }
}
