//! The tag whitelist.
//!
//! A [`TagRegistry`] maps lowercased tag names to a [`TagRule`]. A tag that is
//! not registered is dropped together with its subtree; a registered tag is
//! kept only when its rule's nesting constraint holds.

use std::collections::{BTreeSet, HashMap};

use sieve_common::{Result, SieveError};

/// Where a tag may appear.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowedParents {
    /// Under any parent, including the top level.
    #[default]
    Any,
    /// Only directly under one of these (lowercased) tag names. Never at top level.
    Only(BTreeSet<String>),
}

impl AllowedParents {
    /// Whether a tag may sit directly under `parent` (`None` = top level).
    #[must_use]
    pub fn permits(&self, parent: Option<&str>) -> bool {
        match (self, parent) {
            (Self::Any, _) => true,
            (Self::Only(_), None) => false,
            (Self::Only(parents), Some(name)) => parents.contains(&name.to_ascii_lowercase()),
        }
    }
}

/// Which attributes survive on a kept tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowedAttributes {
    /// Every attribute is kept.
    #[default]
    Any,
    /// Only attributes whose (lowercased) name is in the set.
    Only(BTreeSet<String>),
}

impl AllowedAttributes {
    /// Whether an attribute with this name is kept.
    #[must_use]
    pub fn permits(&self, attribute_name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(names) => names.contains(&attribute_name.to_ascii_lowercase()),
        }
    }
}

/// Filtering rule for one tag name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagRule {
    /// Void tags never have children and always serialize as `<name />`.
    pub is_void: bool,
    /// Nesting constraint on the immediate enclosing tag.
    pub allowed_parents: AllowedParents,
    /// Attribute whitelist applied to kept tags.
    pub allowed_attributes: AllowedAttributes,
}

impl TagRule {
    /// An unrestricted container tag such as `div` or `span`.
    #[must_use]
    pub fn container() -> Self {
        Self::default()
    }

    /// An unrestricted void tag such as `input` or `br`.
    #[must_use]
    pub fn void() -> Self {
        Self {
            is_void: true,
            ..Self::default()
        }
    }

    /// A container that is only valid directly under one of `parents`.
    #[must_use]
    pub fn within<I, S>(parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_parents: AllowedParents::Only(lowercase_set(parents)),
            ..Self::default()
        }
    }

    /// Restrict the attributes kept on this tag.
    #[must_use]
    pub fn with_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_attributes = AllowedAttributes::Only(lowercase_set(names));
        self
    }
}

fn lowercase_set<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().to_ascii_lowercase())
        .collect()
}

/// Unrestricted container tags in the default whitelist.
const CONTAINER_TAGS: &[&str] = &[
    "a",
    "b",
    "blockquote",
    "code",
    "div",
    "em",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "i",
    "ol",
    "p",
    "pre",
    "span",
    "strong",
    "table",
    "u",
    "ul",
];

/// Void tags in the default whitelist.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

/// Tags in the default whitelist that only make sense under specific parents.
const NESTED_TAGS: &[(&str, &[&str])] = &[
    ("thead", &["table"]),
    ("tbody", &["table"]),
    ("tfoot", &["table"]),
    ("tr", &["table", "thead", "tbody", "tfoot"]),
    ("td", &["tr"]),
    ("th", &["tr"]),
    ("li", &["ul", "ol"]),
];

/// Mutable mapping from tag name to [`TagRule`].
///
/// Names are matched ASCII case-insensitively: `<DIV>` and `<div>` share one
/// rule.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    rules: HashMap<String, TagRule>,
}

impl TagRegistry {
    /// A registry with no tags at all. Every tag is dropped.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Whether `name` is whitelisted.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.rules.contains_key(&name.to_ascii_lowercase())
    }

    /// The rule for `name`, if registered.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&TagRule> {
        self.rules.get(&name.to_ascii_lowercase())
    }

    /// Insert or replace the rule for `name`.
    ///
    /// Replacing an existing rule is silent. The change applies to every
    /// parse started afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::EmptyTagName`] if `name` is empty or only
    /// whitespace.
    pub fn register_tag(&mut self, name: &str, rule: TagRule) -> Result<()> {
        let key = name.trim();
        if key.is_empty() {
            return Err(SieveError::EmptyTagName);
        }
        let _ = self.rules.insert(key.to_ascii_lowercase(), rule);
        Ok(())
    }

    /// Remove `name` from the whitelist, returning its former rule.
    pub fn remove_tag(&mut self, name: &str) -> Option<TagRule> {
        self.rules.remove(&name.to_ascii_lowercase())
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no tag is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn tag_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for TagRegistry {
    /// The baseline whitelist: common inline and block formatting tags, a
    /// few void tags, and table/list parts constrained to their parents.
    fn default() -> Self {
        let mut rules = HashMap::new();
        for name in CONTAINER_TAGS {
            let _ = rules.insert((*name).to_string(), TagRule::container());
        }
        for name in VOID_TAGS {
            let _ = rules.insert((*name).to_string(), TagRule::void());
        }
        for (name, parents) in NESTED_TAGS {
            let _ = rules.insert((*name).to_string(), TagRule::within(parents.iter()));
        }
        Self { rules }
    }
}
