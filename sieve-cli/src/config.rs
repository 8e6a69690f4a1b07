//! JSON rule files.
//!
//! A rule file extends (or, with `"replace": true`, replaces) the default
//! whitelist:
//!
//! ```json
//! {
//!   "replace": false,
//!   "tags": {
//!     "invalidtag": {},
//!     "wbr": { "void": true },
//!     "dd": { "parents": ["dl"] },
//!     "a": { "attributes": ["href", "title"] }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use sieve_common::{Result, SieveError};
use sieve_html::{TagRegistry, TagRule};

/// Top-level shape of a rule file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    /// Start from an empty whitelist instead of the default one.
    #[serde(default)]
    pub replace: bool,
    /// Rules keyed by tag name.
    #[serde(default)]
    pub tags: BTreeMap<String, RuleSpec>,
}

/// One tag's rule as written in the file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    /// Void tags never have children.
    #[serde(default)]
    pub void: bool,
    /// Allowed immediate parents; absent means anywhere.
    #[serde(default)]
    pub parents: Option<Vec<String>>,
    /// Allowed attribute names; absent means all.
    #[serde(default)]
    pub attributes: Option<Vec<String>>,
}

impl RuleSpec {
    /// Convert to a registry rule.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidRule`] when `parents` is present but
    /// empty, since such a tag could never be kept.
    pub fn to_rule(&self, tag: &str) -> Result<TagRule> {
        let mut rule = match &self.parents {
            Some(parents) if parents.is_empty() => {
                return Err(SieveError::InvalidRule {
                    tag: tag.to_string(),
                    reason: "`parents` must list at least one tag".to_string(),
                });
            }
            Some(parents) => TagRule::within(parents),
            None => TagRule::container(),
        };
        rule.is_void = self.void;
        if let Some(attributes) = &self.attributes {
            rule = rule.with_attributes(attributes);
        }
        Ok(rule)
    }
}

impl RuleFile {
    /// Decode a rule file from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::Config`] for malformed JSON or unknown fields.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and decode a rule file.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::Io`] if the file cannot be read, or
    /// [`SieveError::Config`] if it cannot be decoded.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Register every rule in `registry`, clearing it first when `replace`
    /// is set.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid rule or empty tag name; rules registered
    /// before the failure stay registered.
    pub fn apply(&self, registry: &mut TagRegistry) -> Result<()> {
        if self.replace {
            *registry = TagRegistry::empty();
        }
        for (tag, spec) in &self.tags {
            registry.register_tag(tag, spec.to_rule(tag)?)?;
        }
        Ok(())
    }
}
