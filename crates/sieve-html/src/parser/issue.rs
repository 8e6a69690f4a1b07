use core::fmt;

use strum_macros::{Display, EnumIter};

/// Why the filter changed or discarded part of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum IssueKind {
    /// A tag that is not registered; it was dropped with its subtree.
    UnknownTag,
    /// A registered tag outside its allowed parents; dropped with its subtree.
    DisallowedParent,
    /// An end tag that does not close the current element.
    StrayEndTag,
    /// An element still open at end of input; discarded.
    UnclosedTag,
    /// An attribute outside the tag's attribute whitelist.
    DroppedAttribute,
    /// Unterminated tag syntax; the rest of the input was discarded.
    Malformed,
}

/// A single filter decision, reported for diagnostics.
///
/// Issues never make a parse fail. They describe what was removed and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterIssue {
    /// What happened.
    pub kind: IssueKind,
    /// Tag involved, with source casing. Absent for [`IssueKind::Malformed`].
    pub tag: Option<String>,
    /// Attribute involved, for [`IssueKind::DroppedAttribute`].
    pub attribute: Option<String>,
    /// Byte offset of the token that triggered the issue.
    pub offset: usize,
}

impl FilterIssue {
    pub(crate) const fn tag(kind: IssueKind, tag: String, offset: usize) -> Self {
        Self {
            kind,
            tag: Some(tag),
            attribute: None,
            offset,
        }
    }
}

impl fmt::Display for FilterIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag.as_deref().unwrap_or_default();
        let at = self.offset;
        match self.kind {
            IssueKind::UnknownTag => write!(f, "dropped unknown tag <{tag}> at byte {at}"),
            IssueKind::DisallowedParent => {
                write!(f, "dropped <{tag}> outside its allowed parents at byte {at}")
            }
            IssueKind::StrayEndTag => write!(f, "ignored stray end tag </{tag}> at byte {at}"),
            IssueKind::UnclosedTag => write!(f, "discarded unclosed <{tag}> opened at byte {at}"),
            IssueKind::DroppedAttribute => write!(
                f,
                "removed attribute `{}` from <{tag}> at byte {at}",
                self.attribute.as_deref().unwrap_or_default()
            ),
            IssueKind::Malformed => write!(f, "stopped at malformed tag at byte {at}"),
        }
    }
}
