use core::fmt;

/// A lexical event produced by the [`Tokenizer`](super::Tokenizer).
///
/// Tokens are ephemeral: the tree builder consumes each one as soon as it is
/// produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of character data up to the next tag.
    Text {
        /// The raw characters.
        data: String,
    },

    /// `<name attr="value" ...>` or `<name ... />`.
    StartTag {
        /// Tag name with the casing used in the source.
        name: String,
        /// Raw attribute text in source order, e.g. `class="test"`.
        attributes: Vec<String>,
        /// Whether the tag was written with a trailing `/>`.
        self_closing: bool,
    },

    /// `</name>`.
    EndTag {
        /// Tag name with the casing used in the source.
        name: String,
    },

    /// A tag was opened but never terminated. Nothing follows this token.
    Malformed,
}

impl Token {
    /// The tag name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => Some(name.as_str()),
            Self::Text { .. } | Self::Malformed => None,
        }
    }

    /// Returns true for the terminal malformed marker.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { data } => write!(f, "Text({data:?})"),
            Self::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "<{name}")?;
                for attribute in attributes {
                    write!(f, " {attribute}")?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Malformed => write!(f, "MALFORMED"),
        }
    }
}
