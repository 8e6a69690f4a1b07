//! Helper functions for the tokenizer.
//!
//! This module contains the byte-level pieces of the scan:
//! - character classes for tag and attribute names
//! - locating the end of a tag while honoring quoted attribute values
//! - splitting a tag body into raw attribute strings

/// Kind of tag that starts at a `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagStart {
    /// `<name`
    Open,
    /// `</name`
    Close,
}

/// Tag names use the ASCII set `[A-Za-z0-9:_-]` and must start with a letter.
#[must_use]
pub const fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':')
}

/// Attribute names additionally allow `.`.
#[must_use]
pub const fn is_attribute_name_byte(b: u8) -> bool {
    is_tag_name_byte(b) || b == b'.'
}

/// Determine whether the `<` at `pos` begins a tag.
///
/// A `<` that is not followed by a letter (or `/` and a letter) is plain text.
#[must_use]
pub fn tag_start_at(bytes: &[u8], pos: usize) -> Option<TagStart> {
    if bytes.get(pos) != Some(&b'<') {
        return None;
    }
    match bytes.get(pos + 1) {
        Some(b) if b.is_ascii_alphabetic() => Some(TagStart::Open),
        Some(b'/') if bytes.get(pos + 2).is_some_and(u8::is_ascii_alphabetic) => {
            Some(TagStart::Close)
        }
        _ => None,
    }
}

/// Find the `>` that terminates a tag whose body starts at `from`.
///
/// Quotes only open a value directly after `=`; inside a quoted value `<` and
/// `>` are ordinary characters. Returns `None` when another `<` appears
/// outside quotes first, or when the input ends before the tag does.
#[must_use]
pub fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut prev = b' ';
    for (offset, &b) in bytes.get(from..)?.iter().enumerate() {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'>' => return Some(from + offset),
                b'<' => return None,
                b'"' | b'\'' if prev == b'=' => quote = Some(b),
                _ => {}
            },
        }
        prev = b;
    }
    None
}

/// Strip a trailing self-closing slash from a tag body.
///
/// The slash counts only when it stands on its own: directly after the tag
/// name, after whitespace, or after a closing quote. `href=/a/` keeps its
/// slash as part of the value.
#[must_use]
pub fn strip_self_closing(body: &str) -> (&str, bool) {
    let Some(rest) = body.trim_end().strip_suffix('/') else {
        return (body, false);
    };
    match rest.as_bytes().last() {
        None => (rest, true),
        Some(b) if b.is_ascii_whitespace() || matches!(b, b'"' | b'\'') => (rest, true),
        Some(_) => (body, false),
    }
}

/// Split a tag body into whitespace-delimited raw attributes.
///
/// Whitespace inside quoted values does not split. Pieces that are not
/// shaped like an attribute are discarded.
#[must_use]
pub fn split_attributes(body: &str) -> Vec<String> {
    let bytes = body.as_bytes();
    let mut attributes = Vec::new();
    let mut start: Option<usize> = None;
    let mut quote: Option<u8> = None;
    let mut prev = b' ';

    for (i, &b) in bytes.iter().enumerate() {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
        } else if b.is_ascii_whitespace() {
            if let Some(s) = start.take() {
                push_if_attribute(&mut attributes, &body[s..i]);
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            if matches!(b, b'"' | b'\'') && prev == b'=' {
                quote = Some(b);
            }
        }
        prev = b;
    }
    if let Some(s) = start {
        push_if_attribute(&mut attributes, &body[s..]);
    }
    attributes
}

fn push_if_attribute(attributes: &mut Vec<String>, piece: &str) {
    if is_attribute_shaped(piece) {
        attributes.push(piece.to_string());
    }
}

/// The name part of a raw attribute (`class` for `class="test"`).
#[must_use]
pub fn attribute_name(raw: &str) -> &str {
    raw.split_once('=').map_or(raw, |(name, _)| name)
}

/// Whether `piece` looks like `name`, `name=value`, `name="value"` or
/// `name='value'`.
#[must_use]
pub fn is_attribute_shaped(piece: &str) -> bool {
    let (name, value) = match piece.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (piece, None),
    };
    if name.is_empty() || !name.bytes().all(is_attribute_name_byte) {
        return false;
    }
    value.is_none_or(is_value_shaped)
}

fn is_value_shaped(value: &str) -> bool {
    let bytes = value.as_bytes();
    match bytes.first() {
        None => false,
        Some(&q @ (b'"' | b'\'')) => {
            bytes.len() >= 2
                && bytes[bytes.len() - 1] == q
                && !bytes[1..bytes.len() - 1].contains(&q)
        }
        Some(_) => !bytes.iter().any(|b| matches!(b, b'"' | b'\'' | b'`')),
    }
}
