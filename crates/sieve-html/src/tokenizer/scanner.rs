use memchr::memchr;

use super::helpers::{
    TagStart, find_tag_end, is_tag_name_byte, split_attributes, strip_self_closing, tag_start_at,
};
use super::token::Token;

/// Single-pass markup scanner.
///
/// Each call to [`next_token`](Self::next_token) consumes exactly one token
/// from the input and never revisits text that was already emitted. After a
/// [`Token::Malformed`] the tokenizer is exhausted.
///
/// The tokenizer only reports the literal form it saw: whether a start tag is
/// void is decided later, by the tree builder, from the registry.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    /// Byte offset of the next unread character.
    current_pos: usize,
    /// Byte offset at which the most recent token began.
    token_start: usize,
    halted: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            current_pos: 0,
            token_start: 0,
            halted: false,
        }
    }

    /// Byte offset at which the most recently returned token began.
    #[must_use]
    pub const fn token_start(&self) -> usize {
        self.token_start
    }

    /// Byte offset of the next unread character.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.current_pos
    }

    /// Whether a malformed construct stopped the scan.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Consume and return the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        if self.halted || self.current_pos >= self.input.len() {
            return None;
        }
        self.token_start = self.current_pos;
        let token = match tag_start_at(self.input.as_bytes(), self.current_pos) {
            Some(kind) => self.consume_tag(kind),
            None => self.consume_text(),
        };
        Some(token)
    }

    /// Consume a text run. The run ends before the next `<` that starts a
    /// tag; a `<` that does not start one stays in the run as `&lt;`, so
    /// text can never splice into a tag once the markup around it is dropped.
    fn consume_text(&mut self) -> Token {
        let bytes = self.input.as_bytes();
        let mut data = String::new();
        let mut cursor = self.current_pos;
        let end = loop {
            match memchr(b'<', &bytes[cursor..]) {
                Some(offset) => {
                    let at = cursor + offset;
                    if tag_start_at(bytes, at).is_some() {
                        break at;
                    }
                    data.push_str(&self.input[cursor..at]);
                    data.push_str("&lt;");
                    cursor = at + 1;
                }
                None => break bytes.len(),
            }
        };
        data.push_str(&self.input[cursor..end]);
        self.current_pos = end;
        Token::Text { data }
    }

    /// Consume a start or end tag beginning at the current `<`.
    fn consume_tag(&mut self, kind: TagStart) -> Token {
        let bytes = self.input.as_bytes();
        let name_start = match kind {
            TagStart::Open => self.current_pos + 1,
            TagStart::Close => self.current_pos + 2,
        };
        let mut name_end = name_start;
        while name_end < bytes.len() && is_tag_name_byte(bytes[name_end]) {
            name_end += 1;
        }

        let Some(tag_end) = find_tag_end(bytes, name_end) else {
            self.halted = true;
            self.current_pos = bytes.len();
            return Token::Malformed;
        };

        let name = self.input[name_start..name_end].to_string();
        let body = &self.input[name_end..tag_end];
        self.current_pos = tag_end + 1;

        match kind {
            TagStart::Open => {
                let (body, self_closing) = strip_self_closing(body);
                Token::StartTag {
                    name,
                    attributes: split_attributes(body),
                    self_closing,
                }
            }
            // Anything written after an end tag's name is ignored.
            TagStart::Close => Token::EndTag { name },
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
