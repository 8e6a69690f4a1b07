//! Markup tokenizer.
//!
//! A single forward scan over the input that yields text runs, start tags,
//! end tags, and a terminal `Malformed` marker for unterminated tag syntax.

/// Character classes and attribute splitting.
pub mod helpers;
/// The scanning state machine.
pub mod scanner;
/// Token types produced by the tokenizer.
pub mod token;

pub use scanner::Tokenizer;
pub use token::Token;
