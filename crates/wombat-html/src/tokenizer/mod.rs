//! HTML tokenizer module.
//!
//! A raw-preserving tokenizer: it classifies markup into tokens the way the
//! WHATWG tokenizer does, but keeps every byte of text and attribute values
//! as written so a minifier can hand the stream back to the serializer.

/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Tokenizer state machine implementation.
pub mod machine;
/// Token types produced by the tokenizer.
pub mod token;

pub use helpers::is_html_whitespace;
pub use machine::{HTMLTokenizer, TokenizerState};
pub use token::{Attribute, CommentKind, Token};
