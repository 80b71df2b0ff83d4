//! HTML tokenizer and serializer for the Wombat minifier.
//!
//! # Scope
//!
//! This crate implements:
//! - **Token model** - text, comment, start tag, end tag and doctype tokens,
//!   each carrying its source position
//! - **HTML Tokenizer** - a lazy, raw-preserving tokenizer modeled on the
//!   WHATWG tokenization states
//!   - Data, raw text (`script`, `style`, `textarea`, ...) and plaintext
//!   - Tag, attribute, comment, bogus comment and DOCTYPE handling
//! - **Serializer** - renders tokens back to markup
//!
//! # Not Implemented
//!
//! - Character reference decoding (text is kept exactly as written)
//! - Tree construction
//! - CDATA sections in foreign content (tokenized as bogus comments)

/// Renders tokens back to markup.
pub mod serializer;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use serializer::{serialize, write_token};
pub use tokenizer::{
    Attribute, CommentKind, HTMLTokenizer, Token, TokenizerState, is_html_whitespace,
};

/// Tokenize a whole document eagerly.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}
