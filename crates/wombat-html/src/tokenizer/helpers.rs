//! Helper functions for the HTML tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling and lookahead
//! - Text accumulation and token emission
//! - Attribute helpers
//! - Parse error reporting

use std::mem;

use wombat_common::warning::warn_once;

use super::machine::{HTMLTokenizer, RAW_TEXT_ELEMENTS, TokenizerState};
use super::token::Token;

/// ASCII whitespace as the tokenizer and the minifier understand it: tab,
/// line feed, form feed, carriage return and space.
#[must_use]
pub const fn is_html_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The current character is processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Returns the character at the current position and advances past it.
    /// Returns None at the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Check if the next few characters match the target string exactly.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// Check if the next few characters match the target string using
    /// ASCII case-insensitive comparison.
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input[self.current_pos..]
            .get(..target.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(target))
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    pub(super) const fn is_whitespace_char(c: char) -> bool {
        is_html_whitespace(c)
    }

    /// Inside a raw text element, having just consumed `<`: is this the start
    /// of the element's end tag? The name must be followed by whitespace, `/`,
    /// `>` or the end of input, so `</scripts>` does not end a `<script>`.
    pub(super) fn at_raw_text_end_tag(&self) -> bool {
        let Some(name) = self.raw_text_element.as_deref() else {
            return false;
        };
        let Some(after_solidus) = self.input[self.current_pos..].strip_prefix('/') else {
            return false;
        };
        let Some(candidate) = after_solidus.get(..name.len()) else {
            return false;
        };
        candidate.eq_ignore_ascii_case(name)
            && after_solidus[name.len()..]
                .chars()
                .next()
                .is_none_or(|c| Self::is_whitespace_char(c) || c == '/' || c == '>')
    }

    /// Take everything from `data_start` up to the next `delimiter`, leaving
    /// the input positioned after the delimiter. Without a delimiter the rest
    /// of the input is taken.
    pub(super) fn consume_until(&mut self, delimiter: char, data_start: usize) -> String {
        if let Some(end) = self.input[data_start..].find(delimiter) {
            self.current_pos = data_start + end + delimiter.len_utf8();
            self.input[data_start..data_start + end].to_string()
        } else {
            self.log_parse_error("end of input in markup declaration");
            self.current_pos = self.input.len();
            self.input[data_start..].to_string()
        }
    }
}

// =============================================================================
// Text and Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Append the current input character to the pending character data.
    pub(super) fn append_character(&mut self, c: char) {
        if self.text.is_empty() {
            self.text_start = self.current_pos - c.len_utf8();
        }
        self.text.push(c);
    }

    /// Append source text that turned out not to be markup.
    pub(super) fn append_text(&mut self, position: usize, s: &str) {
        if self.text.is_empty() {
            self.text_start = position;
        }
        self.text.push_str(s);
    }

    /// Emit the pending character data, if any, as one text token.
    pub(super) fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let data = mem::take(&mut self.text);
            self.pending.push_back(Token::Text {
                position: self.text_start,
                data,
            });
        }
    }

    /// Emit a markup token (comment, doctype, tag) after any character data
    /// that preceded it, and return to the data state.
    pub(super) fn emit_markup(&mut self, token: Token) {
        self.flush_text();
        self.pending.push_back(token);
        self.switch_to(TokenizerState::Data);
    }

    /// "Emit the current tag token"
    ///
    /// Start tags of raw text elements switch to the raw text state, as the
    /// tree builder would tell a WHATWG tokenizer to.
    pub(super) fn emit_current_tag(&mut self) {
        let Some(token) = self.current_token.take() else {
            self.switch_to(TokenizerState::Data);
            return;
        };
        let next_state = match &token {
            Token::StartTag { name, .. } => {
                let name = name.to_ascii_lowercase();
                if name == "plaintext" {
                    TokenizerState::PlainText
                } else if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                    self.raw_text_element = Some(name);
                    TokenizerState::RawText
                } else {
                    TokenizerState::Data
                }
            }
            _ => {
                self.raw_text_element = None;
                TokenizerState::Data
            }
        };
        self.emit_markup(token);
        self.switch_to(next_state);
    }

    /// The input ended inside a tag. The tag is not emitted; its source text
    /// is kept as character data so nothing is silently lost.
    pub(super) fn emit_unterminated_markup(&mut self) {
        self.log_parse_error("end of input in tag");
        self.current_token = None;
        let start = self.markup_start;
        if self.text.is_empty() {
            self.text_start = start;
        }
        self.text.push_str(&self.input[start..]);
        self.current_pos = self.input.len();
        self.finish();
    }

    /// "Emit an end-of-file token." The iterator simply ends.
    pub(super) fn finish(&mut self) {
        self.flush_text();
        self.at_eof = true;
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Start a new attribute in the current tag token."
    pub(super) fn start_attribute(&mut self) {
        if let Some(token) = self.current_token.as_mut() {
            token.start_new_attribute();
        }
    }

    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_current_attribute_name(c);
        }
    }

    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_current_attribute_value(c);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// Logs a parse error using the wombat-common warning system.
    /// Parse errors are not fatal: the tokenizer recovers and continues.
    pub(super) fn log_parse_error(&self, message: &str) {
        let pos = self.current_pos;
        warn_once(
            "HTML Tokenizer",
            &format!("{message} at position {pos} ({})", self.state),
        );
    }
}
