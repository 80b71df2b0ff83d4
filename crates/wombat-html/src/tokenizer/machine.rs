use std::collections::VecDeque;

use strum_macros::Display;

use super::token::{CommentKind, Token};

/// Elements whose content is raw text: nothing inside them is markup until
/// the matching end tag.
pub(super) const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "textarea", "title", "xmp", "iframe", "noembed", "noframes",
];

/// The tokenizer state machine.
///
/// Modeled on the WHATWG tokenizer states, minus everything a minifier does
/// not need: character references are left undecoded, and comments, doctypes
/// and raw text end tags are found by lookahead rather than per-character
/// states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Character data between tags.
    Data,
    /// Content of a raw text element, ended only by its matching end tag.
    RawText,
    /// Content after `<plaintext>`, which never ends.
    PlainText,
    /// After a `<` in data.
    TagOpen,
    /// After `</`.
    EndTagOpen,
    /// Inside a tag name.
    TagName,
    /// Between a tag name or attribute and the next attribute.
    BeforeAttributeName,
    /// Inside an attribute name.
    AttributeName,
    /// After an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// After `=`.
    BeforeAttributeValue,
    /// Inside `"..."`.
    AttributeValueDoubleQuoted,
    /// Inside `'...'`.
    AttributeValueSingleQuoted,
    /// Inside an unquoted attribute value.
    AttributeValueUnquoted,
    /// After the closing quote of an attribute value.
    AfterAttributeValueQuoted,
    /// After `/` inside a tag.
    SelfClosingStartTag,
}

/// Lazy, raw-preserving HTML tokenizer.
///
/// Yields [`Token`]s on demand through [`Iterator`]. Runs of characters are
/// coalesced into a single [`Token::Text`], and source text (entity
/// references, attribute values, tag name case) is kept exactly as written so
/// the stream serializes back to equivalent markup.
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) current_token: Option<Token>,
    pub(super) at_eof: bool,
    // When true, the next step will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,

    /// Byte offset of the `<` that opened the markup being tokenized.
    pub(super) markup_start: usize,

    /// Character data not yet emitted, and where it started.
    pub(super) text: String,
    pub(super) text_start: usize,

    /// Lowercased name of the raw text element we are inside, if any.
    pub(super) raw_text_element: Option<String>,

    /// Tokens ready to be handed out by [`Iterator::next`].
    pub(super) pending: VecDeque<Token>,

    /// Tokens collected by [`HTMLTokenizer::run`].
    pub(super) token_stream: Vec<Token>,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input. The initial state is the
    /// data state.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            state: TokenizerState::Data,
            input: input.into(),
            current_pos: 0,
            current_input_character: None,
            current_token: None,
            at_eof: false,
            reconsume: false,
            markup_start: 0,
            text: String::new(),
            text_start: 0,
            raw_text_element: None,
            pending: VecDeque::new(),
            token_stream: Vec::new(),
        }
    }

    /// Tokenize the whole input eagerly.
    pub fn run(&mut self) {
        let tokens: Vec<Token> = self.by_ref().collect();
        self.token_stream.extend(tokens);
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after [`run`](Self::run).
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// The state the machine will process the next character in.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Consume one character (or reconsume the current one) and run the
    /// current state's handler.
    fn step(&mut self) {
        if self.reconsume {
            self.reconsume = false;
        } else {
            self.current_input_character = self.consume();
        }

        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::RawText => self.handle_raw_text_state(),
            TokenizerState::PlainText => self.handle_plain_text_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"');
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'');
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
        }
    }

    fn handle_data_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.markup_start = self.current_pos - 1;
                self.switch_to(TokenizerState::TagOpen);
            }
            None => self.finish(),
            Some(c) => self.append_character(c),
        }
    }

    fn handle_raw_text_state(&mut self) {
        match self.current_input_character {
            Some('<') if self.at_raw_text_end_tag() => {
                self.markup_start = self.current_pos - 1;
                self.switch_to(TokenizerState::TagOpen);
            }
            None => self.finish(),
            Some(c) => self.append_character(c),
        }
    }

    fn handle_plain_text_state(&mut self) {
        match self.current_input_character {
            None => self.finish(),
            Some(c) => self.append_character(c),
        }
    }

    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            Some('!') => self.consume_markup_declaration(),
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::start_tag(self.markup_start, ""));
                self.reconsume_in(TokenizerState::TagName);
            }
            Some('?') => {
                self.log_parse_error("unexpected question mark instead of tag name");
                self.consume_bogus_comment(
                    CommentKind::ProcessingInstruction,
                    self.current_pos - 1,
                );
            }
            None => self.emit_unterminated_markup(),
            // A `<` that does not start a tag is character data.
            Some(_) => {
                self.append_text(self.markup_start, "<");
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::end_tag(self.markup_start, ""));
                self.reconsume_in(TokenizerState::TagName);
            }
            Some('>') => {
                self.log_parse_error("missing end tag name");
                self.switch_to(TokenizerState::Data);
            }
            None => self.emit_unterminated_markup(),
            Some(c) => {
                self.log_parse_error("invalid first character of tag name");
                self.consume_bogus_comment(
                    CommentKind::InvalidEndTag,
                    self.current_pos - c.len_utf8(),
                );
            }
        }
    }

    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => self.emit_current_tag(),
            None => self.emit_unterminated_markup(),
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_tag_name(c);
                }
            }
        }
    }

    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            Some('=') => {
                self.log_parse_error("unexpected equals sign before attribute name");
                self.start_attribute();
                self.append_to_attribute_name('=');
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                self.start_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some(c) => self.append_to_attribute_name(c),
        }
    }

    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => self.emit_current_tag(),
            None => self.emit_unterminated_markup(),
            Some(_) => {
                self.start_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            Some('>') => {
                self.log_parse_error("missing attribute value");
                self.emit_current_tag();
            }
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            None => self.emit_unterminated_markup(),
            Some(c) => self.append_to_attribute_value(c),
        }
    }

    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('>') => self.emit_current_tag(),
            None => self.emit_unterminated_markup(),
            Some(c) => self.append_to_attribute_value(c),
        }
    }

    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => self.emit_current_tag(),
            None => self.emit_unterminated_markup(),
            Some(_) => {
                self.log_parse_error("missing whitespace between attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                if let Some(token) = self.current_token.as_mut() {
                    token.set_self_closing();
                }
                self.emit_current_tag();
            }
            None => self.emit_unterminated_markup(),
            Some(_) => {
                self.log_parse_error("unexpected solidus in tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// After `<!`: a comment, a doctype, or a bogus comment.
    fn consume_markup_declaration(&mut self) {
        if self.next_few_characters_are("--") {
            self.consume_string("--");
            self.consume_comment();
        } else if self.next_few_characters_are_case_insensitive("DOCTYPE") {
            let data_start = self.current_pos;
            let data = self.consume_until('>', data_start);
            self.emit_markup(Token::Doctype {
                position: self.markup_start,
                data,
            });
        } else {
            self.log_parse_error("incorrectly opened comment");
            self.consume_bogus_comment(CommentKind::Declaration, self.current_pos);
        }
    }

    /// After `<!--`. The comment ends at the first `-->`; `<!-->` and
    /// `<!--->` are abruptly closed empty comments.
    fn consume_comment(&mut self) {
        let data = if self.next_few_characters_are(">") {
            self.consume_string(">");
            String::new()
        } else if self.next_few_characters_are("->") {
            self.consume_string("->");
            String::new()
        } else if let Some(end) = self.input[self.current_pos..].find("-->") {
            let data = self.input[self.current_pos..self.current_pos + end].to_string();
            self.current_pos += end + "-->".len();
            data
        } else {
            self.log_parse_error("end of input in comment");
            let data = self.input[self.current_pos..].to_string();
            self.current_pos = self.input.len();
            data
        };
        self.emit_markup(Token::comment(self.markup_start, data));
    }

    /// A bogus comment runs from `data_start` up to the next `>`.
    fn consume_bogus_comment(&mut self, kind: CommentKind, data_start: usize) {
        let data = self.consume_until('>', data_start);
        self.emit_markup(Token::comment_of_kind(self.markup_start, kind, data));
    }
}

impl Iterator for HTMLTokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.at_eof {
                return None;
            }
            self.step();
        }
    }
}
