//! The minifier pass.
//!
//! [`Minifier`] wraps a token iterator and yields the minified token stream.
//! It pulls one input token at a time and keeps only:
//! - the whitespace [`MinifyState`]
//! - the current [`Region`]
//! - the tokens produced for the last input token and not yet yielded
//! - the script buffer, while inside a `<script>` element
//!
//! Regions do not nest. A region opened by `<pre>` or `<script>` lasts until
//! an end tag closes it, whatever tags appear in between.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::iter::FusedIterator;

use strum_macros::Display;
use wombat_common::warning::warn_once;
use wombat_html::Token;
use wombat_js::ScriptMinifier;

use crate::Options;
use crate::attributes::normalize_attributes;
use crate::compact::{Boundary, MinifyState, trim_html_whitespace};
use crate::config::MinifyConfig;
use crate::error::MinifyError;
use crate::pool::{BufferPool, PooledBuffer};

/// The whitespace rules currently in force.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum Region {
    /// Ordinary flow content: whitespace is compacted.
    #[default]
    None,
    /// Inside an element such as `<pre>`: text passes through unchanged.
    WhitespacePreserve,
    /// Inside `<script>`: text is collected and minified as one unit.
    Script,
}

/// Returns true for comments that must survive minification: Internet
/// Explorer conditional comments such as `<!--[if IE]>...<![endif]-->`, and
/// the data of downlevel-revealed ones such as `<![if !IE]>`.
#[must_use]
pub fn is_conditional_comment(data: &str) -> bool {
    let data = trim_html_whitespace(data);
    data.starts_with("[if") || data.ends_with("endif]")
}

/// Streaming minifier over a sequence of tokens.
///
/// Yields `Err` at most once, when the script minifier fails. The iterator
/// is exhausted after that. Dropping it part way through releases any script
/// buffer without emitting it.
///
/// Every `<script>` body goes to the script minifier whatever its `type`
/// attribute says, so a template or JSON block that is not valid JavaScript
/// fails the whole document with [`MinifyError::Script`]. Use
/// [`PassthroughScripts`](wombat_js::PassthroughScripts), or a closure that
/// passes such bodies through, for documents that carry them.
pub struct Minifier<'a, I> {
    tokens: I,
    config: &'a MinifyConfig,
    scripts: &'a dyn ScriptMinifier,
    pool: &'a BufferPool,
    state: MinifyState,
    region: Region,
    script: Option<PooledBuffer<'a>>,
    pending: VecDeque<Token>,
    tokens_read: usize,
    done: bool,
}

impl<'a, I> Minifier<'a, I>
where
    I: Iterator<Item = Token>,
{
    /// Create a minifier over `tokens`.
    #[must_use]
    pub fn new<T>(tokens: T, options: &'a Options<'a>) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            tokens: tokens.into_iter(),
            config: &options.config,
            scripts: options.scripts,
            pool: options.pool,
            state: MinifyState::default(),
            region: Region::default(),
            script: None,
            pending: VecDeque::with_capacity(3),
            tokens_read: 0,
            done: false,
        }
    }

    /// The whitespace state after the tokens processed so far.
    #[must_use]
    pub const fn state(&self) -> MinifyState {
        self.state
    }

    /// The region the next input token will be read in.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Number of input tokens pulled so far.
    #[must_use]
    pub const fn tokens_read(&self) -> usize {
        self.tokens_read
    }

    fn process(&mut self, token: Token) -> Result<(), MinifyError> {
        match token {
            Token::Text { position, data } => self.process_text(position, data),
            Token::Comment {
                position,
                data,
                kind,
            } => {
                if is_conditional_comment(&data) {
                    self.emit_markup(Token::Comment {
                        position,
                        data,
                        kind,
                    });
                }
            }
            Token::StartTag {
                position,
                name,
                self_closing,
                mut attributes,
            } => {
                normalize_attributes(&mut attributes);
                self.emit_markup(Token::StartTag {
                    position,
                    name,
                    self_closing,
                    attributes,
                });
            }
            Token::EndTag { position, name } => {
                if self.region == Region::Script && name.eq_ignore_ascii_case("script") {
                    self.flush_script(position)?;
                }
                self.emit_markup(Token::EndTag { position, name });
            }
            doctype @ Token::Doctype { .. } => self.pending.push_back(doctype),
        }
        Ok(())
    }

    fn process_text(&mut self, position: usize, data: String) {
        match self.region {
            Region::Script => {
                if let Some(buffer) = self.script.as_mut() {
                    buffer.push_str(&data);
                }
            }
            Region::WhitespacePreserve => self.pending.push_back(Token::Text { position, data }),
            Region::None => {
                // `Some(None)` means the value came through untouched and can
                // be moved rather than copied.
                let (leading_space, text) = {
                    let compacted = self.state.compact_text(&data);
                    let text = compacted.text.map(|text| match text {
                        Cow::Borrowed(s) if s.len() == data.len() => None,
                        text => Some(text.into_owned()),
                    });
                    (compacted.leading_space, text)
                };
                if leading_space {
                    self.pending.push_back(Token::text(position, " "));
                }
                if let Some(text) = text {
                    let data = text.unwrap_or(data);
                    self.pending.push_back(Token::Text { position, data });
                }
            }
        }
    }

    /// Emit a tag or kept comment, settling any owed space first, then
    /// update the region.
    fn emit_markup(&mut self, token: Token) {
        let boundary = match &token {
            Token::EndTag { name, .. } if self.config.is_block(name) => Boundary::BlockEnd,
            Token::StartTag { name, .. } | Token::EndTag { name, .. }
                if self.config.preserves_surrounding_space(name) =>
            {
                Boundary::PreserveSurroundingSpace
            }
            _ => Boundary::Other,
        };
        if self.state.resolve_at(boundary) {
            self.pending.push_back(Token::text(token.position(), " "));
        }

        let region = self.region_after(&token);
        self.pending.push_back(token);
        self.enter(region);
    }

    fn region_after(&self, token: &Token) -> Region {
        match (self.region, token) {
            (Region::Script, Token::EndTag { name, .. }) if name.eq_ignore_ascii_case("script") => {
                Region::None
            }
            (Region::Script, _) => Region::Script,
            (_, Token::StartTag { name, .. }) if name.eq_ignore_ascii_case("script") => {
                Region::Script
            }
            (_, Token::StartTag { name, .. }) if self.config.preserves_whitespace(name) => {
                Region::WhitespacePreserve
            }
            (_, Token::EndTag { name, .. })
                if name.eq_ignore_ascii_case("script") || self.config.preserves_whitespace(name) =>
            {
                Region::None
            }
            (region, _) => region,
        }
    }

    fn enter(&mut self, region: Region) {
        if region == Region::Script && self.script.is_none() {
            self.script = Some(self.pool.acquire());
        }
        self.region = region;
    }

    /// Minify the collected script text and queue it ahead of `</script>`.
    /// An empty script emits nothing.
    fn flush_script(&mut self, position: usize) -> Result<(), MinifyError> {
        let Some(buffer) = self.script.take() else {
            return Ok(());
        };
        if buffer.is_empty() {
            return Ok(());
        }
        let minified = self.scripts.minify(&mut buffer.as_bytes())?;
        self.pending.push_back(Token::text(position, minified));
        Ok(())
    }

    fn finish(&mut self) {
        if self.region == Region::Script {
            warn_once(
                "Minifier",
                "script element not closed before end of input; its text was dropped",
            );
        }
        self.script = None;
        self.done = true;
    }
}

impl<I> Iterator for Minifier<'_, I>
where
    I: Iterator<Item = Token>,
{
    type Item = Result<Token, MinifyError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }
            let Some(token) = self.tokens.next() else {
                self.finish();
                return None;
            };
            self.tokens_read += 1;
            if let Err(err) = self.process(token) {
                self.pending.clear();
                self.script = None;
                self.done = true;
                return Some(Err(err));
            }
        }
    }
}

impl<I> FusedIterator for Minifier<'_, I> where I: Iterator<Item = Token> {}
