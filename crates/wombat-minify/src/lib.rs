//! Streaming, token-level HTML minifier.
//!
//! # Scope
//!
//! This crate implements:
//! - **Whitespace compaction** - runs of whitespace collapse to one space,
//!   and spaces next to block boundaries are dropped, tracked across token
//!   boundaries with a three-state machine ([`MinifyState`])
//! - **Regions** - text inside `<pre>`-like elements passes through, text
//!   inside `<script>` is collected and handed to a [`ScriptMinifier`]
//! - **Comment filtering** - comments are dropped, except conditional
//!   comments
//! - **Attribute normalization** - `style` and `class` values are tidied
//!
//! The pass never buffers the document. [`Minifier`] is an iterator that
//! pulls tokens from any token source, typically the lazy
//! [`wombat_html::HTMLTokenizer`], and yields the minified stream.
//!
//! # Example
//!
//! ```
//! let html = "<p>  Hello   <b>world</b>  !  </p>";
//! assert_eq!(wombat_minify::minify(html).unwrap(), "<p>Hello <b>world</b> !</p>");
//! ```
//!
//! # Not Implemented
//!
//! - Markup validation or repair (malformed input is passed through)
//! - CSS minification
//! - Attribute quote removal or optional tag omission

use core::fmt::Write as _;
use std::io::{self, Write};

use wombat_html::{HTMLTokenizer, write_token};

/// Attribute value normalization.
pub mod attributes;
/// Whitespace compaction.
pub mod compact;
/// Tag classification.
pub mod config;
mod error;
/// The streaming minifier pass.
pub mod minifier;
/// Reusable script buffers.
pub mod pool;

pub use compact::{MinifyState, compress_whitespace};
pub use config::{ConfigError, MinifyConfig, TagSet};
pub use error::MinifyError;
pub use minifier::{Minifier, Region};
pub use pool::{BufferPool, PooledBuffer};
pub use wombat_js::{JsMinifier, PassthroughScripts, ScriptError, ScriptMinifier};

/// Everything a minifier pass needs besides its input.
pub struct Options<'a> {
    /// Tag classification.
    pub config: MinifyConfig,
    /// Minifier for the text of `<script>` elements.
    pub scripts: &'a dyn ScriptMinifier,
    /// Pool script buffers are leased from.
    pub pool: &'a BufferPool,
}

impl Options<'static> {
    /// Default config, [`JsMinifier`] and the global buffer pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: MinifyConfig::default(),
            scripts: &JsMinifier,
            pool: BufferPool::global(),
        }
    }
}

impl Default for Options<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Options<'a> {
    /// Replace the tag classification.
    #[must_use]
    pub fn with_config(mut self, config: MinifyConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the script minifier.
    #[must_use]
    pub fn with_scripts<'b>(self, scripts: &'b dyn ScriptMinifier) -> Options<'b>
    where
        'a: 'b,
    {
        Options {
            config: self.config,
            scripts,
            pool: self.pool,
        }
    }

    /// Lease script buffers from `pool` instead of the global pool.
    #[must_use]
    pub fn with_pool<'b>(self, pool: &'b BufferPool) -> Options<'b>
    where
        'a: 'b,
    {
        Options {
            config: self.config,
            scripts: self.scripts,
            pool,
        }
    }
}

/// Size and token counts for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinifyStats {
    /// Length of the input document in bytes.
    pub input_bytes: usize,
    /// Length of the minified document in bytes.
    pub output_bytes: usize,
    /// Tokens produced by the tokenizer.
    pub tokens_in: usize,
    /// Tokens written after minification.
    pub tokens_out: usize,
}

impl MinifyStats {
    /// Bytes removed by minification.
    #[must_use]
    pub const fn saved_bytes(&self) -> usize {
        self.input_bytes.saturating_sub(self.output_bytes)
    }

    /// Output size as a fraction of input size. An empty input has a ratio
    /// of 1.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 1.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }
}

/// Minify a document with the default configuration and [`JsMinifier`].
///
/// # Errors
///
/// Returns [`MinifyError::Script`] if a script cannot be minified.
pub fn minify(html: &str) -> Result<String, MinifyError> {
    minify_with(html, &Options::default())
}

/// Minify a document with the given options.
///
/// # Errors
///
/// Returns [`MinifyError::Script`] if a script cannot be minified.
pub fn minify_with(html: &str, options: &Options<'_>) -> Result<String, MinifyError> {
    let mut out = String::with_capacity(html.len());
    for token in Minifier::new(HTMLTokenizer::new(html), options) {
        // Writing into a String cannot fail.
        let _ = write!(out, "{}", token?);
    }
    Ok(out)
}

/// Minify a document straight into `writer`, one token at a time.
///
/// # Errors
///
/// Returns [`MinifyError::Script`] if a script cannot be minified and
/// [`MinifyError::Io`] if writing fails. Output already written is not
/// rolled back.
pub fn minify_to_writer<W: Write + ?Sized>(
    html: &str,
    writer: &mut W,
    options: &Options<'_>,
) -> Result<MinifyStats, MinifyError> {
    let mut out = CountingWriter {
        inner: writer,
        written: 0,
    };
    let mut minifier = Minifier::new(HTMLTokenizer::new(html), options);
    let mut tokens_out = 0;
    for token in minifier.by_ref() {
        write_token(&token?, &mut out)?;
        tokens_out += 1;
    }
    out.flush()?;
    Ok(MinifyStats {
        input_bytes: html.len(),
        output_bytes: out.written,
        tokens_in: minifier.tokens_read(),
        tokens_out,
    })
}

struct CountingWriter<'w, W: ?Sized> {
    inner: &'w mut W,
    written: usize,
}

impl<W: Write + ?Sized> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
