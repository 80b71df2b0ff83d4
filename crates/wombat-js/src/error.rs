use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Failure while minifying the body of a `<script>` element.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script does not parse as JavaScript.
    ///
    /// Holds the parser's first diagnostic. Nothing is emitted for a script
    /// that does not parse, since reprinting it could change its meaning.
    #[error("script is not valid JavaScript: {0}")]
    Syntax(String),

    /// The script source was not valid UTF-8.
    #[error("script source is not valid UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// The script source could not be read.
    #[error("failed to read script source")]
    Io(#[from] io::Error),

    /// A failure reported by a custom [`ScriptMinifier`](crate::ScriptMinifier).
    #[error("script minifier failed: {0}")]
    Other(String),
}

impl ScriptError {
    /// Wrap a message from a custom minifier.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
