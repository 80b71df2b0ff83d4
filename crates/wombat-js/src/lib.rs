//! Script minification for the Wombat minifier.
//!
//! The HTML minifier never parses script. It collects the text of each
//! `<script>` element and hands it, as one readable stream, to a
//! [`ScriptMinifier`]. This crate provides the trait and two
//! implementations:
//!
//! - [`JsMinifier`] - parses the script and prints it back without comments
//!   or insignificant whitespace
//! - [`PassthroughScripts`] - returns script text unchanged
//!
//! Any `Fn(&mut dyn Read) -> Result<String, ScriptError>` is also a
//! [`ScriptMinifier`], which is how callers plug in an external tool.
//!
//! # Example
//!
//! ```
//! use wombat_js::{JsMinifier, ScriptMinifier};
//!
//! let out = JsMinifier.minify(&mut "var a = 1; // one".as_bytes()).unwrap();
//! assert!(out.starts_with("var a=1"));
//! assert!(!out.contains("one"));
//! ```

mod error;
mod minify;

pub use error::ScriptError;
pub use minify::JsMinifier;

use std::io::Read;

/// Minifies the text of one script element.
pub trait ScriptMinifier {
    /// Read the whole script from `source` and return its minified form.
    ///
    /// # Errors
    ///
    /// Returns a [`ScriptError`] if the source cannot be read or is not
    /// well-formed enough to minify safely. The HTML minifier propagates the
    /// error rather than emitting a broken script.
    fn minify(&self, source: &mut dyn Read) -> Result<String, ScriptError>;
}

impl<F> ScriptMinifier for F
where
    F: Fn(&mut dyn Read) -> Result<String, ScriptError>,
{
    fn minify(&self, source: &mut dyn Read) -> Result<String, ScriptError> {
        self(source)
    }
}

/// A [`ScriptMinifier`] that returns script text exactly as it was written.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughScripts;

impl ScriptMinifier for PassthroughScripts {
    fn minify(&self, source: &mut dyn Read) -> Result<String, ScriptError> {
        let mut script = String::new();
        let _ = source.read_to_string(&mut script)?;
        Ok(script)
    }
}
