//! Tag classification used by the minifier.
//!
//! Three sets of element names decide how whitespace is treated around and
//! inside elements. The defaults follow the HTML rendering model; a JSON file
//! can replace any of them:
//!
//! ```json
//! { "preserve_whitespace_elements": ["pre", "textarea", "code"] }
//! ```
//!
//! Fields left out of the JSON keep their defaults.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Elements whose boundaries end a line box, so whitespace next to their
/// end tags never renders.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "caption",
    "center",
    "col",
    "colgroup",
    "dd",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "frameset",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "header",
    "hgroup",
    "hr",
    "html",
    "legend",
    "li",
    "link",
    "main",
    "menu",
    "meta",
    "nav",
    "noscript",
    "ol",
    "optgroup",
    "option",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "title",
    "tr",
    "ul",
];

/// Elements whose text content must be kept byte for byte.
const PRESERVE_WHITESPACE_ELEMENTS: &[&str] =
    &["listing", "plaintext", "pre", "style", "textarea", "xmp"];

/// Inline replaced elements and code-like inline elements. A space before
/// one of these is kept, and the element itself counts as content.
const PRESERVE_SURROUNDING_SPACE_ELEMENTS: &[&str] = &[
    "audio", "button", "canvas", "code", "embed", "iframe", "img", "input", "kbd", "label",
    "object", "samp", "select", "svg", "textarea", "tt", "var", "video",
];

/// Error loading a [`MinifyConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the config shape.
    #[error("invalid minifier config: {0}")]
    Json(#[from] serde_json::Error),
}

/// A set of element names.
///
/// Names are lowercased on the way in, however the set is built, and looked
/// up ASCII case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeSet<String>", into = "BTreeSet<String>")]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Add `name`. Returns false if it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        self.0.insert(name.to_ascii_lowercase())
    }

    /// Is `name` in the set, ignoring ASCII case?
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.0.contains(&name.to_ascii_lowercase())
        } else {
            self.0.contains(name)
        }
    }

    /// Number of names in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<T: IntoIterator<Item = S>>(names: T) -> Self {
        Self(
            names
                .into_iter()
                .map(|name| name.as_ref().to_ascii_lowercase())
                .collect(),
        )
    }
}

impl From<BTreeSet<String>> for TagSet {
    fn from(names: BTreeSet<String>) -> Self {
        names.iter().collect()
    }
}

impl From<TagSet> for BTreeSet<String> {
    fn from(names: TagSet) -> Self {
        names.0
    }
}

/// Tag classification sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    /// Elements whose end tag swallows an owed space.
    pub block_elements: TagSet,
    /// Elements whose text passes through unchanged.
    pub preserve_whitespace_elements: TagSet,
    /// Elements that keep an owed space in front of them.
    pub preserve_surrounding_space_elements: TagSet,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            block_elements: BLOCK_ELEMENTS.iter().collect(),
            preserve_whitespace_elements: PRESERVE_WHITESPACE_ELEMENTS.iter().collect(),
            preserve_surrounding_space_elements: PRESERVE_SURROUNDING_SPACE_ELEMENTS
                .iter()
                .collect(),
        }
    }
}

impl MinifyConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the config as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Is `name` a block-level element?
    #[must_use]
    pub fn is_block(&self, name: &str) -> bool {
        self.block_elements.contains(name)
    }

    /// Does `name` keep its text content unchanged?
    #[must_use]
    pub fn preserves_whitespace(&self, name: &str) -> bool {
        self.preserve_whitespace_elements.contains(name)
    }

    /// Does `name` keep an owed space in front of it?
    #[must_use]
    pub fn preserves_surrounding_space(&self, name: &str) -> bool {
        self.preserve_surrounding_space_elements.contains(name)
    }
}
