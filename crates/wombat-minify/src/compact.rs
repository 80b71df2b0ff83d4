//! Whitespace compaction.
//!
//! Whether a run of whitespace can be dropped depends on what came before it
//! and what comes after it, and those are usually in different tokens. The
//! engine therefore never looks ahead: it carries a [`MinifyState`] from one
//! token to the next and, when a token ends in whitespace, owes the output a
//! single space that the next token either claims or discards.

use std::borrow::Cow;

use strum_macros::Display;
use wombat_html::is_html_whitespace;

/// What the output most recently ended with, as far as whitespace goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum MinifyState {
    /// The output ended in non-whitespace content and nothing is owed.
    Compressed,
    /// The output ended at a point where a space would be redundant: the
    /// start of the document, a space already written, or a block boundary.
    #[default]
    LastCharWasSpace,
    /// The previous text ended in whitespace that was held back. One space is
    /// owed unless the next token makes it redundant.
    SpaceNeeded,
}

/// How a markup token affects an owed space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The end tag of a block-level element. Whitespace before it never
    /// renders.
    BlockEnd,
    /// A tag whose element keeps the whitespace around it significant, such
    /// as `img` or `code`.
    PreserveSurroundingSpace,
    /// Any other tag, or a kept comment.
    Other,
}

/// The output produced for one text token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompactedText<'a> {
    /// Emit a lone `" "` before `text`: the space owed by the previous token.
    pub leading_space: bool,
    /// The compacted value, if anything is left of it.
    pub text: Option<Cow<'a, str>>,
}

impl MinifyState {
    /// Compact one text token outside any whitespace-preserving region and
    /// advance the state past it.
    ///
    /// Leading and trailing whitespace is cut. A trailing run becomes an
    /// owed space. A leading run is kept as a single space only when the
    /// output does not already end in whitespace.
    pub fn compact_text<'a>(&mut self, value: &'a str) -> CompactedText<'a> {
        let mut out = CompactedText::default();

        let without_leading = value.trim_start_matches(is_html_whitespace);
        if without_leading.is_empty() {
            if !value.is_empty() && *self == Self::Compressed {
                *self = Self::SpaceNeeded;
            }
            return out;
        }
        let start = value.len() - without_leading.len();
        let end = value.trim_end_matches(is_html_whitespace).len();

        if *self == Self::SpaceNeeded && start == 0 {
            out.leading_space = true;
            *self = Self::LastCharWasSpace;
        }
        // Whitespace characters are all one byte, so `start - 1` is the last
        // leading whitespace character.
        let from = if *self == Self::LastCharWasSpace || start == 0 {
            start
        } else {
            start - 1
        };
        out.text = Some(compress_whitespace(&value[from..end]));

        *self = if end < value.len() {
            Self::SpaceNeeded
        } else {
            Self::Compressed
        };
        out
    }

    /// Settle an owed space at a tag or kept comment. Returns true if a
    /// `" "` must be written before the markup.
    pub const fn resolve_at(&mut self, boundary: Boundary) -> bool {
        if !matches!(self, Self::SpaceNeeded) {
            return false;
        }
        match boundary {
            Boundary::BlockEnd => {
                *self = Self::LastCharWasSpace;
                false
            }
            Boundary::PreserveSurroundingSpace => {
                *self = Self::Compressed;
                true
            }
            Boundary::Other => {
                *self = Self::LastCharWasSpace;
                true
            }
        }
    }
}

/// Collapse every run of whitespace in `value` to a single `' '`.
///
/// Returns the input unchanged, without allocating, when it has no run to
/// rewrite.
///
/// ```
/// use wombat_minify::compact::compress_whitespace;
///
/// assert_eq!(compress_whitespace("a \t\n b"), "a b");
/// assert_eq!(compress_whitespace("already tight"), "already tight");
/// ```
#[must_use]
pub fn compress_whitespace(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    let Some(first) = (0..bytes.len()).find(|&i| needs_rewrite(bytes, i)) else {
        return Cow::Borrowed(value);
    };

    let mut out = String::with_capacity(value.len());
    out.push_str(&value[..first]);
    let mut in_run = false;
    for c in value[first..].chars() {
        if is_html_whitespace(c) {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    Cow::Owned(out)
}

/// Is the byte at `i` whitespace that would not survive compression as is:
/// anything but a space, or a space followed by more whitespace?
fn needs_rewrite(bytes: &[u8], i: usize) -> bool {
    let c = char::from(bytes[i]);
    if !is_html_whitespace(c) {
        return false;
    }
    c != ' '
        || bytes
            .get(i + 1)
            .is_some_and(|&next| is_html_whitespace(char::from(next)))
}

/// Strip leading and trailing HTML whitespace.
#[must_use]
pub fn trim_html_whitespace(value: &str) -> &str {
    value.trim_matches(is_html_whitespace)
}
