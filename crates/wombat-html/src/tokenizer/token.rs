use core::fmt;

use crate::serializer;

/// An attribute on a start tag token.
///
/// Names keep their source case and values are kept exactly as written
/// (character references are not decoded), so a token stream renders back to
/// equivalent markup. Names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written in the source.
    pub name: String,
    /// Raw attribute value, without its surrounding quotes. Empty for a
    /// valueless attribute such as `disabled`.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }

    /// Returns true if this attribute's name matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// How a comment was written in the source.
///
/// Only [`CommentKind::Standard`] is a real comment. The others are markup
/// the tokenizer cannot otherwise classify; their kind is kept so they
/// render back exactly as written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentKind {
    /// `<!--data-->`
    #[default]
    Standard,
    /// `<!data>`, such as the downlevel-revealed `<![if !IE]>`.
    Declaration,
    /// `<data>` where the data starts with `?`, such as `<?xml ...?>`.
    ProcessingInstruction,
    /// `</data>` where the data does not start with a letter.
    InvalidEndTag,
}

/// One classified unit of markup.
///
/// Every variant carries the byte offset of its first character in the
/// source document. Minification never rewrites a position; tokens inserted
/// by the minifier borrow the position of the token that caused them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of character data between tags.
    Text {
        /// Byte offset in the source.
        position: usize,
        /// Literal text, character references left as written.
        data: String,
    },

    /// `<!--data-->`, or a bogus comment such as `<?xml ...?>`.
    Comment {
        /// Byte offset in the source.
        position: usize,
        /// Everything between the opening delimiter of its [`CommentKind`]
        /// and the closing one.
        data: String,
        /// The delimiters the comment was written with.
        kind: CommentKind,
    },

    /// A start tag with its attributes.
    StartTag {
        /// Byte offset of the `<`.
        position: usize,
        /// Tag name as written in the source.
        name: String,
        /// Set when the tag ends in `/>`.
        self_closing: bool,
        /// Attributes in source order.
        attributes: Vec<Attribute>,
    },

    /// An end tag. Attributes on end tags are a parse error and are dropped.
    EndTag {
        /// Byte offset of the `<`.
        position: usize,
        /// Tag name as written in the source.
        name: String,
    },

    /// `<!DOCTYPE ...>`. Passed through minification unmodified.
    Doctype {
        /// Byte offset of the `<`.
        position: usize,
        /// Everything between `<!` and `>`.
        data: String,
    },
}

impl Token {
    /// Create a text token.
    #[must_use]
    pub fn text(position: usize, data: impl Into<String>) -> Self {
        Self::Text {
            position,
            data: data.into(),
        }
    }

    /// Create a `<!--data-->` comment token.
    #[must_use]
    pub fn comment(position: usize, data: impl Into<String>) -> Self {
        Self::comment_of_kind(position, CommentKind::Standard, data)
    }

    /// Create a comment token written with the delimiters of `kind`.
    #[must_use]
    pub fn comment_of_kind(position: usize, kind: CommentKind, data: impl Into<String>) -> Self {
        Self::Comment {
            position,
            data: data.into(),
            kind,
        }
    }

    /// Create a start tag token without attributes.
    #[must_use]
    pub fn start_tag(position: usize, name: impl Into<String>) -> Self {
        Self::StartTag {
            position,
            name: name.into(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// Create an end tag token.
    #[must_use]
    pub fn end_tag(position: usize, name: impl Into<String>) -> Self {
        Self::EndTag {
            position,
            name: name.into(),
        }
    }

    /// Builder helper: append an attribute to a start tag. Other variants are
    /// returned unchanged.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        if let Self::StartTag { attributes, .. } = &mut self {
            attributes.push(Attribute::new(name.to_string(), value.to_string()));
        }
        self
    }

    /// Byte offset of this token in the source document.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Text { position, .. }
            | Self::Comment { position, .. }
            | Self::StartTag { position, .. }
            | Self::EndTag { position, .. }
            | Self::Doctype { position, .. } => *position,
        }
    }

    /// The tag name for start and end tags.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns true if this is an end tag whose name matches `name`,
    /// ignoring ASCII case.
    #[must_use]
    pub fn is_end_tag_named(&self, name: &str) -> bool {
        matches!(self, Self::EndTag { name: n, .. } if n.eq_ignore_ascii_case(name))
    }
}

/// Mutation helpers for use during tokenization. Attribute and self-closing
/// helpers are no-ops on end tags: attributes on an end tag are a parse error
/// and are dropped.
impl Token {
    pub(crate) fn append_to_tag_name(&mut self, c: char) {
        if let Self::StartTag { name, .. } | Self::EndTag { name, .. } = self {
            name.push(c);
        }
    }

    pub(crate) fn start_new_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } = self {
            attributes.push(Attribute::new(String::new(), String::new()));
        }
    }

    pub(crate) fn append_to_current_attribute_name(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } = self {
            if let Some(attribute) = attributes.last_mut() {
                attribute.name.push(c);
            }
        }
    }

    pub(crate) fn append_to_current_attribute_value(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } = self {
            if let Some(attribute) = attributes.last_mut() {
                attribute.value.push(c);
            }
        }
    }

    pub(crate) const fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serializer::write_token_fmt(self, f)
    }
}
