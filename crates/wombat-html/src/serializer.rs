//! Renders tokens back to markup.
//!
//! The tokenizer keeps text and attribute values exactly as written, so the
//! serializer never escapes character data. The only rewriting it does is
//! choosing attribute quotes: double quotes by default, single quotes when
//! the value contains `"` but not `'`, and `&quot;` when it contains both.

use core::fmt;
use std::io;

use crate::tokenizer::{Attribute, CommentKind, Token};

/// Render a sequence of tokens into a string.
#[must_use]
pub fn serialize<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    let mut out = String::new();
    for token in tokens {
        // Writing into a String cannot fail.
        let _ = write_token_fmt(token, &mut out);
    }
    out
}

/// Write one token to a byte sink.
///
/// # Errors
///
/// Returns any error produced by the underlying writer.
pub fn write_token<W: io::Write + ?Sized>(token: &Token, out: &mut W) -> io::Result<()> {
    write!(out, "{token}")
}

/// Write one token to a formatter or string.
///
/// # Errors
///
/// Returns any error produced by the underlying writer.
pub fn write_token_fmt<W: fmt::Write + ?Sized>(token: &Token, out: &mut W) -> fmt::Result {
    match token {
        Token::Text { data, .. } => out.write_str(data),
        Token::Comment { data, kind, .. } => match kind {
            CommentKind::Standard => write!(out, "<!--{data}-->"),
            CommentKind::Declaration => write!(out, "<!{data}>"),
            CommentKind::ProcessingInstruction => write!(out, "<{data}>"),
            CommentKind::InvalidEndTag => write!(out, "</{data}>"),
        },
        Token::Doctype { data, .. } => write!(out, "<!{data}>"),
        Token::StartTag {
            name,
            self_closing,
            attributes,
            ..
        } => {
            write!(out, "<{name}")?;
            for attribute in attributes {
                write_attribute(attribute, out)?;
            }
            if *self_closing {
                out.write_char('/')?;
            }
            out.write_char('>')
        }
        Token::EndTag { name, .. } => write!(out, "</{name}>"),
    }
}

fn write_attribute<W: fmt::Write + ?Sized>(attribute: &Attribute, out: &mut W) -> fmt::Result {
    let Attribute { name, value } = attribute;
    if value.is_empty() {
        return write!(out, " {name}");
    }
    match (value.contains('"'), value.contains('\'')) {
        (false, _) => write!(out, " {name}=\"{value}\""),
        (true, false) => write!(out, " {name}='{value}'"),
        (true, true) => write!(out, " {name}=\"{}\"", value.replace('"', "&quot;")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(value: &str) -> String {
        let mut out = String::new();
        write_attribute(&Attribute::new("title".to_string(), value.to_string()), &mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_attribute_quoting() {
        assert_eq!(attr("plain"), " title=\"plain\"");
        assert_eq!(attr("say \"hi\""), " title='say \"hi\"'");
        assert_eq!(attr("it's \"x\""), " title=\"it's &quot;x&quot;\"");
        assert_eq!(attr(""), " title");
    }
}
