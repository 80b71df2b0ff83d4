//! Attribute value normalization.
//!
//! Only `style` and `class` are rewritten. Every other attribute value can be
//! significant down to the byte and is copied through.

use std::borrow::Cow;

use wombat_html::{Attribute, is_html_whitespace};

use crate::compact::{compress_whitespace, trim_html_whitespace};

/// Normalize the `style` and `class` values of a start tag in place.
/// Attribute order is unchanged.
pub fn normalize_attributes(attributes: &mut [Attribute]) {
    for attribute in attributes {
        normalize_attribute(attribute);
    }
}

fn normalize_attribute(attribute: &mut Attribute) {
    let normalized = if attribute.is_named("style") {
        Cow::Borrowed(normalize_style(&attribute.value))
    } else if attribute.is_named("class") {
        normalize_class(&attribute.value)
    } else {
        return;
    };
    if normalized != attribute.value.as_str() {
        attribute.value = normalized.into_owned();
    }
}

/// Trim a `style` value and drop trailing declaration separators.
///
/// ```
/// use wombat_minify::attributes::normalize_style;
///
/// assert_eq!(normalize_style(" color:red; ; "), "color:red");
/// ```
#[must_use]
pub fn normalize_style(value: &str) -> &str {
    let mut value = trim_html_whitespace(value);
    while let Some(rest) = value.strip_suffix(';') {
        value = rest.trim_end_matches(is_html_whitespace);
    }
    value
}

/// Trim a `class` value and collapse the whitespace between class names.
///
/// ```
/// use wombat_minify::attributes::normalize_class;
///
/// assert_eq!(normalize_class("  a   b  "), "a b");
/// ```
#[must_use]
pub fn normalize_class(value: &str) -> Cow<'_, str> {
    compress_whitespace(trim_html_whitespace(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute::new(name.to_string(), value.to_string())
    }

    #[test]
    fn test_style_separators() {
        assert_eq!(normalize_style("a:b;"), "a:b");
        assert_eq!(normalize_style("a:b;;\n;"), "a:b");
        assert_eq!(normalize_style("a:b; c:d"), "a:b; c:d");
        assert_eq!(normalize_style(" ; "), "");
    }

    #[test]
    fn test_only_style_and_class_change() {
        let mut attributes = vec![
            attr("title", "  keep   me  "),
            attr("STYLE", "color:red;"),
            attr("Class", " x\ty "),
            attr("data-style", "a;"),
        ];
        normalize_attributes(&mut attributes);
        assert_eq!(
            attributes,
            vec![
                attr("title", "  keep   me  "),
                attr("STYLE", "color:red"),
                attr("Class", "x y"),
                attr("data-style", "a;"),
            ]
        );
    }
}
