//! JavaScript minification on top of the `oxc` parser and code generator.
//!
//! The script is parsed into a syntax tree and printed back in minified
//! form. Because the printer works from the tree, string, template and
//! regular expression literals keep their meaning wherever they appear,
//! including after keywords such as `return` or `typeof`. Names are not
//! mangled and no code is removed.

use std::io::Read;

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::{ScriptError, ScriptMinifier};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Minifies classic (non-module) scripts.
///
/// Comments and insignificant whitespace are dropped. A script that does not
/// parse is rejected with [`ScriptError::Syntax`] instead of being passed
/// through half-minified.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsMinifier;

impl ScriptMinifier for JsMinifier {
    fn minify(&self, source: &mut dyn Read) -> Result<String, ScriptError> {
        let mut bytes = Vec::new();
        let _ = source.read_to_end(&mut bytes)?;
        let script = String::from_utf8(bytes)?;
        minify_source(&script)
    }
}

fn minify_source(script: &str) -> Result<String, ScriptError> {
    let script = script.strip_prefix(BYTE_ORDER_MARK).unwrap_or(script);

    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, script, SourceType::cjs()).parse();
    if let Some(error) = parsed.errors.into_iter().next() {
        return Err(ScriptError::Syntax(error.to_string()));
    }
    if parsed.panicked {
        return Err(ScriptError::Syntax("parser gave up".to_string()));
    }

    let code = Codegen::new()
        .with_options(CodegenOptions::minify())
        .build(&parsed.program)
        .code;
    Ok(code.trim_matches(['\n', ' ']).to_string())
}
