//! Integration tests for the script minifiers.

use std::cell::Cell;
use std::io::Read;

use wombat_js::{JsMinifier, PassthroughScripts, ScriptError, ScriptMinifier};

fn minify_js(source: &str) -> Result<String, ScriptError> {
    JsMinifier.minify(&mut source.as_bytes())
}

fn min(source: &str) -> String {
    minify_js(source).unwrap()
}

// =============================================================================
// Whitespace and comments
// =============================================================================

#[test]
fn test_statements_lose_spaces_and_line_breaks() {
    let out = min("var a = 1;\n\nvar b = 2;\n");
    assert!(out.starts_with("var a=1;var b=2"), "got {out:?}");
    assert!(!out.contains('\n'));
}

#[test]
fn test_comments_are_removed() {
    let out = min("// lead\nfunction f(x) {\n  /* body */\n  return x + 1;\n}\n");
    assert!(out.starts_with("function f(x){return x+1"), "got {out:?}");
    assert!(!out.contains("lead"));
    assert!(!out.contains("body"));
}

#[test]
fn test_operator_pairs_keep_their_space() {
    let out = min("x = a + ++b; y = a - -b;");
    assert!(!out.contains("+++"), "got {out:?}");
    assert!(!out.contains("---"), "got {out:?}");
}

#[test]
fn test_output_is_stable() {
    let source = "function greet(name) {\n  // say hi\n  if (!name) { return 'anon'; }\n  \
                  return `hi ${ name }`.split(/\\s+/).join(' ');\n}\nvar n = greet('x') / 2;\n";
    let once = min(source);
    assert_eq!(min(&once), once);
    assert!(once.len() < source.len());
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_string_contents_are_untouched() {
    let out = min(r#"var s = 'a  //  b'; var t = "x /* y */";"#);
    assert!(out.contains("a  //  b"), "got {out:?}");
    assert!(out.contains("x /* y */"), "got {out:?}");
}

#[test]
fn test_template_literals_are_untouched() {
    let out = min("var t = `a  ${ b }  c`;");
    assert!(out.contains("`a  ${b}  c`"), "got {out:?}");
}

#[test]
fn test_regex_literals_are_untouched() {
    let out = min("var r = /a  b[/]c/g.test(s);");
    assert!(out.contains("/a  b[/]c/g"), "got {out:?}");
}

#[test]
fn test_regex_after_return() {
    let out = min("function f(s) { return /a  b/.test(s) }");
    assert!(out.contains("/a  b/.test(s)"), "got {out:?}");

    let out = min("function f(s) { return /'/.test(s) }");
    assert!(out.contains("/'/.test(s)"), "got {out:?}");
}

#[test]
fn test_regex_after_typeof_and_case() {
    let out = min("var t = typeof /x  y/;");
    assert!(out.contains("/x  y/"), "got {out:?}");

    let out = min("switch (s) { case /\"  x/.source: break; }");
    assert!(out.contains("/\"  x/"), "got {out:?}");
}

#[test]
fn test_division_is_not_a_regex() {
    let out = min("a = b / c / d;");
    assert!(out.starts_with("a=b/c/d"), "got {out:?}");
}

#[test]
fn test_non_ascii_identifiers_and_strings() {
    let out = min("var é = \"ü\";");
    assert!(out.contains('é'));
    assert!(out.contains('ü'));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_invalid_scripts_are_rejected() {
    for source in ["var a = 'oops", "/* never closed", "var r = /abc", "if (a {"] {
        assert!(
            matches!(minify_js(source), Err(ScriptError::Syntax(_))),
            "{source:?} was accepted"
        );
    }
}

#[test]
fn test_syntax_error_message() {
    let err = minify_js("var = ;").unwrap_err();
    assert!(err.to_string().starts_with("script is not valid JavaScript: "));
}

// =============================================================================
// Other minifiers
// =============================================================================

#[test]
fn test_passthrough_returns_script_unchanged() {
    let source = "  var a = 1; // keep\n";
    let out = PassthroughScripts.minify(&mut source.as_bytes()).unwrap();
    assert_eq!(out, source);
}

#[test]
fn test_closure_is_a_script_minifier() {
    let calls = Cell::new(0);
    let upper = |source: &mut dyn Read| -> Result<String, ScriptError> {
        calls.set(calls.get() + 1);
        let mut script = String::new();
        let _ = source.read_to_string(&mut script)?;
        Ok(script.to_uppercase())
    };
    assert_eq!(upper.minify(&mut "abc".as_bytes()).unwrap(), "ABC");
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_closure_errors_propagate() {
    let failing = |_: &mut dyn Read| -> Result<String, ScriptError> {
        Err(ScriptError::other("external tool exited with status 2"))
    };
    let err = failing.minify(&mut "x".as_bytes()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "script minifier failed: external tool exited with status 2"
    );
}
