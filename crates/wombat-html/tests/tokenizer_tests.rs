//! Integration tests for the HTML tokenizer.

use wombat_html::{
    Attribute, CommentKind, HTMLTokenizer, Token, TokenizerState, serialize, tokenize,
};

#[test]
fn test_plain_text_is_one_token() {
    let tokens = tokenize("Hello, world");
    assert_eq!(tokens, vec![Token::text(0, "Hello, world")]);
}

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(
        tokens,
        vec![Token::Doctype {
            position: 0,
            data: "DOCTYPE html".to_string(),
        }]
    );
}

#[test]
fn test_lowercase_doctype() {
    let tokens = tokenize("<!doctype html>x");
    assert!(matches!(&tokens[0], Token::Doctype { data, .. } if data == "doctype html"));
    assert_eq!(tokens[1], Token::text(15, "x"));
}

#[test]
fn test_start_and_end_tag_positions() {
    let tokens = tokenize("<div>hi</div>");
    assert_eq!(
        tokens,
        vec![
            Token::start_tag(0, "div"),
            Token::text(5, "hi"),
            Token::end_tag(7, "div"),
        ]
    );
}

#[test]
fn test_tag_name_case_is_preserved() {
    let tokens = tokenize("<DIV></Div>");
    assert_eq!(tokens[0].tag_name(), Some("DIV"));
    assert_eq!(tokens[1].tag_name(), Some("Div"));
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        other => panic!("Expected self-closing StartTag token, got {other:?}"),
    }
}

#[test]
fn test_attributes_keep_raw_values_and_order() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2" title='x' data-n=3 hidden class="b">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(
                attributes,
                &vec![
                    Attribute::new("href".to_string(), "?a=1&amp;b=2".to_string()),
                    Attribute::new("title".to_string(), "x".to_string()),
                    Attribute::new("data-n".to_string(), "3".to_string()),
                    Attribute::new("hidden".to_string(), String::new()),
                    Attribute::new("class".to_string(), "b".to_string()),
                ]
            );
        }
        other => panic!("Expected StartTag token, got {other:?}"),
    }
}

#[test]
fn test_duplicate_attributes_are_kept() {
    let tokens = tokenize(r#"<p class="a" class="b">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => assert_eq!(attributes.len(), 2),
        other => panic!("Expected StartTag token, got {other:?}"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("a<!-- note -->b");
    assert_eq!(
        tokens,
        vec![
            Token::text(0, "a"),
            Token::comment(1, " note "),
            Token::text(14, "b"),
        ]
    );
}

#[test]
fn test_abrupt_empty_comments() {
    assert_eq!(tokenize("<!-->"), vec![Token::comment(0, "")]);
    assert_eq!(tokenize("<!--->"), vec![Token::comment(0, "")]);
}

#[test]
fn test_conditional_comment_is_one_comment() {
    let tokens = tokenize("<!--[if IE]><p>old</p><![endif]-->");
    assert_eq!(
        tokens,
        vec![Token::comment(0, "[if IE]><p>old</p><![endif]")]
    );
}

#[test]
fn test_bogus_comment() {
    let tokens = tokenize("<?xml version=\"1.0\"?>");
    assert_eq!(
        tokens,
        vec![Token::comment_of_kind(
            0,
            CommentKind::ProcessingInstruction,
            "?xml version=\"1.0\"?"
        )]
    );
}

#[test]
fn test_downlevel_revealed_conditional_is_a_declaration() {
    let tokens = tokenize("<![if !IE]><p>x</p><![endif]>");
    assert_eq!(
        tokens,
        vec![
            Token::comment_of_kind(0, CommentKind::Declaration, "[if !IE]"),
            Token::start_tag(11, "p"),
            Token::text(14, "x"),
            Token::end_tag(15, "p"),
            Token::comment_of_kind(19, CommentKind::Declaration, "[endif]"),
        ]
    );
}

#[test]
fn test_less_than_that_is_not_a_tag() {
    let tokens = tokenize("1 < 2 <3");
    assert_eq!(tokens, vec![Token::text(0, "1 < 2 <3")]);
}

#[test]
fn test_empty_end_tag_is_dropped() {
    let tokens = tokenize("a</>b");
    assert_eq!(tokens, vec![Token::text(0, "ab")]);
}

#[test]
fn test_script_content_is_raw_text() {
    let tokens = tokenize("<script>if (a < b && c > d) { x = '</div>'; }</script>");
    assert_eq!(
        tokens,
        vec![
            Token::start_tag(0, "script"),
            Token::text(8, "if (a < b && c > d) { x = '</div>'; }"),
            Token::end_tag(45, "script"),
        ]
    );
}

#[test]
fn test_raw_text_end_tag_is_case_insensitive() {
    let tokens = tokenize("<style>p{}</STYLE >");
    assert_eq!(tokens.len(), 3);
    assert!(tokens[2].is_end_tag_named("style"));
}

#[test]
fn test_raw_text_needs_exact_end_tag_name() {
    let tokens = tokenize("<script>a</scripts>b</script>");
    assert_eq!(tokens[1], Token::text(8, "a</scripts>b"));
}

#[test]
fn test_unclosed_script_keeps_its_text() {
    let tokens = tokenize("<script>var a = 1;");
    assert_eq!(
        tokens,
        vec![Token::start_tag(0, "script"), Token::text(8, "var a = 1;")]
    );
}

#[test]
fn test_unterminated_tag_is_kept_as_text() {
    let tokens = tokenize("ok <a href=\"x");
    assert_eq!(tokens, vec![Token::text(0, "ok <a href=\"x")]);
}

#[test]
fn test_tokenizer_is_lazy() {
    let mut tokenizer = HTMLTokenizer::new("<p>one</p><p>two</p>");
    assert_eq!(tokenizer.next(), Some(Token::start_tag(0, "p")));
    assert_eq!(tokenizer.next(), Some(Token::text(3, "one")));
    assert_eq!(tokenizer.state(), TokenizerState::Data);
    assert_eq!(tokenizer.count(), 4);
}

#[test]
fn test_round_trip_preserves_markup() {
    let html = "<!DOCTYPE html><html><head><title>T &amp; U</title></head>\
                <body class=\"x\"><p>Hi <b>there</b>!</p><br/>\
                <script>let s = \"</p>\";</script></body></html>";
    assert_eq!(serialize(&tokenize(html)), html);
}

#[test]
fn test_round_trip_preserves_bogus_comments() {
    let html = "<?xml version=\"1.0\"?><![if !IE]>x<![endif]><![CDATA[y]]>a</3>b";
    assert_eq!(serialize(&tokenize(html)), html);
}

#[test]
fn test_non_ascii_text_positions() {
    let tokens = tokenize("héllo<b>");
    assert_eq!(tokens[0], Token::text(0, "héllo"));
    assert_eq!(tokens[1].position(), 6);
}
