/// Tests for the lambda-body lexer.
///
/// Each test verifies that specific source text tokenises to the expected
/// sequence of token kinds. The trailing Eof is filtered out.
use kestrel::lexer::{is_identifier, Lexer, TokenKind};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn lex(src: &str) -> Vec<TokenKind> {
    Lexer::new(src)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| *k != TokenKind::Eof)
        .collect()
}

fn lex_err(src: &str) -> bool {
    Lexer::new(src).tokenize().is_err()
}

fn ident(s: &str) -> TokenKind {
    TokenKind::Ident(s.to_string())
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

#[test]
fn int_literal() {
    assert_eq!(lex("42"), vec![TokenKind::Int(42)]);
}

#[test]
fn float_literal() {
    assert_eq!(lex("3.25"), vec![TokenKind::Float(3.25)]);
}

#[test]
fn int_then_member_access_is_not_a_float() {
    assert_eq!(
        lex("5 .toFixed"),
        vec![TokenKind::Int(5), TokenKind::Dot, ident("toFixed")]
    );
}

#[test]
fn single_quoted_string() {
    assert_eq!(lex("' World'"), vec![TokenKind::Str(" World".to_string())]);
}

#[test]
fn double_quoted_string_with_escapes() {
    assert_eq!(
        lex(r#""a\"b\n""#),
        vec![TokenKind::Str("a\"b\n".to_string())]
    );
}

#[test]
fn quoted_underscore_is_a_string() {
    assert_eq!(lex("'_'"), vec![TokenKind::Str("_".to_string())]);
}

#[test]
fn keywords() {
    assert_eq!(
        lex("true false null undefined"),
        vec![
            TokenKind::Bool(true),
            TokenKind::Bool(false),
            TokenKind::Null,
            TokenKind::Undefined,
        ]
    );
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[test]
fn underscore_and_dollar_identifiers() {
    assert_eq!(lex("_ $0 _x"), vec![ident("_"), ident("$0"), ident("_x")]);
}

#[test]
fn is_identifier_accepts_and_rejects() {
    assert!(is_identifier("str"));
    assert!(is_identifier("_"));
    assert!(is_identifier("$x1"));
    assert!(!is_identifier("1x"));
    assert!(!is_identifier("a b"));
    assert!(!is_identifier(""));
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

#[test]
fn arrow() {
    assert_eq!(
        lex("x -> x"),
        vec![ident("x"), TokenKind::Arrow, ident("x")]
    );
}

#[test]
fn equality_family() {
    assert_eq!(
        lex("== != === !=="),
        vec![
            TokenKind::Eq,
            TokenKind::Neq,
            TokenKind::StrictEq,
            TokenKind::StrictNeq,
        ]
    );
}

#[test]
fn comparison_and_logic() {
    assert_eq!(
        lex("< <= > >= && || !"),
        vec![
            TokenKind::Lt,
            TokenKind::Lte,
            TokenKind::Gt,
            TokenKind::Gte,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Bang,
        ]
    );
}

#[test]
fn method_call_shape() {
    assert_eq!(
        lex(".toUpperCase()"),
        vec![
            TokenKind::Dot,
            ident("toUpperCase"),
            TokenKind::LParen,
            TokenKind::RParen,
        ]
    );
}

#[test]
fn binary_operator_classification() {
    assert!(TokenKind::Plus.is_binary_operator());
    assert!(TokenKind::Gte.is_binary_operator());
    assert!(!TokenKind::Bang.is_binary_operator());
    assert!(!TokenKind::Dot.is_binary_operator());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn unterminated_string() {
    assert!(lex_err("'abc"));
}

#[test]
fn assignment_is_rejected() {
    assert!(lex_err("x = 1"));
}

#[test]
fn unknown_character() {
    assert!(lex_err("x # y"));
}

#[test]
fn error_reports_position() {
    let err = Lexer::new("a + #").tokenize().unwrap_err().to_string();
    assert!(err.contains("[1:6]"), "unexpected message: {}", err);
}
