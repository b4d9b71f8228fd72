use pretty_assertions::assert_eq;

use super::*;
use ctruct_ir::{Keyword, Name, Punct};

fn token(kind: TokenKind) -> Token {
    Token::new(kind, Span::new(4, 5), Position::new(2, 3, 4))
}

#[test]
fn test_unexpected_token_message() {
    let error = ParseError::unexpected(
        token(TokenKind::Keyword(Keyword::Int)),
        "`int`".to_string(),
        TokenSet::EMPTY.with_punct(Punct::Semi),
        None,
    );
    assert_eq!(error.kind, SyntaxErrorKind::UnexpectedToken);
    assert_eq!(error.message, "expected `;`, found `int`");
    assert_eq!(error.to_string(), "2:3: expected `;`, found `int`");
    assert_eq!(error.span, Span::new(4, 5));
}

#[test]
fn test_expected_item_combines_with_tokens() {
    let error = ParseError::unexpected(
        token(TokenKind::Punct(Punct::Semi)),
        "`;`".to_string(),
        TokenSet::EMPTY.with_punct(Punct::LParen),
        Some("expression"),
    );
    assert_eq!(error.message, "expected expression or `(`, found `;`");

    let error = ParseError::unexpected(
        token(TokenKind::Punct(Punct::Semi)),
        "`;`".to_string(),
        TokenSet::EMPTY,
        Some("declarator"),
    );
    assert_eq!(error.message, "expected declarator, found `;`");
}

#[test]
fn test_eof_is_end_of_input() {
    let error = ParseError::unexpected(
        token(TokenKind::Eof),
        "end of input".to_string(),
        TokenSet::EMPTY.with_punct(Punct::RBrace),
        None,
    );
    assert!(error.is_end_of_input());
    assert_eq!(error.kind.to_string(), "unexpected end of input");
}

#[test]
fn test_innermost_context_wins() {
    let error = ParseError::unexpected(
        token(TokenKind::Ident(Name::EMPTY)),
        "identifier `x`".to_string(),
        TokenSet::EMPTY.with_punct(Punct::RParen),
        None,
    )
    .in_context("parameter list")
    .in_context("declaration");
    assert_eq!(error.context, Some("parameter list"));
    assert_eq!(
        error.message,
        "expected `)`, found identifier `x` (while parsing parameter list)"
    );
}

#[test]
fn test_ambiguous_declaration() {
    let error = ParseError::ambiguous_declaration(
        token(TokenKind::Punct(Punct::Semi)),
        "`;`".to_string(),
        Span::new(0, 1),
    );
    assert_eq!(error.kind, SyntaxErrorKind::AmbiguousDeclaration);
    assert_eq!(error.span, Span::new(0, 1));
    assert!(!error.is_end_of_input());
}
