#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use ctruct_ir::Position;
use pretty_assertions::assert_eq;

fn lexemes(source: &str) -> Vec<String> {
    let tokens = tokenize(source).unwrap();
    tokens.lexemes().into_iter().map(str::to_owned).collect()
}

#[test]
fn test_simple_declaration() {
    assert_eq!(lexemes("int a = 1;"), ["int", "a", "=", "1", ";", ""]);
}

#[test]
fn test_keywords_and_identifiers() {
    let tokens = tokenize("namespace ns typename x_1").unwrap();
    let kinds = tokens.kinds();
    assert_eq!(kinds[0], TokenKind::Keyword(Keyword::Namespace));
    assert!(kinds[1].is_ident());
    assert_eq!(kinds[2], TokenKind::Keyword(Keyword::Typename));
    assert!(kinds[3].is_ident());
    assert_eq!(kinds[4], TokenKind::Eof);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    let tokens = tokenize("integer classy").unwrap();
    assert!(tokens.kinds()[..2].iter().all(TokenKind::is_ident));
}

#[test]
fn test_maximal_munch() {
    assert_eq!(
        lexemes("a>>=b>>c->d...e::f&&g<<=h"),
        ["a", ">>=", "b", ">>", "c", "->", "d", "...", "e", "::", "f", "&&", "g", "<<=", "h", ""]
    );
}

#[test]
fn test_compound_operators() {
    assert_eq!(
        lexemes("+= -= *= /= %= &= |= ^= ++ -- != == <= >= || ?"),
        ["+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "++", "--", "!=", "==", "<=", ">=", "||", "?", ""]
    );
}

#[test]
fn test_comments_and_directives_are_trivia() {
    let source = "#include <vector>\n// line\nint /* block\n comment */ x;\n  # pragma once\n";
    assert_eq!(lexemes(source), ["int", "x", ";", ""]);
}

#[test]
fn test_directive_continuation_lines() {
    let source = "#define MAX(a, b) \\\n    ((a) > (b) ? (a) : (b))\nint x;";
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens.lexemes(), ["int", "x", ";", ""]);
    assert_eq!(tokens.get(0).unwrap().position.line, 3);
}

#[test]
fn test_directive_after_comment_on_same_line() {
    assert_eq!(lexemes("/* lead */ #pragma once\nint x;"), ["int", "x", ";", ""]);
}

#[test]
fn test_hash_after_token_is_invalid() {
    let err = tokenize("int x; #define Y 1\n").unwrap_err();
    assert_eq!(
        err,
        LexError::InvalidCharacter {
            ch: '#',
            span: Span::new(7, 8),
            position: Position::new(1, 8, 7),
        }
    );
}

#[test]
fn test_encoding_prefixed_literals() {
    let tokens = tokenize(r#"L"wide" u'c' U"utf32" u8"utf8" L'x'"#).unwrap();
    assert_eq!(
        tokens.lexemes(),
        [r#"L"wide""#, "u'c'", r#"U"utf32""#, r#"u8"utf8""#, "L'x'", ""]
    );
    let kinds = tokens.kinds();
    assert!(matches!(kinds[0], TokenKind::Str(_)));
    assert!(matches!(kinds[1], TokenKind::Char(_)));
    assert!(matches!(kinds[2], TokenKind::Str(_)));
    assert!(matches!(kinds[3], TokenKind::Str(_)));
    assert!(matches!(kinds[4], TokenKind::Char(_)));
}

#[test]
fn test_prefix_letters_alone_are_identifiers() {
    let tokens = tokenize("L u8 U u").unwrap();
    assert!(tokens.kinds()[..4].iter().all(TokenKind::is_ident));
}

#[test]
fn test_unterminated_prefixed_string() {
    let err = tokenize("auto s = u8\"abc").unwrap_err();
    assert!(matches!(
        err,
        LexError::UnterminatedLiteral {
            kind: LiteralKind::String,
            ..
        }
    ));
    assert_eq!(err.span().start, 9);
}

#[test]
fn test_literals_keep_quotes_and_escapes() {
    let tokens = tokenize(r#"f("a\"b", '\n', 42)"#).unwrap();
    assert_eq!(
        tokens.lexemes(),
        ["f", "(", r#""a\"b""#, ",", r"'\n'", ",", "42", ")", ""]
    );
    assert!(matches!(tokens.kinds()[2], TokenKind::Str(_)));
    assert!(matches!(tokens.kinds()[4], TokenKind::Char(_)));
    assert!(matches!(tokens.kinds()[6], TokenKind::Number(_)));
}

#[test]
fn test_positions() {
    let tokens = tokenize("int a;\n  long b;").unwrap();
    let long = tokens.get(3).unwrap();
    assert_eq!(long.position, Position::new(2, 3, 9));
    assert_eq!(long.span, Span::new(9, 13));
    let eof = tokens.get(tokens.len() - 1).unwrap();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.span, Span::point(16));
}

#[test]
fn test_empty_source_is_only_eof() {
    let tokens = tokenize("").unwrap();
    assert_eq!(tokens.kinds(), vec![TokenKind::Eof]);
    assert_eq!(tokens.get(0).unwrap().position, Position::new(1, 1, 0));
}

#[test]
fn test_unterminated_string() {
    let err = tokenize("x = \"abc\n\";").unwrap_err();
    assert!(matches!(
        err,
        LexError::UnterminatedLiteral {
            kind: LiteralKind::String,
            ..
        }
    ));
    assert_eq!(err.position().unwrap(), Position::new(1, 5, 4));
}

#[test]
fn test_unterminated_char() {
    let err = tokenize("char c = 'a").unwrap_err();
    assert!(matches!(
        err,
        LexError::UnterminatedLiteral {
            kind: LiteralKind::Char,
            ..
        }
    ));
}

#[test]
fn test_invalid_character() {
    let err = tokenize("int a = 1 @ 2;").unwrap_err();
    assert_eq!(
        err,
        LexError::InvalidCharacter {
            ch: '@',
            span: Span::new(10, 11),
            position: Position::new(1, 11, 10),
        }
    );
    assert_eq!(err.to_string(), "1:11: invalid character '@'");
}

#[test]
fn test_unterminated_block_comment() {
    let err = tokenize("int a; /* never closed").unwrap_err();
    assert!(matches!(err, LexError::UnterminatedComment { .. }));
    assert_eq!(err.span().start, 7);
}

#[test]
fn test_tokenize_is_pure() {
    let source = "template <class T> using V = vector<T>;";
    assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
}

#[test]
fn test_columns_on_long_line() {
    let source = "int a; ".repeat(40_000);
    let tokens = tokenize(&source).unwrap();
    let last = tokens.get(tokens.len() - 2).unwrap();
    let offset = (source.len() - 2) as u32;
    assert_eq!(last.position, Position::new(1, offset + 1, offset));
}
