use pretty_assertions::assert_eq;

use super::*;
use crate::tests::tokenize;
use ctruct_ir::Name;

#[test]
fn test_token_set_membership_ignores_payload() {
    let set = TokenSet::EMPTY
        .with_ident()
        .with_punct(Punct::Semi)
        .with_keyword(Keyword::Int);
    assert!(set.contains(&TokenKind::Ident(Name::from_raw(7))));
    assert!(set.contains(&TokenKind::Punct(Punct::Semi)));
    assert!(set.contains(&TokenKind::Keyword(Keyword::Int)));
    assert!(!set.contains(&TokenKind::Punct(Punct::Comma)));
    assert!(!set.contains(&TokenKind::Number(Name::EMPTY)));
    assert!(!set.contains(&TokenKind::Eof));
}

#[test]
fn test_union() {
    let a = TokenSet::EMPTY.with_punct(Punct::Comma);
    let b = TokenSet::EMPTY.with_literals();
    let both = a.union(b);
    assert!(both.contains(&TokenKind::Punct(Punct::Comma)));
    assert!(both.contains(&TokenKind::Str(Name::EMPTY)));
    assert!(TokenSet::EMPTY.is_empty());
    assert!(!both.is_empty());
}

#[test]
fn test_format_expected() {
    assert_eq!(TokenSet::EMPTY.format_expected(), "nothing");
    assert_eq!(TokenSet::EMPTY.with_punct(Punct::Semi).format_expected(), "`;`");
    assert_eq!(
        TokenSet::EMPTY
            .with_punct(Punct::Semi)
            .with_ident()
            .format_expected(),
        "identifier or `;`"
    );
    assert_eq!(
        TokenSet::EMPTY
            .with_keyword(Keyword::Class)
            .with_punct(Punct::Eq)
            .with_punct(Punct::Comma)
            .format_expected(),
        "`,`, `=`, or `class`"
    );
}

#[test]
fn test_declaration_start_set() {
    assert!(DECL_START.contains(&TokenKind::Keyword(Keyword::Template)));
    assert!(DECL_START.contains(&TokenKind::Keyword(Keyword::Unsigned)));
    assert!(!DECL_START.contains(&TokenKind::Keyword(Keyword::Return)));
    assert!(!DECL_START.contains(&TokenKind::Ident(Name::EMPTY)));
}

#[test]
fn test_skip_to_semicolon() {
    let tokens = tokenize("a b ; c");
    let mut cursor = Cursor::new(&tokens);
    assert_eq!(skip_declaration(&mut cursor, 0, false), 3);
    assert!(cursor.check_ident());
}

#[test]
fn test_skip_balanced_braces() {
    let tokens = tokenize("f { a; { b; } } c");
    let mut cursor = Cursor::new(&tokens);
    skip_declaration(&mut cursor, 0, false);
    assert_eq!(cursor.text(&cursor.current_kind()), "c");
}

#[test]
fn test_skip_resumes_open_braces() {
    let tokens = tokenize("{ x ; } y");
    let mut cursor = Cursor::new(&tokens);
    cursor.advance();
    let depth = unclosed_braces(&cursor, 0, cursor.position());
    assert_eq!(depth, 1);
    skip_declaration(&mut cursor, depth, false);
    assert_eq!(cursor.text(&cursor.current_kind()), "y");
}

#[test]
fn test_closing_brace_of_enclosing_body() {
    let tokens = tokenize("x } y");
    let mut nested = Cursor::new(&tokens);
    skip_declaration(&mut nested, 0, true);
    assert!(nested.check_punct(Punct::RBrace));

    let mut top = Cursor::new(&tokens);
    skip_declaration(&mut top, 0, false);
    assert!(top.check_ident());
}

#[test]
fn test_skip_stops_at_eof() {
    let tokens = tokenize("a { b");
    let mut cursor = Cursor::new(&tokens);
    assert_eq!(skip_declaration(&mut cursor, 0, false), 3);
    assert!(cursor.is_at_end());
}
