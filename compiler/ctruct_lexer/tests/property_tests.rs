//! Property-based tests for the tokenizer.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use ctruct_ir::{Keyword, TokenKind};
use ctruct_lexer::tokenize;
use proptest::prelude::*;

fn fragment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[A-Za-z_][A-Za-z0-9_]{0,8}").expect("valid regex"),
        prop::string::string_regex("[0-9]{1,6}").expect("valid regex"),
        prop::sample::select(Keyword::ALL.to_vec()).prop_map(|kw| kw.as_str().to_owned()),
        prop::sample::select(vec![
            "(", ")", "{", "}", "[", "]", ",", ";", "::", ":", "->", "...", ".", "*", "&", "&&",
            "+", "-", "/", "%", "<", "<<", ">", ">>", "<=", ">=", "==", "!=", "^", "|", "||",
            "=", "!", "~", "?",
        ])
        .prop_map(str::to_owned),
        prop::sample::select(vec!["\"text\"", "L\"text\"", "u8\"text\"", "'c'", "U'c'"])
            .prop_map(str::to_owned),
    ]
}

proptest! {
    #[test]
    fn never_panics(source in "\\PC{0,64}") {
        let _ = tokenize(&source);
    }

    #[test]
    fn ends_with_eof_and_positions_increase(
        parts in prop::collection::vec(fragment_strategy(), 0..24)
    ) {
        let source = parts.join(" ");
        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(tokens.len(), parts.len() + 1);
        prop_assert_eq!(tokens.as_slice().last().map(|t| t.kind), Some(TokenKind::Eof));
        for pair in tokens.as_slice().windows(2) {
            prop_assert!(pair[0].span.end <= pair[1].span.start);
            prop_assert!(pair[0].position.offset < pair[1].position.offset || pair[1].kind == TokenKind::Eof);
        }
    }

    #[test]
    fn lexemes_match_fragments(parts in prop::collection::vec(fragment_strategy(), 1..16)) {
        let source = parts.join("\n");
        let tokens = tokenize(&source).unwrap();
        let lexemes = tokens.lexemes();
        prop_assert_eq!(&lexemes[..parts.len()], &parts.iter().map(String::as_str).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn words_classify_as_keyword_or_ident(word in "[A-Za-z_][A-Za-z0-9_]{0,10}") {
        let tokens = tokenize(&word).unwrap();
        let kind = tokens.kinds()[0];
        match Keyword::lookup(&word) {
            Some(kw) => prop_assert_eq!(kind, TokenKind::Keyword(kw)),
            None => prop_assert!(kind.is_ident()),
        }
    }
}
