//! Error reporting and panic-mode recovery tests.

use ctruct_ir::ast::DeclKind;
use pretty_assertions::assert_eq;

use super::{parse_source, parse_source_with, tokenize};
use crate::{parse, parse_program, CancellationToken, ParseOptions, SyntaxErrorKind};

#[test]
fn test_missing_semicolon_recovers_at_next_declaration() {
    let parsed = parse_source("int a int b;");
    assert_eq!(parsed.output.errors.len(), 1);
    let error = &parsed.output.errors[0];
    assert_eq!(error.kind, SyntaxErrorKind::UnexpectedToken);
    assert_eq!(error.found_desc, "`int`");
    assert_eq!(error.position.column, 7);

    assert_eq!(parsed.decl_count(), 1);
    let simple = parsed.simple(0);
    assert_eq!(parsed.declarator_name(simple.declarators[0].declarator), "b");
}

#[test]
fn test_error_message_lists_expected_tokens() {
    let parsed = parse_source("int a int b;");
    assert_eq!(
        parsed.output.errors[0].to_string(),
        "1:7: expected `,`, `;`, or `=`, found `int` (while parsing declaration)"
    );
}

#[test]
fn test_skip_to_semicolon_when_no_declaration_start() {
    let parsed = parse_source("int = 3 + ; int ok;");
    assert_eq!(parsed.output.errors.len(), 1);
    assert_eq!(parsed.decl_count(), 1);
    assert_eq!(parsed.declarator_name(parsed.simple(0).declarators[0].declarator), "ok");
}

#[test]
fn test_skip_balanced_braces() {
    let parsed = parse_source("void f() { 1 + ; } int after;");
    assert_eq!(parsed.output.errors.len(), 1);
    assert_eq!(parsed.decl_count(), 1);
    assert_eq!(parsed.declarator_name(parsed.simple(0).declarators[0].declarator), "after");
}

#[test]
fn test_declaration_keyword_inside_open_body_is_skipped() {
    let parsed = parse_source("void f() { x = 1 int y = 2; } int after;");
    assert_eq!(parsed.output.errors.len(), 1);
    assert_eq!(parsed.decl_count(), 1);
    assert_eq!(parsed.declarator_name(parsed.simple(0).declarators[0].declarator), "after");
}

#[test]
fn test_declaration_keyword_inside_open_namespace_body_is_skipped() {
    let parsed = parse_source("namespace n { void g() { f( int z; } int w; } int outer;");
    assert_eq!(parsed.output.errors.len(), 1);
    assert_eq!(parsed.decl_count(), 2);
    assert_eq!(parsed.declarator_name(parsed.simple(1).declarators[0].declarator), "outer");
}

#[test]
fn test_stray_closing_brace() {
    let parsed = parse_source("} int x;");
    assert_eq!(parsed.output.errors.len(), 1);
    assert_eq!(parsed.decl_count(), 1);
}

#[test]
fn test_recovery_inside_namespace() {
    let parsed = parse_source("namespace n { int = ; int good; } int outer;");
    assert_eq!(parsed.output.errors.len(), 1);
    assert_eq!(parsed.decl_count(), 2);
    let DeclKind::Namespace(ns) = &parsed.decl(0).kind else {
        panic!("expected namespace");
    };
    assert_eq!(ns.decls.len(), 1);
}

#[test]
fn test_unterminated_namespace_reports_end_of_input() {
    let parsed = parse_source("namespace n { int x;");
    assert_eq!(parsed.output.errors.len(), 1);
    assert!(parsed.output.errors[0].is_end_of_input());
    assert_eq!(parsed.decl_count(), 0);
}

#[test]
fn test_failed_declaration_leaves_no_nodes() {
    let parsed = parse_source("int a = f(1, 2 int b;");
    assert_eq!(parsed.decl_count(), 1);
    assert_eq!(parsed.arena().decl_count(), 1);
    assert_eq!(parsed.arena().expr_count(), 0);
}

#[test]
fn test_every_error_is_reported() {
    let parsed = parse_source("int a int b int c;");
    assert_eq!(parsed.output.errors.len(), 2);
    assert_eq!(parsed.decl_count(), 1);
}

#[test]
fn test_max_errors_stops_parsing() {
    let options = ParseOptions::new().with_max_errors(1);
    let parsed = parse_source_with("x; y; int z;", &options);
    assert_eq!(parsed.output.errors.len(), 1);
    assert_eq!(parsed.decl_count(), 0);
    assert!(!parsed.output.cancelled);
}

#[test]
fn test_cancellation_before_first_declaration() {
    let token = CancellationToken::new();
    token.cancel();
    let options = ParseOptions::new().with_cancellation(token);
    let parsed = parse_source_with("int a; int b;", &options);
    assert!(parsed.output.cancelled);
    assert_eq!(parsed.decl_count(), 0);
    assert!(!parsed.output.has_errors());
}

#[test]
fn test_parse_is_deterministic() {
    let source = "namespace a { template <class T> T id(T t) { return t; } } int x = 1 + 2 * 3;";
    let tokens = tokenize(source);
    let first = parse(&tokens, &ParseOptions::default());
    let second = parse(&tokens, &ParseOptions::default());
    assert_eq!(first, second);
}

#[test]
fn test_parse_program_fails_on_any_error() {
    let tokens = tokenize("int a int b;");
    let errors = parse_program(&tokens).unwrap_err();
    assert_eq!(errors.len(), 1);

    let tokens = tokenize("int a; int b;");
    let output = parse_program(&tokens).unwrap();
    assert_eq!(output.program.decls.len(), 2);
}

#[test]
fn test_empty_input() {
    let parsed = parse_source("");
    assert!(!parsed.output.has_errors());
    assert_eq!(parsed.decl_count(), 0);
}

#[test]
fn test_unexpected_end_of_input() {
    let parsed = parse_source("int f(int a");
    assert_eq!(parsed.output.errors.len(), 1);
    assert_eq!(parsed.output.errors[0].kind, SyntaxErrorKind::UnexpectedEndOfInput);
}
