//! Function body tests.

use ctruct_ir::ast::{DeclKind, FunctionBody, StmtKind};
use ctruct_ir::StmtId;
use pretty_assertions::assert_eq;

use super::{parse_ok, Parsed};

/// Statement kinds of a function body, by name.
fn body_kinds(parsed: &Parsed, index: usize) -> Vec<&'static str> {
    let FunctionBody::Block { body, .. } = &parsed.function(index).body else {
        panic!("expected block body");
    };
    block_kinds(parsed, *body)
}

fn block_kinds(parsed: &Parsed, block: StmtId) -> Vec<&'static str> {
    let StmtKind::Block(stmts) = parsed.arena().get_stmt(block).kind else {
        panic!("expected block");
    };
    parsed
        .arena()
        .get_stmt_list(stmts)
        .iter()
        .map(|id| match parsed.arena().get_stmt(*id).kind {
            StmtKind::Expr(_) => "expr",
            StmtKind::Block(_) => "block",
            StmtKind::Return(Some(_)) => "return-value",
            StmtKind::Return(None) => "return",
            StmtKind::Decl(_) => "decl",
            StmtKind::Empty => "empty",
        })
        .collect()
}

#[test]
fn test_statement_kinds() {
    let parsed = parse_ok("void f() { int x = 1; x = x + 1; ; { return; } return x; }");
    assert_eq!(
        body_kinds(&parsed, 0),
        ["decl", "expr", "empty", "block", "return-value"]
    );
}

#[test]
fn test_declaration_versus_expression_statements() {
    let parsed = parse_ok(
        "void f() { \
           string s; \
           std::vector<int> v; \
           Widget *w = make(); \
           a * b + c; \
           call(1, 2); \
           const int k = 3; \
           using std::swap; \
           a < b; \
         }",
    );
    assert_eq!(
        body_kinds(&parsed, 0),
        ["decl", "decl", "decl", "expr", "expr", "decl", "decl", "expr"]
    );
}

#[test]
fn test_nested_blocks() {
    let parsed = parse_ok("void f() { { { int deep; } } }");
    let FunctionBody::Block { body, .. } = &parsed.function(0).body else {
        panic!("expected block body");
    };
    assert_eq!(block_kinds(&parsed, *body), ["block"]);
}

#[test]
fn test_local_declaration_node() {
    let parsed = parse_ok("int main() { static int counter = 0; return counter; }");
    let FunctionBody::Block { body, .. } = &parsed.function(0).body else {
        panic!("expected block body");
    };
    let StmtKind::Block(stmts) = parsed.arena().get_stmt(*body).kind else {
        panic!("expected block");
    };
    let first = parsed.arena().get_stmt_list(stmts)[0];
    let StmtKind::Decl(decl) = parsed.arena().get_stmt(first).kind else {
        panic!("expected declaration statement");
    };
    assert!(matches!(parsed.arena().get_decl(decl).kind, DeclKind::Simple(_)));
}

#[test]
fn test_missing_semicolon_after_expression() {
    let parsed = super::parse_source("void f() { g() }");
    assert_eq!(parsed.output.errors.len(), 1);
    assert_eq!(parsed.output.errors[0].context, Some("expression statement"));
}
