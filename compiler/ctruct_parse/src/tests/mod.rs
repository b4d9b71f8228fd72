//! Parser tests.
//!
//! Tests are organized into modules by category:
//! - `expr`: precedence, associativity, calls and primaries
//! - `declarator`: pointer/array/function nesting and parameters
//! - `decl`: the declaration dispatcher, one test per form
//! - `stmt`: function bodies
//! - `recovery`: error reporting, recovery, options

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod decl;
mod recovery;
mod stmt;

use ctruct_ir::ast::{Decl, DeclKind, FunctionDef, QualifiedName, SimpleDecl};
use ctruct_ir::{AstArena, DeclaratorId, Name, TokenList};
use tracing_subscriber::EnvFilter;

use crate::{parse, ParseOptions, ParseOutput};

/// Install a `RUST_LOG`-driven subscriber once per test binary.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(crate) fn tokenize(source: &str) -> TokenList {
    ctruct_lexer::tokenize(source).expect("test source should tokenize")
}

/// A parse together with the tokens whose interner names its identifiers.
pub(crate) struct Parsed {
    pub tokens: TokenList,
    pub output: ParseOutput,
}

impl Parsed {
    pub fn arena(&self) -> &AstArena {
        &self.output.program.arena
    }

    pub fn text(&self, name: Name) -> &str {
        self.tokens.interner().lookup(name)
    }

    pub fn qualified(&self, name: &QualifiedName) -> String {
        let mut out = String::new();
        if name.global {
            out.push_str("::");
        }
        for (i, segment) in name.segments.iter().enumerate() {
            if i > 0 {
                out.push_str("::");
            }
            out.push_str(self.text(segment.ident));
        }
        out
    }

    pub fn decl(&self, index: usize) -> &Decl {
        self.arena().get_decl(self.output.program.decls[index])
    }

    pub fn decl_count(&self) -> usize {
        self.output.program.decls.len()
    }

    pub fn simple(&self, index: usize) -> &SimpleDecl {
        match &self.decl(index).kind {
            DeclKind::Simple(simple) => simple,
            other => panic!("expected simple declaration, got {other:?}"),
        }
    }

    pub fn function(&self, index: usize) -> &FunctionDef {
        match &self.decl(index).kind {
            DeclKind::Function(def) => def,
            other => panic!("expected function definition, got {other:?}"),
        }
    }

    /// The declarator-id of a declarator, `::`-joined.
    pub fn declarator_name(&self, id: DeclaratorId) -> String {
        let name = self
            .arena()
            .declarator_name(id)
            .expect("declarator should have a name");
        self.qualified(name)
    }
}

pub(crate) fn parse_source(source: &str) -> Parsed {
    parse_source_with(source, &ParseOptions::default())
}

pub(crate) fn parse_source_with(source: &str, options: &ParseOptions) -> Parsed {
    init_tracing();
    let tokens = tokenize(source);
    let output = parse(&tokens, options);
    Parsed { tokens, output }
}

/// Parse and assert that no error was reported.
pub(crate) fn parse_ok(source: &str) -> Parsed {
    let parsed = parse_source(source);
    assert!(
        !parsed.output.has_errors(),
        "unexpected errors for {source:?}: {:?}",
        parsed.output.errors
    );
    parsed
}
