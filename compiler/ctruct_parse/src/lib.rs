//! Recursive descent parser for C++ declarations.
//!
//! Consumes a [`TokenList`] and produces a [`Program`] whose nodes live in
//! an [`AstArena`]. Errors are values: the top-level loop records them,
//! recovers, and keeps going.

mod context;
mod cursor;
mod error;
mod grammar;
mod options;
mod recovery;
mod snapshot;
mod stack;

pub use context::ParseContext;
pub use cursor::{Cursor, CursorMark};
pub use error::{ParseError, SyntaxErrorKind};
pub use options::{CancellationToken, ParseOptions};
pub use recovery::TokenSet;

use ctruct_ir::ast::Program;
use ctruct_ir::{AstArena, DeclId, ExprId, Span, TokenList};
use tracing::debug;

/// Parser state for one parse.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: AstArena,
    context: ParseContext,
    /// Errors recovered from so far, nested bodies included.
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: AstArena::with_capacity(tokens.len()),
            context: ParseContext::empty(),
            errors: Vec::new(),
        }
    }

    /// Run `f` with `flags` added to the context.
    pub(crate) fn with_context<T>(
        &mut self,
        flags: ParseContext,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context;
        self.context |= flags;
        let result = f(self);
        self.context = saved;
        result
    }

    /// Run `f` with `flags` removed from the context.
    pub(crate) fn without_context<T>(
        &mut self,
        flags: ParseContext,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context;
        self.context -= flags;
        let result = f(self);
        self.context = saved;
        result
    }

    /// Parse a whole translation unit.
    pub fn parse_program(mut self, options: &ParseOptions) -> ParseOutput {
        let mut decls = Vec::new();
        let mut cancelled = false;

        while !self.cursor.is_at_end() {
            if options.is_cancelled() {
                debug!(pos = self.cursor.position(), "parse cancelled");
                cancelled = true;
                break;
            }
            if options.error_limit_reached(self.errors.len()) {
                debug!(errors = self.errors.len(), "error limit reached");
                break;
            }
            if let Some(id) = self.parse_declaration_recovering(false) {
                decls.push(id);
            }
        }

        let end = self.cursor.tokens().as_slice().last().map_or(0, |t| t.span.end);
        ParseOutput {
            program: Program {
                decls,
                span: Span::new(0, end),
                arena: self.arena,
            },
            errors: self.errors,
            cancelled,
        }
    }

    /// Parse one declaration; on failure record the error, discard any
    /// nodes it allocated, and recover.
    ///
    /// `nested` is set inside namespace and linkage bodies, where a `}` at
    /// depth zero belongs to the enclosing body.
    pub(crate) fn parse_declaration_recovering(&mut self, nested: bool) -> Option<DeclId> {
        let start = self.cursor.position();
        let arena_mark = self.arena.mark();
        match self.parse_declaration() {
            Ok(id) => Some(id),
            Err(error) => {
                debug!(%error, "declaration failed");
                self.errors.push(error);
                self.arena.truncate(arena_mark);
                self.recover(start, nested);
                None
            }
        }
    }

    fn recover(&mut self, start: usize, nested: bool) {
        let here = self.cursor.position();
        let depth = recovery::unclosed_braces(&self.cursor, start, here);
        // Tokens inside a body left open by the failure still belong to it.
        if here > start && depth == 0 && self.cursor.check_set(&recovery::DECL_START) {
            debug!(pos = here, "resume at declaration start");
            return;
        }
        let skipped = recovery::skip_declaration(&mut self.cursor, depth, nested);
        debug!(pos = self.cursor.position(), skipped, "skipped broken declaration");
    }
}

/// Result of a parse: the (possibly partial) program and every error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
    /// Parsing stopped early because the cancellation token fired.
    pub cancelled: bool,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse tokens into a program, collecting errors.
pub fn parse(tokens: &TokenList, options: &ParseOptions) -> ParseOutput {
    Parser::new(tokens).parse_program(options)
}

/// Parse tokens into a program; any syntax error fails the whole parse.
pub fn parse_program(tokens: &TokenList) -> Result<ParseOutput, Vec<ParseError>> {
    let output = parse(tokens, &ParseOptions::default());
    if output.has_errors() {
        Err(output.errors)
    } else {
        Ok(output)
    }
}

/// Parse the tokens as one expression that must span the whole input.
pub fn parse_expression_tokens(tokens: &TokenList) -> Result<(AstArena, ExprId), ParseError> {
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr()?;
    if !parser.cursor.is_at_end() {
        return Err(parser
            .cursor
            .error_expected(TokenSet::EMPTY, Some("end of input"))
            .in_context("expression"));
    }
    Ok((parser.arena, expr))
}

#[cfg(test)]
mod tests;
