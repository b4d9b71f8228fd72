//! Statements inside function bodies.
//!
//! Only what a function body needs to be skipped structurally and printed
//! back: blocks, `return`, empty statements, declarations and expression
//! statements.

use ctruct_ir::ast::{Stmt, StmtKind};
use ctruct_ir::{Keyword, Punct, StmtId, TokenKind};

use crate::context::ParseContext;
use crate::recovery::{TokenSet, DECL_START};
use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `{ statement* }`
    pub(crate) fn parse_compound_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.current_span();
        self.cursor
            .expect_punct(Punct::LBrace)
            .map_err(|e| e.in_context("function body"))?;
        let stmts = self.with_context(ParseContext::IN_FUNCTION_BODY, |p| {
            p.without_context(ParseContext::NO_GREATER, |p| {
                let mut stmts = Vec::new();
                while !p.cursor.check_punct(Punct::RBrace) && !p.cursor.is_at_end() {
                    stmts.push(p.parse_statement()?);
                }
                Ok::<_, ParseError>(stmts)
            })
        })?;
        self.cursor
            .expect_punct(Punct::RBrace)
            .map_err(|e| e.in_context("block"))?;
        let range = self.arena.alloc_stmt_list(stmts);
        let span = self.cursor.span_from(start);
        Ok(self.arena.alloc_stmt(Stmt::new(StmtKind::Block(range), span)))
    }

    fn parse_statement(&mut self) -> Result<StmtId, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Punct(Punct::LBrace) => return self.parse_compound_statement(),
            TokenKind::Punct(Punct::Semi) => {
                self.cursor.advance();
                StmtKind::Empty
            }
            TokenKind::Keyword(Keyword::Return) => {
                self.cursor.advance();
                let value = if self.cursor.check_punct(Punct::Semi) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect_statement_end("return statement")?;
                StmtKind::Return(value)
            }
            _ if self.at_declaration_statement() => StmtKind::Decl(self.parse_declaration()?),
            _ => {
                let expr = self.parse_expr()?;
                self.expect_statement_end("expression statement")?;
                StmtKind::Expr(expr)
            }
        };
        let span = self.cursor.span_from(start);
        Ok(self.arena.alloc_stmt(Stmt::new(kind, span)))
    }

    fn expect_statement_end(&mut self, context: &'static str) -> Result<(), ParseError> {
        if self.cursor.eat_punct(Punct::Semi) {
            return Ok(());
        }
        Err(self
            .cursor
            .error_expected(TokenSet::EMPTY.with_punct(Punct::Semi), None)
            .in_context(context))
    }

    /// Declaration or expression: keywords that start a declaration,
    /// attributes, `T x`, `T<U> x`, `T* x;`, `T& r = ...`.
    fn at_declaration_statement(&mut self) -> bool {
        match self.cursor.current_kind() {
            kind @ TokenKind::Keyword(_) => DECL_START.contains(&kind),
            TokenKind::Punct(Punct::LBracket) => self.cursor.at_attribute_open(),
            TokenKind::Ident(_) | TokenKind::Punct(Punct::ColonColon) => self.look_ahead(|p| {
                if p.parse_qualified_name().is_err() {
                    return false;
                }
                match p.cursor.current_kind() {
                    TokenKind::Ident(_) | TokenKind::Keyword(Keyword::Const | Keyword::Volatile) => {
                        true
                    }
                    TokenKind::Punct(Punct::Star | Punct::Amp | Punct::AmpAmp) => {
                        p.cursor.advance();
                        p.parse_cv_qualifiers();
                        p.cursor.check_ident()
                            && matches!(
                                p.cursor.peek(1),
                                TokenKind::Punct(
                                    Punct::Semi
                                        | Punct::Eq
                                        | Punct::Comma
                                        | Punct::LParen
                                        | Punct::LBracket
                                        | Punct::LBrace
                                )
                            )
                    }
                    _ => false,
                }
            }),
            _ => false,
        }
    }
}
