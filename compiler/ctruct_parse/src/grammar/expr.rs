//! Expression parsing.
//!
//! Binary operators use precedence climbing over [`BinaryOp::precedence`];
//! every level is left-associative. Assignment sits below `||` and is
//! right-associative. Prefix operators bind tighter than any binary one.

use ctruct_ir::ast::{AssignOp, BinaryOp, Expr, ExprKind, Literal, UnaryOp};
use ctruct_ir::{ExprId, ExprRange, Keyword, Punct, TokenKind};

use crate::context::ParseContext;
use crate::recovery::TokenSet;
use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, Parser};

/// Tokens that can begin a primary expression, for error messages.
const PRIMARY_START: TokenSet = TokenSet::EMPTY
    .with_ident()
    .with_literals()
    .with_punct(Punct::LParen)
    .with_punct(Punct::LBracket);

impl Parser<'_> {
    /// Parse an expression, assignment included.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    fn parse_assignment(&mut self) -> Result<ExprId, ParseError> {
        let target = self.parse_binary(BinaryOp::MIN_PRECEDENCE)?;
        let Some(op) = self.match_assign_op() else {
            return Ok(target);
        };
        self.cursor.advance();
        let value = self.parse_expr()?;
        let span = self.arena.get_expr(target).span.merge(self.arena.get_expr(value).span);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Assign { op, target, value }, span)))
    }

    /// Precedence climbing: fold operators binding at least `min_prec`.
    fn parse_binary(&mut self, min_prec: u8) -> Result<ExprId, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.match_binary_op() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.cursor.advance();
            let right = self.parse_binary(prec + 1)?;
            let span = self.arena.get_expr(left).span.merge(self.arena.get_expr(right).span);
            left = self
                .arena
                .alloc_expr(Expr::new(ExprKind::Binary { op, left, right }, span));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let Some(op) = self.match_unary_op() else {
            return self.parse_postfix();
        };
        let start = self.cursor.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(self.arena.get_expr(operand).span);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Unary { op, operand }, span)))
    }

    /// A primary followed by any number of call suffixes.
    fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;
        while self.cursor.check_punct(Punct::LParen) {
            let start = self.arena.get_expr(expr).span;
            let args = self.parse_expr_list(Punct::LParen, Punct::RParen)?;
            let span = self.cursor.span_from(start);
            expr = self
                .arena
                .alloc_expr(Expr::new(ExprKind::Call { callee: expr, args }, span));
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();
        let kind = match token.kind {
            TokenKind::Punct(Punct::LParen) => {
                self.cursor.advance();
                let inner = self.without_context(ParseContext::NO_GREATER, Self::parse_expr)?;
                self.cursor
                    .expect_punct(Punct::RParen)
                    .map_err(|e| e.in_context("parenthesized expression"))?;
                let span = self.cursor.span_from(token.span);
                return Ok(self.arena.alloc_expr(Expr::new(ExprKind::Grouping(inner), span)));
            }
            TokenKind::Punct(Punct::LBracket) => {
                let elements = self.parse_expr_list(Punct::LBracket, Punct::RBracket)?;
                let span = self.cursor.span_from(token.span);
                return Ok(self
                    .arena
                    .alloc_expr(Expr::new(ExprKind::ArrayLiteral(elements), span)));
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                let mut expr = self.arena.alloc_expr(Expr::new(ExprKind::Ident(name), token.span));
                while self.cursor.check_punct(Punct::ColonColon) && self.cursor.peek(1).is_ident() {
                    self.cursor.advance();
                    let member = self.cursor.expect_ident()?;
                    let span = self.cursor.span_from(token.span);
                    expr = self
                        .arena
                        .alloc_expr(Expr::new(ExprKind::Scoped { scope: expr, member }, span));
                }
                return Ok(expr);
            }
            TokenKind::Number(text) => ExprKind::Literal(Literal::Number(text)),
            TokenKind::Str(text) => ExprKind::Literal(Literal::String(text)),
            TokenKind::Char(text) => ExprKind::Literal(Literal::Char(text)),
            TokenKind::Keyword(Keyword::True) => ExprKind::Literal(Literal::Bool(true)),
            TokenKind::Keyword(Keyword::False) => ExprKind::Literal(Literal::Bool(false)),
            TokenKind::Keyword(Keyword::Nullptr) => ExprKind::Literal(Literal::Nullptr),
            TokenKind::Keyword(Keyword::This) => ExprKind::Literal(Literal::This),
            _ => return Err(self.cursor.error_expected(PRIMARY_START, Some("expression"))),
        };
        self.cursor.advance();
        Ok(self.arena.alloc_expr(Expr::new(kind, token.span)))
    }

    /// `open (expr (, expr)* ,?)? close`; `>` is an operator inside.
    pub(crate) fn parse_expr_list(
        &mut self,
        open: Punct,
        close: Punct,
    ) -> Result<ExprRange, ParseError> {
        self.cursor.expect_punct(open)?;
        let items = self.without_context(ParseContext::NO_GREATER, |p| {
            let mut items = Vec::new();
            while !p.cursor.check_punct(close) {
                items.push(p.parse_expr()?);
                if !p.cursor.eat_punct(Punct::Comma) {
                    break;
                }
            }
            Ok::<_, ParseError>(items)
        })?;
        self.cursor.expect_punct(close)?;
        Ok(self.arena.alloc_expr_list(items))
    }

    fn match_binary_op(&self) -> Option<BinaryOp> {
        let TokenKind::Punct(punct) = self.cursor.current_kind() else {
            return None;
        };
        Some(match punct {
            Punct::PipePipe => BinaryOp::Or,
            Punct::AmpAmp => BinaryOp::And,
            Punct::Pipe => BinaryOp::BitOr,
            Punct::Caret => BinaryOp::BitXor,
            Punct::Amp => BinaryOp::BitAnd,
            Punct::EqEq => BinaryOp::Eq,
            Punct::NotEq => BinaryOp::NotEq,
            Punct::Lt => BinaryOp::Lt,
            Punct::LtEq => BinaryOp::LtEq,
            Punct::Gt if self.context.allows_greater() => BinaryOp::Gt,
            Punct::GtEq => BinaryOp::GtEq,
            Punct::Shl => BinaryOp::Shl,
            Punct::Shr if self.context.allows_greater() => BinaryOp::Shr,
            Punct::Plus => BinaryOp::Add,
            Punct::Minus => BinaryOp::Sub,
            Punct::Star => BinaryOp::Mul,
            Punct::Slash => BinaryOp::Div,
            Punct::Percent => BinaryOp::Mod,
            _ => return None,
        })
    }

    fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Punct(Punct::Star) => Some(UnaryOp::Deref),
            TokenKind::Punct(Punct::Amp) => Some(UnaryOp::AddrOf),
            TokenKind::Punct(Punct::Plus) => Some(UnaryOp::Plus),
            TokenKind::Punct(Punct::Minus) => Some(UnaryOp::Neg),
            TokenKind::Punct(Punct::Bang) => Some(UnaryOp::Not),
            TokenKind::Punct(Punct::Tilde) => Some(UnaryOp::BitNot),
            _ => None,
        }
    }

    fn match_assign_op(&self) -> Option<AssignOp> {
        let TokenKind::Punct(punct) = self.cursor.current_kind() else {
            return None;
        };
        Some(match punct {
            Punct::Eq => AssignOp::Assign,
            Punct::PlusEq => AssignOp::Compound(BinaryOp::Add),
            Punct::MinusEq => AssignOp::Compound(BinaryOp::Sub),
            Punct::StarEq => AssignOp::Compound(BinaryOp::Mul),
            Punct::SlashEq => AssignOp::Compound(BinaryOp::Div),
            Punct::PercentEq => AssignOp::Compound(BinaryOp::Mod),
            Punct::AmpEq => AssignOp::Compound(BinaryOp::BitAnd),
            Punct::PipeEq => AssignOp::Compound(BinaryOp::BitOr),
            Punct::CaretEq => AssignOp::Compound(BinaryOp::BitXor),
            Punct::ShlEq => AssignOp::Compound(BinaryOp::Shl),
            Punct::ShrEq => AssignOp::Compound(BinaryOp::Shr),
            _ => return None,
        })
    }
}
