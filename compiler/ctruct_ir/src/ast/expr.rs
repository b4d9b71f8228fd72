//! Expression nodes.
//!
//! Children are arena indices, never boxes, so `Expr` stays `Copy`.

use std::fmt;

use super::operators::{AssignOp, BinaryOp, UnaryOp};
use crate::{ExprId, ExprRange, Name, Span, Spanned};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Literal terms. Text-carrying literals keep their source spelling,
/// quotes included.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Number(Name),
    String(Name),
    Char(Name),
    Bool(bool),
    Nullptr,
    This,
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Literal(Literal),

    /// Variable reference: `x`
    Ident(Name),

    /// Scope resolution: `std::cout`
    Scoped { scope: ExprId, member: Name },

    /// Prefix operator: `-x`, `*p`
    Unary { op: UnaryOp, operand: ExprId },

    /// Binary operator: `a + b`
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// Assignment: `a = b`, `a += b`
    Assign {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },

    /// Call: `f(a, b)`, `(f)(a)`
    Call { callee: ExprId, args: ExprRange },

    /// Array literal: `[a, [b, c]]`
    ArrayLiteral(ExprRange),

    /// Parenthesized expression: `(a)`
    Grouping(ExprId),
}
