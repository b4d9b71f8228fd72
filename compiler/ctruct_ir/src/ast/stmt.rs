//! Statement nodes for function bodies.

use crate::{DeclId, ExprId, Span, Spanned, StmtRange};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// `expr;`
    Expr(ExprId),
    /// `{ ... }`
    Block(StmtRange),
    /// `return expr;`
    Return(Option<ExprId>),
    /// Block-scope declaration: `int x = 1;`
    Decl(DeclId),
    /// `;`
    Empty,
}
