//! AST node types.
//!
//! Nodes refer to each other through typed arena indices; the arena lives
//! in [`Program`] next to the top-level declaration list.

mod decl;
mod declarator;
mod expr;
mod operators;
mod stmt;
mod ty;

pub use decl::{
    Decl, DeclKind, FunctionBody, FunctionDef, Handler, InitDeclarator, Initializer, LinkageBody,
    LinkageSpec, MemInitializer, NamespaceDef, SimpleDecl, TemplateDecl, TemplateParam,
    TemplateParamKind, TypeParamKey,
};
pub use declarator::{
    Declarator, DeclaratorKind, ExceptionSpec, FunctionDeclarator, Parameter, ParameterClause,
    PtrOpKind, PtrOperator, RefQualifier,
};
pub use expr::{Expr, ExprKind, Literal};
pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use stmt::{Stmt, StmtKind};
pub use ty::{
    AlignasArg, Attribute, AttributeSpecifier, AttributeSpecifierKind, BuiltinType, CvQualifiers,
    DeclFlags, DeclSpecifiers, ElaboratedKey, NameSegment, QualifiedName, SpecifierWord,
    TemplateArg, Type, TypeKind, TypeName,
};

use crate::{AstArena, DeclId, Span};

/// A translation unit: top-level declarations in source order.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Program {
    pub decls: Vec<DeclId>,
    pub span: Span,
    pub arena: AstArena,
}

impl Program {
    /// Top-level declarations, resolved through the arena.
    pub fn iter_decls(&self) -> impl Iterator<Item = &Decl> {
        self.decls.iter().map(|&id| self.arena.get_decl(id))
    }
}
