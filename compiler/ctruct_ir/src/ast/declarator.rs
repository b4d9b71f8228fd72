//! Declarator nodes.
//!
//! The tree mirrors the grammar's nesting: pointer operators wrap the
//! suffixed noptr-declarator, and array/function suffixes wrap the base
//! left to right. `int *a[3]` is `Ptr(*, Array(Name(a), 3))`.

use super::ty::{AttributeSpecifier, CvQualifiers, DeclSpecifiers, QualifiedName, TypeName};
use crate::{DeclaratorId, ExprId, Span, Spanned};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Declarator {
    pub kind: DeclaratorKind,
    pub span: Span,
}

impl Spanned for Declarator {
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclaratorKind {
    /// Declarator-id: `x`, `A::f`, `...args`.
    Name {
        name: QualifiedName,
        pack: bool,
        attrs: Vec<AttributeSpecifier>,
    },
    /// Missing declarator-id in an abstract declarator; `pack` records a
    /// lone `...`.
    Abstract { pack: bool },
    /// `( PtrDeclarator )`
    Paren(DeclaratorId),
    /// `* cv D`, `& D`, `&& D`, `C::* D`
    Ptr { op: PtrOperator, inner: DeclaratorId },
    /// `D [ size ]`
    Array {
        inner: DeclaratorId,
        size: Option<ExprId>,
        attrs: Vec<AttributeSpecifier>,
    },
    /// `D ( params ) cv ref noexcept -> T`
    Function(Box<FunctionDeclarator>),
}

/// Parameters-and-qualifiers suffix plus optional trailing return type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDeclarator {
    pub inner: DeclaratorId,
    pub params: ParameterClause,
    pub attrs: Vec<AttributeSpecifier>,
    pub cv: CvQualifiers,
    pub ref_qualifier: Option<RefQualifier>,
    pub exception: Option<ExceptionSpec>,
    pub trailing_return: Option<TypeName>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum PtrOpKind {
    /// `*`
    Pointer,
    /// `&`
    LvalueRef,
    /// `&&`
    RvalueRef,
    /// `Class::*`
    Member(QualifiedName),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PtrOperator {
    pub kind: PtrOpKind,
    pub attrs: Vec<AttributeSpecifier>,
    pub cv: CvQualifiers,
    pub span: Span,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RefQualifier {
    /// `&`
    Lvalue,
    /// `&&`
    Rvalue,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExceptionSpec {
    /// `noexcept` or `noexcept(expr)`
    Noexcept(Option<ExprId>),
    /// `throw(T, U)`
    Throw(Vec<TypeName>),
}

/// A parameter-declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Parameter {
    pub attrs: Vec<AttributeSpecifier>,
    pub specifiers: DeclSpecifiers,
    pub declarator: Option<DeclaratorId>,
    pub default: Option<ExprId>,
    pub span: Span,
}

/// A parameter-declaration-clause. `variadic` records a trailing `...`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ParameterClause {
    pub params: Vec<Parameter>,
    pub variadic: bool,
}
