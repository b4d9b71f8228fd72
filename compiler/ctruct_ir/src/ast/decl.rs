//! Declaration nodes.

use super::declarator::Parameter;
use super::ty::{AttributeSpecifier, DeclSpecifiers, QualifiedName, TypeName};
use crate::{DeclId, DeclaratorId, ExprId, ExprRange, Name, Span, Spanned, StmtId, TypeId};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Decl {
    pub kind: DeclKind,
    pub span: Span,
}

impl Spanned for Decl {
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    /// `int a = 1, *b;`
    Simple(SimpleDecl),
    /// `int f() { ... }`, `T() = default;`
    Function(Box<FunctionDef>),
    /// `template <class T> ...`
    Template(TemplateDecl),
    /// `template <> ...`
    ExplicitSpecialization(DeclId),
    /// `extern template ...` / `template ...`
    ExplicitInstantiation { is_extern: bool, decl: DeclId },
    /// `inline namespace n { ... }`
    Namespace(NamespaceDef),
    /// `namespace fs = std::filesystem;`
    NamespaceAlias { alias: Name, target: QualifiedName },
    /// `extern "C" { ... }`
    Linkage(LinkageSpec),
    /// `[[deprecated]];`
    Attribute(Vec<AttributeSpecifier>),
    /// `using namespace std;`
    UsingDirective(QualifiedName),
    /// `using std::swap;`
    UsingDeclaration { typename: bool, name: QualifiedName },
    /// `using Vec = vector<int>;`
    Alias {
        name: Name,
        attrs: Vec<AttributeSpecifier>,
        ty: TypeName,
    },
    /// `static_assert(cond, "message");`
    StaticAssert {
        condition: ExprId,
        message: Option<Name>,
    },
    /// `;`
    Empty,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SimpleDecl {
    pub attrs: Vec<AttributeSpecifier>,
    pub specifiers: DeclSpecifiers,
    pub declarators: Vec<InitDeclarator>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct InitDeclarator {
    pub declarator: DeclaratorId,
    pub init: Option<Initializer>,
    pub span: Span,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Initializer {
    /// `= expr`
    Assign(ExprId),
    /// `{ a, b }` or `= { a, b }`
    Braced { args: ExprRange, with_eq: bool },
    /// `( a, b )`
    Paren(ExprRange),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDef {
    pub attrs: Vec<AttributeSpecifier>,
    pub specifiers: DeclSpecifiers,
    pub declarator: DeclaratorId,
    /// Effective return type: the trailing return type when present,
    /// otherwise the decl-specifier type.
    pub return_type: Option<TypeId>,
    pub body: FunctionBody,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FunctionBody {
    /// `: a(1), b{2} { ... }`
    Block {
        ctor_inits: Vec<MemInitializer>,
        body: StmtId,
    },
    /// `try : a(1) { ... } catch (...) { ... }`
    Try {
        ctor_inits: Vec<MemInitializer>,
        body: StmtId,
        handlers: Vec<Handler>,
    },
    /// `= default;`
    Default,
    /// `= delete;`
    Delete,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MemInitializer {
    pub name: QualifiedName,
    pub init: Initializer,
    pub pack: bool,
    pub span: Span,
}

/// `catch (param) { ... }`; `param` is `None` for `catch (...)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Handler {
    pub param: Option<Parameter>,
    pub body: StmtId,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TemplateDecl {
    pub params: Vec<TemplateParam>,
    pub decl: DeclId,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeParamKey {
    Class,
    Typename,
}

impl TypeParamKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Typename => "typename",
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TemplateParam {
    pub kind: TemplateParamKind,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TemplateParamKind {
    /// `class T = int`, `typename... Ts`
    Type {
        key: TypeParamKey,
        pack: bool,
        name: Option<Name>,
        default: Option<TypeName>,
    },
    /// `template <class> class C = std::vector`
    Template {
        params: Vec<TemplateParam>,
        pack: bool,
        name: Option<Name>,
        default: Option<QualifiedName>,
    },
    /// `int N = 3`
    NonType(Parameter),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NamespaceDef {
    pub inline: bool,
    /// `None` for an unnamed namespace.
    pub name: Option<Name>,
    pub decls: Vec<DeclId>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LinkageSpec {
    /// The string literal, quotes included.
    pub abi: Name,
    pub body: LinkageBody,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum LinkageBody {
    Braced(Vec<DeclId>),
    Single(DeclId),
}
