//! Names, type specifiers, decl-specifiers and attributes.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::{DeclaratorId, ExprId, Keyword, Name, Span, Spanned, TokenCapture, TypeId};

/// One `::`-separated segment of a qualified name, with optional template
/// arguments: `vector<int>`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NameSegment {
    pub ident: Name,
    pub template_args: Option<Vec<TemplateArg>>,
    pub span: Span,
}

/// A possibly qualified name: `x`, `::std::vector<int>`, `A::B::c`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct QualifiedName {
    /// Leading `::`.
    pub global: bool,
    pub segments: SmallVec<[NameSegment; 2]>,
    pub span: Span,
}

impl QualifiedName {
    /// The final segment's identifier.
    pub fn last_ident(&self) -> Name {
        self.segments.last().map_or(Name::EMPTY, |s| s.ident)
    }

    /// True for a single unqualified identifier without template arguments.
    pub fn is_simple(&self) -> bool {
        !self.global && self.segments.len() == 1 && self.segments[0].template_args.is_none()
    }
}

/// A template argument is either a type-id or a constant expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TemplateArg {
    Type(TypeName),
    Expr(ExprId),
}

/// Builtin type keywords.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BuiltinType {
    Auto,
    Void,
    Bool,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Signed,
    Unsigned,
}

impl BuiltinType {
    pub fn from_keyword(kw: Keyword) -> Option<Self> {
        Some(match kw {
            Keyword::Auto => Self::Auto,
            Keyword::Void => Self::Void,
            Keyword::Bool => Self::Bool,
            Keyword::Char => Self::Char,
            Keyword::Short => Self::Short,
            Keyword::Int => Self::Int,
            Keyword::Long => Self::Long,
            Keyword::Float => Self::Float,
            Keyword::Double => Self::Double,
            Keyword::Signed => Self::Signed,
            Keyword::Unsigned => Self::Unsigned,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Signed => "signed",
            Self::Unsigned => "unsigned",
        }
    }
}

/// Class-key of an elaborated type specifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ElaboratedKey {
    Class,
    Struct,
    Union,
    Enum,
    Typename,
}

impl ElaboratedKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::Typename => "typename",
        }
    }
}

/// A type specifier.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

impl Spanned for Type {
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    /// `unsigned long`, `int`, `auto`
    Builtin(SmallVec<[BuiltinType; 2]>),
    /// `std::string`, `vector<int>`
    Named(QualifiedName),
    /// `struct tm`, `typename T::value_type`
    Elaborated {
        key: ElaboratedKey,
        name: QualifiedName,
    },
    /// `decltype(expr)`
    Decltype(ExprId),
}

bitflags! {
    /// cv-qualifiers.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct CvQualifiers: u8 {
        const CONST = 1 << 0;
        const VOLATILE = 1 << 1;
    }
}

bitflags! {
    /// Non-type decl-specifiers: storage class, function specifiers,
    /// `friend`, `typedef`, `constexpr`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DeclFlags: u16 {
        const TYPEDEF = 1 << 0;
        const FRIEND = 1 << 1;
        const CONSTEXPR = 1 << 2;
        const INLINE = 1 << 3;
        const VIRTUAL = 1 << 4;
        const EXPLICIT = 1 << 5;
        const STATIC = 1 << 6;
        const EXTERN = 1 << 7;
        const MUTABLE = 1 << 8;
        const THREAD_LOCAL = 1 << 9;
        const REGISTER = 1 << 10;
    }
}

impl DeclFlags {
    /// Map a specifier keyword to its flag.
    pub fn from_keyword(kw: Keyword) -> Option<Self> {
        Some(match kw {
            Keyword::Typedef => Self::TYPEDEF,
            Keyword::Friend => Self::FRIEND,
            Keyword::Constexpr => Self::CONSTEXPR,
            Keyword::Inline => Self::INLINE,
            Keyword::Virtual => Self::VIRTUAL,
            Keyword::Explicit => Self::EXPLICIT,
            Keyword::Static => Self::STATIC,
            Keyword::Extern => Self::EXTERN,
            Keyword::Mutable => Self::MUTABLE,
            Keyword::ThreadLocal => Self::THREAD_LOCAL,
            Keyword::Register => Self::REGISTER,
            _ => return None,
        })
    }

    /// Keyword spellings of the set flags, in canonical order.
    pub fn keywords(self) -> impl Iterator<Item = &'static str> {
        const ORDER: [(DeclFlags, &str); 11] = [
            (DeclFlags::TYPEDEF, "typedef"),
            (DeclFlags::FRIEND, "friend"),
            (DeclFlags::CONSTEXPR, "constexpr"),
            (DeclFlags::INLINE, "inline"),
            (DeclFlags::VIRTUAL, "virtual"),
            (DeclFlags::EXPLICIT, "explicit"),
            (DeclFlags::STATIC, "static"),
            (DeclFlags::EXTERN, "extern"),
            (DeclFlags::MUTABLE, "mutable"),
            (DeclFlags::THREAD_LOCAL, "thread_local"),
            (DeclFlags::REGISTER, "register"),
        ];
        ORDER
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, text)| text)
    }
}

/// One decl-specifier as written.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SpecifierWord {
    Flag(DeclFlags),
    Cv(CvQualifiers),
    /// One word of a builtin type: `unsigned`, `long`.
    Builtin(BuiltinType),
    /// The named, elaborated or decltype type specifier.
    Type,
    /// An attribute specifier, by index into `attrs`.
    Attribute(usize),
}

/// A decl-specifier-seq: flags, cv-qualifiers, at most one type
/// specifier, and attributes appertaining to it.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct DeclSpecifiers {
    pub flags: DeclFlags,
    pub cv: CvQualifiers,
    pub ty: Option<TypeId>,
    pub attrs: Vec<AttributeSpecifier>,
    /// The specifiers above in source order, duplicates included. Empty
    /// when the specifiers were not parsed from source.
    pub order: SmallVec<[SpecifierWord; 4]>,
    pub span: Span,
}

impl DeclSpecifiers {
    /// True when no specifier at all was written.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.cv.is_empty() && self.ty.is_none() && self.attrs.is_empty()
    }

    /// Append attribute specifiers, recording each in `order`.
    pub fn push_attributes(&mut self, attrs: impl IntoIterator<Item = AttributeSpecifier>) {
        for attr in attrs {
            self.order.push(SpecifierWord::Attribute(self.attrs.len()));
            self.attrs.push(attr);
        }
    }
}

/// A type-id: specifiers plus an optional abstract declarator, as used in
/// template arguments, trailing return types and alias declarations.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeName {
    pub specifiers: DeclSpecifiers,
    pub declarator: Option<DeclaratorId>,
    pub span: Span,
}

/// `[[ns::name(args)...]]` entry.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Attribute {
    pub scope: Option<Name>,
    pub name: Name,
    /// Balanced tokens between the argument parentheses, kept verbatim.
    pub args: Option<TokenCapture>,
    pub pack: bool,
    pub span: Span,
}

/// Operand of `alignas(...)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum AlignasArg {
    Type(TypeName),
    Expr(ExprId),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum AttributeSpecifierKind {
    /// `[[a, b::c(1)]]`; empty entries are dropped.
    List(Vec<Attribute>),
    /// `alignas(T)` / `alignas(expr...)`
    Alignas { arg: AlignasArg, pack: bool },
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct AttributeSpecifier {
    pub kind: AttributeSpecifierKind,
    pub span: Span,
}
