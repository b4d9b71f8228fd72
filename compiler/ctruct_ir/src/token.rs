//! Token types for the lexer and parser.
//!
//! A [`TokenList`] owns the token sequence produced by one tokenize call
//! together with the interner holding identifier and literal text.

use std::fmt;

use crate::{Name, Position, Span, StringInterner};

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// Reserved words recognized by the tokenizer.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            /// Source spelling of the keyword.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)*
                }
            }

            /// Classify an identifier-shaped lexeme.
            pub fn lookup(text: &str) -> Option<Keyword> {
                match text {
                    $($text => Some(Keyword::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

keywords! {
    Alignas => "alignas",
    Alignof => "alignof",
    Auto => "auto",
    Bool => "bool",
    Break => "break",
    Case => "case",
    Catch => "catch",
    Char => "char",
    Class => "class",
    Const => "const",
    Constexpr => "constexpr",
    Continue => "continue",
    Decltype => "decltype",
    Default => "default",
    Delete => "delete",
    Do => "do",
    Double => "double",
    Else => "else",
    Enum => "enum",
    Explicit => "explicit",
    Extern => "extern",
    False => "false",
    Float => "float",
    For => "for",
    Friend => "friend",
    Goto => "goto",
    If => "if",
    Inline => "inline",
    Int => "int",
    Long => "long",
    Mutable => "mutable",
    Namespace => "namespace",
    Noexcept => "noexcept",
    Nullptr => "nullptr",
    Operator => "operator",
    Private => "private",
    Protected => "protected",
    Public => "public",
    Register => "register",
    Return => "return",
    Short => "short",
    Signed => "signed",
    Sizeof => "sizeof",
    Static => "static",
    StaticAssert => "static_assert",
    Struct => "struct",
    Switch => "switch",
    Template => "template",
    This => "this",
    ThreadLocal => "thread_local",
    Throw => "throw",
    True => "true",
    Try => "try",
    Typedef => "typedef",
    Typename => "typename",
    Union => "union",
    Unsigned => "unsigned",
    Using => "using",
    Virtual => "virtual",
    Void => "void",
    Volatile => "volatile",
    While => "while",
}

impl Keyword {
    /// Builtin type names that may appear in a simple type specifier.
    pub const fn is_builtin_type(self) -> bool {
        matches!(
            self,
            Keyword::Auto
                | Keyword::Bool
                | Keyword::Char
                | Keyword::Double
                | Keyword::Float
                | Keyword::Int
                | Keyword::Long
                | Keyword::Short
                | Keyword::Signed
                | Keyword::Unsigned
                | Keyword::Void
        )
    }
}

macro_rules! puncts {
    ($($variant:ident => $text:literal,)*) => {
        /// Punctuators and operators.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum Punct {
            $($variant,)*
        }

        impl Punct {
            /// Every punctuator, in declaration order.
            pub const ALL: &'static [Punct] = &[$(Punct::$variant,)*];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Punct::$variant => $text,)*
                }
            }
        }
    };
}

puncts! {
    LParen => "(",
    RParen => ")",
    LBrace => "{",
    RBrace => "}",
    LBracket => "[",
    RBracket => "]",
    Comma => ",",
    Semi => ";",
    Colon => ":",
    ColonColon => "::",
    Arrow => "->",
    Dot => ".",
    Ellipsis => "...",
    Question => "?",
    Star => "*",
    Amp => "&",
    AmpAmp => "&&",
    Plus => "+",
    PlusPlus => "++",
    Minus => "-",
    MinusMinus => "--",
    Slash => "/",
    Percent => "%",
    Lt => "<",
    Shl => "<<",
    LtEq => "<=",
    Gt => ">",
    Shr => ">>",
    GtEq => ">=",
    EqEq => "==",
    NotEq => "!=",
    Caret => "^",
    Pipe => "|",
    PipePipe => "||",
    Eq => "=",
    Bang => "!",
    Tilde => "~",
    PlusEq => "+=",
    MinusEq => "-=",
    StarEq => "*=",
    SlashEq => "/=",
    PercentEq => "%=",
    AmpEq => "&=",
    PipeEq => "|=",
    CaretEq => "^=",
    ShlEq => "<<=",
    ShrEq => ">>=",
}

/// Token kinds.
///
/// Identifier and literal payloads are interned in the owning
/// [`TokenList`]'s interner; literal text keeps its quotes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Ident(Name),
    Number(Name),
    Str(Name),
    Char(Name),
    Keyword(Keyword),
    Punct(Punct),
    Eof,
}

impl TokenKind {
    /// Category name for error messages: "identifier", "`;`", "`class`".
    pub fn display_name(&self) -> String {
        match self {
            TokenKind::Ident(_) => "identifier".to_string(),
            TokenKind::Number(_) => "number".to_string(),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Char(_) => "character literal".to_string(),
            TokenKind::Keyword(kw) => format!("`{}`", kw.as_str()),
            TokenKind::Punct(p) => format!("`{}`", p.as_str()),
            TokenKind::Eof => "end of input".to_string(),
        }
    }

    #[inline]
    pub fn is_punct(&self, punct: Punct) -> bool {
        *self == TokenKind::Punct(punct)
    }

    #[inline]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        *self == TokenKind::Keyword(keyword)
    }

    #[inline]
    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Ident(_))
    }
}

/// A token with its byte span and line/column position.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub position: Position,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, position: Position) -> Self {
        Token {
            kind,
            span,
            position,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.position)
    }
}

/// A captured range of token indices `[start, end)` in a [`TokenList`].
///
/// Used for attribute argument clauses, whose balanced token sequences are
/// kept verbatim instead of being parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TokenCapture {
    /// No tokens captured.
    #[default]
    None,
    Range { start: u32, end: u32 },
}

impl TokenCapture {
    /// Create a new capture range; empty ranges collapse to `None`.
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "TokenCapture: start ({start}) > end ({end})");
        if start == end {
            Self::None
        } else {
            Self::Range { start, end }
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Range { start, end } => (end - start) as usize,
        }
    }
}

/// The full token sequence of one source text, terminated by `Eof`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
    interner: StringInterner,
}

impl TokenList {
    pub fn new(interner: StringInterner) -> Self {
        TokenList {
            tokens: Vec::new(),
            interner,
        }
    }

    pub fn with_capacity(capacity: usize, interner: StringInterner) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
            interner,
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Tokens in a capture range; empty when the range is out of bounds.
    pub fn get_range(&self, capture: TokenCapture) -> &[Token] {
        match capture {
            TokenCapture::None => &[],
            TokenCapture::Range { start, end } => self
                .tokens
                .get(start as usize..end as usize)
                .unwrap_or(&[]),
        }
    }

    /// Source spelling of a token kind.
    pub fn text(&self, kind: &TokenKind) -> &str {
        match kind {
            TokenKind::Ident(name)
            | TokenKind::Number(name)
            | TokenKind::Str(name)
            | TokenKind::Char(name) => self.interner.lookup(*name),
            TokenKind::Keyword(kw) => kw.as_str(),
            TokenKind::Punct(p) => p.as_str(),
            TokenKind::Eof => "",
        }
    }

    /// Token kinds without positions.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    /// Source spellings of every token, `Eof` included as `""`.
    ///
    /// Comparable across token lists produced by different tokenize calls,
    /// unlike `kinds()` whose names are interner-relative.
    pub fn lexemes(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| self.text(&t.kind)).collect()
    }
}
