//! Error recovery for the parser.
//!
//! Token sets use a bitset per token category for O(1) membership tests.
//! Recovery itself is panic-mode: after a failed declaration the parser
//! either resumes at a token that can start a declaration or skips past the
//! end of the broken one.

use ctruct_ir::{Keyword, Punct, TokenKind};

use crate::cursor::Cursor;

const _: () = assert!(
    Keyword::ALL.len() <= 64 && Punct::ALL.len() <= 64,
    "TokenSet stores keywords and punctuators in u64 bitsets"
);

const IDENT: u8 = 1 << 0;
const NUMBER: u8 = 1 << 1;
const STRING: u8 = 1 << 2;
const CHAR: u8 = 1 << 3;
const EOF: u8 = 1 << 4;

/// A set of token kinds. Payloads are ignored: every identifier is the
/// same member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenSet {
    keywords: u64,
    puncts: u64,
    classes: u8,
}

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet {
        keywords: 0,
        puncts: 0,
        classes: 0,
    };

    #[inline]
    #[must_use]
    pub const fn with_keyword(self, kw: Keyword) -> Self {
        TokenSet {
            keywords: self.keywords | 1 << kw as u8,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_punct(self, punct: Punct) -> Self {
        TokenSet {
            puncts: self.puncts | 1 << punct as u8,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_ident(self) -> Self {
        TokenSet {
            classes: self.classes | IDENT,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_literals(self) -> Self {
        TokenSet {
            classes: self.classes | NUMBER | STRING | CHAR,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        TokenSet {
            keywords: self.keywords | other.keywords,
            puncts: self.puncts | other.puncts,
            classes: self.classes | other.classes,
        }
    }

    pub const fn contains(&self, kind: &TokenKind) -> bool {
        match *kind {
            TokenKind::Keyword(kw) => self.keywords & (1 << kw as u8) != 0,
            TokenKind::Punct(p) => self.puncts & (1 << p as u8) != 0,
            TokenKind::Ident(_) => self.classes & IDENT != 0,
            TokenKind::Number(_) => self.classes & NUMBER != 0,
            TokenKind::Str(_) => self.classes & STRING != 0,
            TokenKind::Char(_) => self.classes & CHAR != 0,
            TokenKind::Eof => self.classes & EOF != 0,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.keywords == 0 && self.puncts == 0 && self.classes == 0
    }

    /// Member descriptions in a stable order: classes, punctuators, keywords.
    fn descriptions(&self) -> Vec<String> {
        let mut names = Vec::new();
        for (bit, name) in [
            (IDENT, "identifier"),
            (NUMBER, "number"),
            (STRING, "string literal"),
            (CHAR, "character literal"),
            (EOF, "end of input"),
        ] {
            if self.classes & bit != 0 {
                names.push(name.to_string());
            }
        }
        names.extend(
            Punct::ALL
                .iter()
                .filter(|p| self.contains(&TokenKind::Punct(**p)))
                .map(|p| format!("`{}`", p.as_str())),
        );
        names.extend(
            Keyword::ALL
                .iter()
                .filter(|kw| self.contains(&TokenKind::Keyword(**kw)))
                .map(|kw| format!("`{}`", kw.as_str())),
        );
        names
    }

    /// Human-readable list for error messages: "`,` or `;`".
    pub fn format_expected(&self) -> String {
        let names = self.descriptions();
        match names.as_slice() {
            [] => "nothing".to_string(),
            [single] => single.clone(),
            [first, second] => format!("{first} or {second}"),
            [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
        }
    }
}

/// Keywords that can only begin a decl-specifier-seq.
pub(crate) const DECL_SPECIFIER_KEYWORDS: TokenSet = TokenSet::EMPTY
    .with_keyword(Keyword::Auto)
    .with_keyword(Keyword::Bool)
    .with_keyword(Keyword::Char)
    .with_keyword(Keyword::Double)
    .with_keyword(Keyword::Float)
    .with_keyword(Keyword::Int)
    .with_keyword(Keyword::Long)
    .with_keyword(Keyword::Short)
    .with_keyword(Keyword::Signed)
    .with_keyword(Keyword::Unsigned)
    .with_keyword(Keyword::Void)
    .with_keyword(Keyword::Const)
    .with_keyword(Keyword::Volatile)
    .with_keyword(Keyword::Class)
    .with_keyword(Keyword::Struct)
    .with_keyword(Keyword::Union)
    .with_keyword(Keyword::Enum)
    .with_keyword(Keyword::Typename)
    .with_keyword(Keyword::Decltype)
    .with_keyword(Keyword::Typedef)
    .with_keyword(Keyword::Friend)
    .with_keyword(Keyword::Constexpr)
    .with_keyword(Keyword::Inline)
    .with_keyword(Keyword::Virtual)
    .with_keyword(Keyword::Explicit)
    .with_keyword(Keyword::Static)
    .with_keyword(Keyword::Extern)
    .with_keyword(Keyword::Mutable)
    .with_keyword(Keyword::ThreadLocal)
    .with_keyword(Keyword::Register)
    .with_keyword(Keyword::Alignas);

/// Tokens at which a failed declaration may hand over to the next one.
pub(crate) const DECL_START: TokenSet = DECL_SPECIFIER_KEYWORDS
    .with_keyword(Keyword::Template)
    .with_keyword(Keyword::Namespace)
    .with_keyword(Keyword::Using)
    .with_keyword(Keyword::StaticAssert);

/// Number of `{` opened but not closed in the tokens `[from, to)`.
pub(crate) fn unclosed_braces(cursor: &Cursor<'_>, from: usize, to: usize) -> usize {
    let mut depth = 0usize;
    for token in &cursor.tokens().as_slice()[from..to] {
        match token.kind {
            TokenKind::Punct(Punct::LBrace) => depth += 1,
            TokenKind::Punct(Punct::RBrace) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}

/// Skip to the end of a broken declaration.
///
/// Stops after the first `;` at brace depth zero or after the `}` that
/// brings `depth` back to zero. A `}` seen at depth zero closes an
/// enclosing body: it is left in place when `nested`, and skipped as a
/// stray brace otherwise. Returns the number of skipped tokens.
pub(crate) fn skip_declaration(cursor: &mut Cursor<'_>, mut depth: usize, nested: bool) -> usize {
    let start = cursor.position();
    while !cursor.is_at_end() {
        match cursor.current_kind() {
            TokenKind::Punct(Punct::Semi) if depth == 0 => {
                cursor.advance();
                break;
            }
            TokenKind::Punct(Punct::LBrace) => depth += 1,
            TokenKind::Punct(Punct::RBrace) => {
                if depth == 0 {
                    if !nested {
                        cursor.advance();
                    }
                    break;
                }
                depth -= 1;
                if depth == 0 {
                    cursor.advance();
                    break;
                }
            }
            _ => {}
        }
        cursor.advance();
    }
    cursor.position() - start
}

#[cfg(test)]
mod tests;
