//! Parse error types.

use std::fmt;

use ctruct_ir::{Position, Span, Token, TokenKind};

use crate::recovery::TokenSet;

/// What kind of syntax error occurred.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SyntaxErrorKind {
    /// A token that no production accepts here.
    UnexpectedToken,
    /// Input ended inside a construct.
    UnexpectedEndOfInput,
    /// A declarator without any type specifier that does not declare a
    /// function: neither a declaration nor a complete expression.
    AmbiguousDeclaration,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SyntaxErrorKind::UnexpectedToken => "unexpected token",
            SyntaxErrorKind::UnexpectedEndOfInput => "unexpected end of input",
            SyntaxErrorKind::AmbiguousDeclaration => "ambiguous declaration",
        })
    }
}

/// A syntax error. Immutable once built.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{position}: {message}")]
pub struct ParseError {
    pub kind: SyntaxErrorKind,
    pub message: String,
    pub span: Span,
    pub position: Position,
    /// Tokens that would have been accepted.
    pub expected: TokenSet,
    /// Non-token expectation such as "expression" or "declarator".
    pub expected_item: Option<&'static str>,
    pub found: Token,
    /// The found token as shown to users: "identifier `b`".
    pub found_desc: String,
    /// The construct being parsed.
    pub context: Option<&'static str>,
}

impl ParseError {
    /// An unexpected-token error at `found`.
    ///
    /// Reported as `UnexpectedEndOfInput` when `found` is `Eof`.
    #[cold]
    pub fn unexpected(
        found: Token,
        found_desc: String,
        expected: TokenSet,
        expected_item: Option<&'static str>,
    ) -> Self {
        let kind = if found.kind == TokenKind::Eof {
            SyntaxErrorKind::UnexpectedEndOfInput
        } else {
            SyntaxErrorKind::UnexpectedToken
        };
        let wanted = match (expected_item, expected.is_empty()) {
            (Some(item), true) => item.to_string(),
            (Some(item), false) => format!("{item} or {}", expected.format_expected()),
            (None, _) => expected.format_expected(),
        };
        ParseError {
            kind,
            message: format!("expected {wanted}, found {found_desc}"),
            span: found.span,
            position: found.position,
            expected,
            expected_item,
            found,
            found_desc,
            context: None,
        }
    }

    /// A declarator with no type specifier that is not a function.
    #[cold]
    pub fn ambiguous_declaration(found: Token, found_desc: String, span: Span) -> Self {
        ParseError {
            kind: SyntaxErrorKind::AmbiguousDeclaration,
            message: "declaration has no type specifier and does not declare a function"
                .to_string(),
            span,
            position: found.position,
            expected: TokenSet::EMPTY,
            expected_item: Some("type specifier"),
            found,
            found_desc,
            context: None,
        }
    }

    /// Attach the construct being parsed, keeping the innermost one.
    #[must_use]
    pub fn in_context(mut self, context: &'static str) -> Self {
        if self.context.is_none() {
            self.context = Some(context);
            self.message = format!("{} (while parsing {context})", self.message);
        }
        self
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind == SyntaxErrorKind::UnexpectedEndOfInput
    }
}

#[cfg(test)]
mod tests;
