//! Lexer error types.

use std::fmt;

use ctruct_ir::{Position, Span};

/// Which literal was left open.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LiteralKind {
    String,
    Char,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LiteralKind::String => "string",
            LiteralKind::Char => "character",
        })
    }
}

/// A tokenizer failure. Tokenizing stops at the first one.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexError {
    /// A string or character literal reaches end of line without closing.
    #[error("{position}: unterminated {kind} literal")]
    UnterminatedLiteral {
        kind: LiteralKind,
        span: Span,
        position: Position,
    },

    /// A character that starts no token.
    #[error("{position}: invalid character {ch:?}")]
    InvalidCharacter {
        ch: char,
        span: Span,
        position: Position,
    },

    /// `/*` without a matching `*/`.
    #[error("{position}: unterminated block comment")]
    UnterminatedComment { span: Span, position: Position },

    /// Source longer than a `u32` byte offset can address.
    #[error("source is {len} bytes, max is {}", u32::MAX)]
    SourceTooLarge { len: usize },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedLiteral { span, .. }
            | LexError::InvalidCharacter { span, .. }
            | LexError::UnterminatedComment { span, .. } => *span,
            LexError::SourceTooLarge { .. } => Span::DUMMY,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            LexError::UnterminatedLiteral { position, .. }
            | LexError::InvalidCharacter { position, .. }
            | LexError::UnterminatedComment { position, .. } => Some(*position),
            LexError::SourceTooLarge { .. } => None,
        }
    }
}
