//! Tokenizer for ctruct using logos with string interning.
//!
//! Whitespace, comments and preprocessor directive lines are trivia and
//! never reach the token list. A directive must be the first token on its
//! line. The result always ends with `Eof`.

mod lex_error;
mod line_index;
mod raw_token;

use logos::Logos;
use tracing::debug;

use ctruct_ir::{Keyword, Punct, Span, StringInterner, Token, TokenKind, TokenList};

pub use lex_error::{LexError, LiteralKind};
use line_index::LineIndex;
use raw_token::{RawError, RawToken};

/// Tokenize a complete source text.
///
/// Pure: every call starts from a fresh interner and retains no state.
///
/// # Errors
/// Returns the first [`LexError`] encountered.
pub fn tokenize(source: &str) -> Result<TokenList, LexError> {
    if u32::try_from(source.len()).is_err() {
        return Err(LexError::SourceTooLarge { len: source.len() });
    }

    let mut lines = LineIndex::new(source);
    let mut interner = StringInterner::new();
    let mut raw_tokens = Vec::with_capacity(source.len() / 4);
    let mut lexer = RawToken::lexer(source);
    // Line of the last emitted token; 0 before the first.
    let mut last_line = 0;

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(range.start as u32, range.end as u32);
        let position = lines.position(span.start);
        let slice = lexer.slice();

        let raw = match result {
            Ok(raw) => raw,
            Err(RawError::UnterminatedComment) => {
                return Err(LexError::UnterminatedComment { span, position });
            }
            Err(RawError::InvalidCharacter) => {
                let ch = slice.chars().next().unwrap_or('\0');
                return Err(LexError::InvalidCharacter { ch, span, position });
            }
        };

        let kind = match raw {
            RawToken::Directive if position.line == last_line => {
                return Err(LexError::InvalidCharacter {
                    ch: '#',
                    span: Span::new(span.start, span.start + 1),
                    position,
                });
            }
            RawToken::LineComment | RawToken::BlockComment | RawToken::Directive => continue,
            RawToken::UnterminatedStr => {
                return Err(LexError::UnterminatedLiteral {
                    kind: LiteralKind::String,
                    span,
                    position,
                });
            }
            RawToken::UnterminatedChar => {
                return Err(LexError::UnterminatedLiteral {
                    kind: LiteralKind::Char,
                    span,
                    position,
                });
            }
            RawToken::Ident => match Keyword::lookup(slice) {
                Some(kw) => TokenKind::Keyword(kw),
                None => TokenKind::Ident(interner.intern(slice)),
            },
            RawToken::Number => TokenKind::Number(interner.intern(slice)),
            RawToken::Str => TokenKind::Str(interner.intern(slice)),
            RawToken::Char => TokenKind::Char(interner.intern(slice)),
            other => TokenKind::Punct(convert_punct(other)),
        };
        last_line = position.line;
        raw_tokens.push(Token::new(kind, span, position));
    }

    let end = source.len() as u32;
    let mut tokens = TokenList::with_capacity(raw_tokens.len() + 1, interner);
    for token in raw_tokens {
        tokens.push(token);
    }
    tokens.push(Token::new(TokenKind::Eof, Span::point(end), lines.position(end)));

    debug!(tokens = tokens.len(), bytes = source.len(), "tokenized");
    Ok(tokens)
}

/// Map a punctuator raw token to its `Punct`.
///
/// Only called with punctuator variants; the others map to `Semi` and are
/// filtered before reaching here.
fn convert_punct(raw: RawToken) -> Punct {
    match raw {
        RawToken::LParen => Punct::LParen,
        RawToken::RParen => Punct::RParen,
        RawToken::LBrace => Punct::LBrace,
        RawToken::RBrace => Punct::RBrace,
        RawToken::LBracket => Punct::LBracket,
        RawToken::RBracket => Punct::RBracket,
        RawToken::Comma => Punct::Comma,
        RawToken::ColonColon => Punct::ColonColon,
        RawToken::Colon => Punct::Colon,
        RawToken::Arrow => Punct::Arrow,
        RawToken::Ellipsis => Punct::Ellipsis,
        RawToken::Dot => Punct::Dot,
        RawToken::Question => Punct::Question,
        RawToken::StarEq => Punct::StarEq,
        RawToken::Star => Punct::Star,
        RawToken::AmpAmp => Punct::AmpAmp,
        RawToken::AmpEq => Punct::AmpEq,
        RawToken::Amp => Punct::Amp,
        RawToken::PlusPlus => Punct::PlusPlus,
        RawToken::PlusEq => Punct::PlusEq,
        RawToken::Plus => Punct::Plus,
        RawToken::MinusMinus => Punct::MinusMinus,
        RawToken::MinusEq => Punct::MinusEq,
        RawToken::Minus => Punct::Minus,
        RawToken::SlashEq => Punct::SlashEq,
        RawToken::Slash => Punct::Slash,
        RawToken::PercentEq => Punct::PercentEq,
        RawToken::Percent => Punct::Percent,
        RawToken::ShlEq => Punct::ShlEq,
        RawToken::Shl => Punct::Shl,
        RawToken::LtEq => Punct::LtEq,
        RawToken::Lt => Punct::Lt,
        RawToken::ShrEq => Punct::ShrEq,
        RawToken::Shr => Punct::Shr,
        RawToken::GtEq => Punct::GtEq,
        RawToken::Gt => Punct::Gt,
        RawToken::EqEq => Punct::EqEq,
        RawToken::Eq => Punct::Eq,
        RawToken::NotEq => Punct::NotEq,
        RawToken::Bang => Punct::Bang,
        RawToken::CaretEq => Punct::CaretEq,
        RawToken::Caret => Punct::Caret,
        RawToken::PipePipe => Punct::PipePipe,
        RawToken::PipeEq => Punct::PipeEq,
        RawToken::Pipe => Punct::Pipe,
        RawToken::Tilde => Punct::Tilde,
        RawToken::Semi
        | RawToken::LineComment
        | RawToken::BlockComment
        | RawToken::Directive
        | RawToken::Ident
        | RawToken::Number
        | RawToken::Str
        | RawToken::UnterminatedStr
        | RawToken::Char
        | RawToken::UnterminatedChar => Punct::Semi,
    }
}

#[cfg(test)]
mod tests;
