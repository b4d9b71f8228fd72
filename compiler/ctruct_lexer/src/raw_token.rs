//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! keyword classification and string interning.

use logos::Logos;

/// Errors logos can produce on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum RawError {
    #[default]
    InvalidCharacter,
    UnterminatedComment,
}

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = RawError)]
#[logos(skip r"[ \t\r\n\f\v]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    /// `#include`, `#define`, ... up to end of line, including lines
    /// joined by a trailing backslash. Only valid at the start of a line.
    #[regex(r"#([^\\\n]|\\(\r?\n)?)*")]
    Directive,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Number,

    /// Optional encoding prefix: `L"..."`, `u8"..."`.
    #[regex(r#"(u8|[LuU])?"([^"\\\n]|\\.)*""#)]
    Str,

    /// No closing quote before end of line.
    #[regex(r#"(u8|[LuU])?"([^"\\\n]|\\.)*"#)]
    UnterminatedStr,

    #[regex(r"(u8|[LuU])?'([^'\\\n]|\\.)*'")]
    Char,

    #[regex(r"(u8|[LuU])?'([^'\\\n]|\\.)*")]
    UnterminatedChar,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,
    #[token("?")]
    Question,

    #[token("*=")]
    StarEq,
    #[token("*")]
    Star,
    #[token("&&")]
    AmpAmp,
    #[token("&=")]
    AmpEq,
    #[token("&")]
    Amp,
    #[token("++")]
    PlusPlus,
    #[token("+=")]
    PlusEq,
    #[token("+")]
    Plus,
    #[token("--")]
    MinusMinus,
    #[token("-=")]
    MinusEq,
    #[token("-")]
    Minus,
    #[token("/=")]
    SlashEq,
    #[token("/")]
    Slash,
    #[token("%=")]
    PercentEq,
    #[token("%")]
    Percent,
    #[token("<<=")]
    ShlEq,
    #[token("<<")]
    Shl,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">>=")]
    ShrEq,
    #[token(">>")]
    Shr,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("^=")]
    CaretEq,
    #[token("^")]
    Caret,
    #[token("||")]
    PipePipe,
    #[token("|=")]
    PipeEq,
    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,
}

/// Consume a block comment body up to and including `*/`.
fn block_comment(lex: &mut logos::Lexer<'_, RawToken>) -> Result<(), RawError> {
    let rest = lex.remainder().as_bytes();
    match memchr::memmem::find(rest, b"*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            lex.bump(rest.len());
            Err(RawError::UnterminatedComment)
        }
    }
}
