//! Token cursor for navigating the token stream.
//!
//! Provides lookahead, consumption and expectation helpers. The only
//! mutable state is the position, plus one flag for a `>>` token whose
//! first half already closed a template argument list.

use ctruct_ir::{Keyword, Name, Position, Punct, Span, Token, TokenKind, TokenList};
use tracing::trace;

use crate::recovery::TokenSet;
use crate::ParseError;

/// A saved cursor state for [`Cursor::reset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorMark {
    pos: usize,
    split_shr: bool,
    prev_end: u32,
}

/// Cursor over a borrowed [`TokenList`].
///
/// Invariant: `pos < tokens.len()` and the last token is `Eof`, so
/// `current()` is always defined and the cursor never moves past `Eof`.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
    /// The current token is `>>` and its first `>` was consumed.
    split_shr: bool,
    /// End offset of the last consumed token.
    prev_end: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        debug_assert!(
            tokens.as_slice().last().map(|t| t.kind) == Some(TokenKind::Eof),
            "token list must end with Eof"
        );
        Cursor {
            tokens,
            pos: 0,
            split_shr: false,
            prev_end: 0,
        }
    }

    #[inline]
    pub fn tokens(&self) -> &'a TokenList {
        self.tokens
    }

    /// Index of the current token. Used for progress checks.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn mark(&self) -> CursorMark {
        CursorMark {
            pos: self.pos,
            split_shr: self.split_shr,
            prev_end: self.prev_end,
        }
    }

    pub fn reset(&mut self, mark: CursorMark) {
        debug_assert!(mark.pos < self.tokens.len(), "cursor mark out of bounds");
        self.pos = mark.pos;
        self.split_shr = mark.split_shr;
        self.prev_end = mark.prev_end;
    }

    #[inline]
    fn token_at(&self, index: usize) -> Token {
        match self.tokens.get(index) {
            Some(token) => *token,
            None => self.eof(),
        }
    }

    #[cold]
    fn eof(&self) -> Token {
        let end = self.tokens.as_slice().last().map_or(0, |t| t.span.end);
        Token::new(TokenKind::Eof, Span::point(end), Position::default())
    }

    /// The current token. The second half of a split `>>` reads as `>`.
    #[inline]
    pub fn current(&self) -> Token {
        let token = self.token_at(self.pos);
        if self.split_shr {
            let position = Position::new(
                token.position.line,
                token.position.column + 1,
                token.position.offset + 1,
            );
            Token::new(
                TokenKind::Punct(Punct::Gt),
                Span::new(token.span.start + 1, token.span.end),
                position,
            )
        } else {
            token
        }
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span ending where the last consumed token ended.
    #[inline]
    pub fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.prev_end.max(start.start))
    }

    /// End offset of the last consumed token.
    #[inline]
    pub fn previous_end(&self) -> u32 {
        self.prev_end
    }

    /// Token kind `n` tokens ahead; `peek(0)` is the current token.
    #[inline]
    pub fn peek(&self, n: usize) -> TokenKind {
        if n == 0 {
            self.current_kind()
        } else {
            self.token_at(self.pos + n).kind
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check_punct(&self, punct: Punct) -> bool {
        self.current_kind() == TokenKind::Punct(punct)
    }

    #[inline]
    pub fn check_keyword(&self, kw: Keyword) -> bool {
        self.current_kind() == TokenKind::Keyword(kw)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        self.current_kind().is_ident()
    }

    #[inline]
    pub fn check_set(&self, set: &TokenSet) -> bool {
        set.contains(&self.current_kind())
    }

    /// `[[` opening an attribute specifier.
    #[inline]
    pub fn at_attribute_open(&self) -> bool {
        self.check_punct(Punct::LBracket) && self.peek(1) == TokenKind::Punct(Punct::LBracket)
    }

    /// Scan a qualified name starting `n` tokens ahead without parsing it.
    ///
    /// Template argument lists are skipped by counting brackets. Returns
    /// the peek offset of the first token after the name, or `None` when no
    /// name starts there or an argument list is unbalanced.
    pub fn scan_qualified_name(&self, n: usize) -> Option<usize> {
        let mut i = n;
        if self.peek(i) == TokenKind::Punct(Punct::ColonColon) {
            i += 1;
        }
        loop {
            if !self.peek(i).is_ident() {
                return None;
            }
            i += 1;
            if self.peek(i) == TokenKind::Punct(Punct::Lt) {
                i = self.scan_template_args(i)?;
            }
            if self.peek(i) == TokenKind::Punct(Punct::ColonColon) && self.peek(i + 1).is_ident() {
                i += 1;
            } else {
                return Some(i);
            }
        }
    }

    /// From the `<` at offset `n`, the offset just past the matching `>`.
    ///
    /// A `<` opens a nested list only after an identifier, and `>` counts
    /// only outside parentheses, brackets and braces. A `>>` closing the
    /// last open list ends the scan on itself, where the parser splits it.
    fn scan_template_args(&self, n: usize) -> Option<usize> {
        let mut angles = 0usize;
        let mut nesting = 0usize;
        let mut i = n;
        loop {
            match self.peek(i) {
                TokenKind::Eof | TokenKind::Punct(Punct::Semi) => return None,
                TokenKind::Punct(Punct::Lt) if nesting == 0 && self.peek(i - 1).is_ident() => {
                    angles += 1;
                }
                TokenKind::Punct(Punct::Gt) if nesting == 0 => {
                    angles -= 1;
                    if angles == 0 {
                        return Some(i + 1);
                    }
                }
                TokenKind::Punct(Punct::Shr) if nesting == 0 => {
                    if angles == 1 {
                        return Some(i);
                    }
                    angles -= 2;
                    if angles == 0 {
                        return Some(i + 1);
                    }
                }
                TokenKind::Punct(Punct::LParen | Punct::LBracket | Punct::LBrace) => nesting += 1,
                TokenKind::Punct(Punct::RParen | Punct::RBracket | Punct::RBrace) => {
                    nesting = nesting.checked_sub(1)?;
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// Consume the current token and return it. Stays put at `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            trace!(kind = ?token.kind, pos = self.pos, "consume");
            self.prev_end = token.span.end;
            self.pos += 1;
            self.split_shr = false;
        }
        token
    }

    pub fn eat_punct(&mut self, punct: Punct) -> bool {
        let matched = self.check_punct(punct);
        if matched {
            self.advance();
        }
        matched
    }

    pub fn eat_keyword(&mut self, kw: Keyword) -> bool {
        let matched = self.check_keyword(kw);
        if matched {
            self.advance();
        }
        matched
    }

    pub fn eat_ident(&mut self) -> Option<Name> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                self.advance();
                Some(name)
            }
            _ => None,
        }
    }

    pub fn expect_punct(&mut self, punct: Punct) -> Result<Token, ParseError> {
        if self.check_punct(punct) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(TokenSet::EMPTY.with_punct(punct), None))
        }
    }

    pub fn expect_keyword(&mut self, kw: Keyword) -> Result<Token, ParseError> {
        if self.check_keyword(kw) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(TokenSet::EMPTY.with_keyword(kw), None))
        }
    }

    pub fn expect_ident(&mut self) -> Result<Name, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.error_expected(TokenSet::EMPTY.with_ident(), None)),
        }
    }

    /// Consume a `>` closing a template list, splitting `>>` in two.
    pub fn expect_template_close(&mut self) -> Result<(), ParseError> {
        match self.current_kind() {
            TokenKind::Punct(Punct::Gt) => {
                self.advance();
                Ok(())
            }
            TokenKind::Punct(Punct::Shr) => {
                let token = self.current();
                trace!(pos = self.pos, "split `>>`");
                self.prev_end = token.span.start + 1;
                self.split_shr = true;
                Ok(())
            }
            _ => Err(self.error_expected(TokenSet::EMPTY.with_punct(Punct::Gt), None)),
        }
    }

    /// Source spelling of a token.
    pub fn text(&self, kind: &TokenKind) -> &'a str {
        self.tokens.text(kind)
    }

    /// User-facing description of a token: "identifier `x`", "`;`".
    pub fn describe(&self, token: &Token) -> String {
        match token.kind {
            TokenKind::Ident(_) | TokenKind::Number(_) | TokenKind::Str(_) | TokenKind::Char(_) => {
                format!("{} `{}`", token.kind.display_name(), self.text(&token.kind))
            }
            _ => token.kind.display_name(),
        }
    }

    /// Build an error for the current token without consuming it.
    #[cold]
    pub fn error_expected(&self, expected: TokenSet, item: Option<&'static str>) -> ParseError {
        let found = self.current();
        ParseError::unexpected(found, self.describe(&found), expected, item)
    }
}
