//! Attribute specifiers: `[[...]]` lists and `alignas(...)`.
//!
//! Attribute arguments are not interpreted. The balanced tokens between
//! the argument parentheses are captured as a [`TokenCapture`].

use ctruct_ir::ast::{AlignasArg, Attribute, AttributeSpecifier, AttributeSpecifierKind};
use ctruct_ir::{Keyword, Name, Punct, TokenCapture, TokenKind};
use smallvec::{smallvec, SmallVec};

use crate::context::ParseContext;
use crate::recovery::TokenSet;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Zero or more attribute specifiers.
    pub(crate) fn parse_attribute_specifiers(
        &mut self,
    ) -> Result<Vec<AttributeSpecifier>, ParseError> {
        let mut specs = Vec::new();
        loop {
            if self.cursor.at_attribute_open() {
                specs.push(self.parse_attribute_list()?);
            } else if self.cursor.check_keyword(Keyword::Alignas) {
                specs.push(self.parse_alignas()?);
            } else {
                return Ok(specs);
            }
        }
    }

    /// `[[ (using ns :)? attr (, attr)* ]]`
    fn parse_attribute_list(&mut self) -> Result<AttributeSpecifier, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.advance();
        self.cursor.advance();

        let using_scope = if self.cursor.eat_keyword(Keyword::Using) {
            let scope = self.cursor.expect_ident()?;
            self.cursor.expect_punct(Punct::Colon)?;
            Some(scope)
        } else {
            None
        };

        let mut attrs = Vec::new();
        loop {
            if self.cursor.eat_punct(Punct::Comma) {
                continue;
            }
            if self.cursor.check_punct(Punct::RBracket) {
                break;
            }
            attrs.push(
                self.parse_attribute(using_scope)
                    .map_err(|e| e.in_context("attribute"))?,
            );
            if !self.cursor.check_punct(Punct::RBracket) {
                self.cursor.expect_punct(Punct::Comma)?;
            }
        }
        self.cursor.expect_punct(Punct::RBracket)?;
        self.cursor.expect_punct(Punct::RBracket)?;

        Ok(AttributeSpecifier {
            kind: AttributeSpecifierKind::List(attrs),
            span: self.cursor.span_from(start),
        })
    }

    fn parse_attribute(&mut self, using_scope: Option<Name>) -> Result<Attribute, ParseError> {
        let start = self.cursor.current_span();
        let first = self.cursor.expect_ident()?;
        let (scope, name) = if self.cursor.eat_punct(Punct::ColonColon) {
            (Some(first), self.cursor.expect_ident()?)
        } else {
            (using_scope, first)
        };
        let args = if self.cursor.check_punct(Punct::LParen) {
            Some(self.parse_balanced_tokens()?)
        } else {
            None
        };
        let pack = self.cursor.eat_punct(Punct::Ellipsis);
        Ok(Attribute {
            scope,
            name,
            args,
            pack,
            span: self.cursor.span_from(start),
        })
    }

    /// Consume `( balanced-tokens )` and capture the tokens inside.
    fn parse_balanced_tokens(&mut self) -> Result<TokenCapture, ParseError> {
        let open = self.cursor.position();
        let mut closers: SmallVec<[Punct; 8]> = smallvec![Punct::RParen];
        self.cursor.advance();
        loop {
            let expected = closers.last().copied().unwrap_or(Punct::RParen);
            match self.cursor.current_kind() {
                TokenKind::Eof => {
                    return Err(self
                        .cursor
                        .error_expected(TokenSet::EMPTY.with_punct(expected), None)
                        .in_context("attribute argument"));
                }
                TokenKind::Punct(Punct::LParen) => closers.push(Punct::RParen),
                TokenKind::Punct(Punct::LBracket) => closers.push(Punct::RBracket),
                TokenKind::Punct(Punct::LBrace) => closers.push(Punct::RBrace),
                TokenKind::Punct(close @ (Punct::RParen | Punct::RBracket | Punct::RBrace)) => {
                    if close != expected {
                        return Err(self
                            .cursor
                            .error_expected(TokenSet::EMPTY.with_punct(expected), None)
                            .in_context("attribute argument"));
                    }
                    closers.pop();
                    if closers.is_empty() {
                        let end = self.cursor.position();
                        self.cursor.advance();
                        return Ok(TokenCapture::new(open as u32 + 1, end as u32));
                    }
                }
                _ => {}
            }
            self.cursor.advance();
        }
    }

    /// `alignas ( type-id ...? )` or `alignas ( expr ...? )`
    fn parse_alignas(&mut self) -> Result<AttributeSpecifier, ParseError> {
        let start = self.cursor.advance().span;
        self.cursor.expect_punct(Punct::LParen)?;
        let arg = self.without_context(ParseContext::NO_GREATER, |p| {
            if p.starts_type_id() {
                let ty = p.try_parse(|p| {
                    let ty = p.parse_type_id()?;
                    if p.cursor.check_punct(Punct::RParen) || p.cursor.check_punct(Punct::Ellipsis)
                    {
                        Ok(ty)
                    } else {
                        Err(p.cursor.error_expected(
                            TokenSet::EMPTY.with_punct(Punct::RParen),
                            None,
                        ))
                    }
                });
                if let Some(ty) = ty {
                    return Ok(AlignasArg::Type(ty));
                }
            }
            Ok::<_, ParseError>(AlignasArg::Expr(p.parse_expr()?))
        })?;
        let pack = self.cursor.eat_punct(Punct::Ellipsis);
        self.cursor
            .expect_punct(Punct::RParen)
            .map_err(|e| e.in_context("alignas specifier"))?;
        Ok(AttributeSpecifier {
            kind: AttributeSpecifierKind::Alignas { arg, pack },
            span: self.cursor.span_from(start),
        })
    }
}
