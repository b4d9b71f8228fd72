//! Qualified names and template argument lists.

use ctruct_ir::ast::{NameSegment, QualifiedName, TemplateArg};
use ctruct_ir::{Keyword, Punct, TokenKind};
use smallvec::SmallVec;

use crate::context::ParseContext;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `::opt segment (:: segment)*`. A trailing `::` not followed by an
    /// identifier is left for the caller (`C::*`).
    pub(crate) fn parse_qualified_name(&mut self) -> Result<QualifiedName, ParseError> {
        let start = self.cursor.current_span();
        let global = self.cursor.eat_punct(Punct::ColonColon);
        let mut segments = SmallVec::new();
        loop {
            segments.push(self.parse_name_segment()?);
            if self.cursor.check_punct(Punct::ColonColon) && self.cursor.peek(1).is_ident() {
                self.cursor.advance();
            } else {
                break;
            }
        }
        Ok(QualifiedName {
            global,
            segments,
            span: self.cursor.span_from(start),
        })
    }

    fn parse_name_segment(&mut self) -> Result<NameSegment, ParseError> {
        let start = self.cursor.current_span();
        let ident = self.cursor.expect_ident()?;
        let template_args = if self.cursor.check_punct(Punct::Lt) {
            Some(self.parse_template_args()?)
        } else {
            None
        };
        Ok(NameSegment {
            ident,
            template_args,
            span: self.cursor.span_from(start),
        })
    }

    /// `< (arg (, arg)*)? >`, where `>>` may close two lists at once.
    fn parse_template_args(&mut self) -> Result<Vec<TemplateArg>, ParseError> {
        self.cursor.expect_punct(Punct::Lt)?;
        let args = self.with_context(ParseContext::NO_GREATER, |p| {
            let mut args = Vec::new();
            if p.at_template_close() {
                return Ok(args);
            }
            loop {
                args.push(p.parse_template_arg()?);
                if !p.cursor.eat_punct(Punct::Comma) {
                    break;
                }
            }
            Ok::<_, ParseError>(args)
        })?;
        self.cursor
            .expect_template_close()
            .map_err(|e| e.in_context("template argument list"))?;
        Ok(args)
    }

    pub(crate) fn at_template_close(&self) -> bool {
        self.cursor.check_punct(Punct::Gt) || self.cursor.check_punct(Punct::Shr)
    }

    /// A type-id when one parses up to `,` or `>`, otherwise an expression.
    fn parse_template_arg(&mut self) -> Result<TemplateArg, ParseError> {
        if self.starts_type_id() {
            let ty = self.try_parse(|p| {
                let ty = p.parse_type_id()?;
                if p.at_template_close() || p.cursor.check_punct(Punct::Comma) {
                    Ok(ty)
                } else {
                    Err(p.cursor.error_expected(
                        crate::TokenSet::EMPTY
                            .with_punct(Punct::Comma)
                            .with_punct(Punct::Gt),
                        None,
                    ))
                }
            });
            if let Some(ty) = ty {
                return Ok(TemplateArg::Type(ty));
            }
        }
        Ok(TemplateArg::Expr(self.parse_expr()?))
    }

    /// Whether the current token can begin a type-id.
    pub(crate) fn starts_type_id(&self) -> bool {
        match self.cursor.current_kind() {
            TokenKind::Ident(_) | TokenKind::Punct(Punct::ColonColon) => true,
            TokenKind::Keyword(kw) => {
                kw.is_builtin_type()
                    || matches!(
                        kw,
                        Keyword::Const
                            | Keyword::Volatile
                            | Keyword::Class
                            | Keyword::Struct
                            | Keyword::Union
                            | Keyword::Enum
                            | Keyword::Typename
                            | Keyword::Decltype
                    )
            }
            _ => false,
        }
    }
}
