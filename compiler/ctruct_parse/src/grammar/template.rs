//! Template parameter lists.

use ctruct_ir::ast::{TemplateParam, TemplateParamKind, TypeParamKey};
use ctruct_ir::{Keyword, Punct, TokenKind};

use crate::context::ParseContext;
use crate::recovery::TokenSet;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `< (param (, param)*)? >`. A bare `>` ends a default argument.
    pub(crate) fn parse_template_params(&mut self) -> Result<Vec<TemplateParam>, ParseError> {
        self.cursor.expect_punct(Punct::Lt)?;
        let params = self.with_context(ParseContext::NO_GREATER, |p| {
            let mut params = Vec::new();
            if p.at_template_close() {
                return Ok(params);
            }
            loop {
                params.push(p.parse_template_param()?);
                if !p.cursor.eat_punct(Punct::Comma) {
                    break;
                }
            }
            Ok::<_, ParseError>(params)
        })?;
        self.cursor
            .expect_template_close()
            .map_err(|e| e.in_context("template parameter list"))?;
        Ok(params)
    }

    fn parse_template_param(&mut self) -> Result<TemplateParam, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Keyword(Keyword::Class | Keyword::Typename) if self.at_type_parameter() => {
                self.parse_type_param()?
            }
            TokenKind::Keyword(Keyword::Template) => self.parse_template_template_param()?,
            _ => TemplateParamKind::NonType(self.parse_parameter()?),
        };
        Ok(TemplateParam {
            kind,
            span: self.cursor.span_from(start),
        })
    }

    /// `class T`, `typename... Ts`, `class = int`; not `typename T::type N`.
    fn at_type_parameter(&self) -> bool {
        let ends_param = |kind: TokenKind| {
            matches!(
                kind,
                TokenKind::Punct(Punct::Comma | Punct::Gt | Punct::Shr | Punct::Eq)
            )
        };
        match self.cursor.peek(1) {
            TokenKind::Punct(Punct::Ellipsis) => true,
            TokenKind::Ident(_) => ends_param(self.cursor.peek(2)),
            kind => ends_param(kind),
        }
    }

    fn parse_type_param(&mut self) -> Result<TemplateParamKind, ParseError> {
        let key = if self.cursor.advance().kind == TokenKind::Keyword(Keyword::Class) {
            TypeParamKey::Class
        } else {
            TypeParamKey::Typename
        };
        let pack = self.cursor.eat_punct(Punct::Ellipsis);
        let name = self.cursor.eat_ident();
        let default = if self.cursor.eat_punct(Punct::Eq) {
            Some(self.parse_type_id()?)
        } else {
            None
        };
        Ok(TemplateParamKind::Type {
            key,
            pack,
            name,
            default,
        })
    }

    /// `template < params > class ...? name? (= id-expression)?`
    fn parse_template_template_param(&mut self) -> Result<TemplateParamKind, ParseError> {
        self.cursor.advance();
        let params = self.parse_template_params()?;
        if !(self.cursor.eat_keyword(Keyword::Class) || self.cursor.eat_keyword(Keyword::Typename))
        {
            return Err(self
                .cursor
                .error_expected(
                    TokenSet::EMPTY
                        .with_keyword(Keyword::Class)
                        .with_keyword(Keyword::Typename),
                    None,
                )
                .in_context("template template parameter"));
        }
        let pack = self.cursor.eat_punct(Punct::Ellipsis);
        let name = self.cursor.eat_ident();
        let default = if self.cursor.eat_punct(Punct::Eq) {
            Some(self.parse_qualified_name()?)
        } else {
            None
        };
        Ok(TemplateParamKind::Template {
            params,
            pack,
            name,
            default,
        })
    }
}
