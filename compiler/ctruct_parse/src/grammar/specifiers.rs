//! Decl-specifier sequences and type-ids.
//!
//! A name can be the type specifier or the declarator-id. Without symbol
//! tables the choice is syntactic: in declarations the name is a type only
//! when something declarator-shaped follows it; in parameters and type-ids
//! the first name is always the type.

use ctruct_ir::ast::{
    BuiltinType, CvQualifiers, DeclFlags, DeclSpecifiers, ElaboratedKey, SpecifierWord, Type,
    TypeKind, TypeName,
};
use ctruct_ir::{Keyword, Punct, Span, TokenKind, TypeId};
use smallvec::SmallVec;

use crate::context::ParseContext;
use crate::grammar::DeclaratorMode;
use crate::recovery::TokenSet;
use crate::{ParseError, Parser};

/// Where a decl-specifier-seq appears.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SpecifierMode {
    /// Namespace-scope and block-scope declarations.
    Declaration,
    /// Function and template parameters.
    Parameter,
    /// Type-ids: no storage classes or function specifiers.
    TypeId,
}

const TYPE_START: TokenSet = TokenSet::EMPTY
    .with_ident()
    .with_punct(Punct::ColonColon)
    .with_keyword(Keyword::Int)
    .with_keyword(Keyword::Auto)
    .with_keyword(Keyword::Void)
    .with_keyword(Keyword::Typename)
    .with_keyword(Keyword::Decltype);

impl Parser<'_> {
    pub(crate) fn parse_decl_specifiers(
        &mut self,
        mode: SpecifierMode,
    ) -> Result<DeclSpecifiers, ParseError> {
        let start = self.cursor.current_span();
        let mut specs = DeclSpecifiers::default();
        let mut builtins: SmallVec<[BuiltinType; 2]> = SmallVec::new();
        let mut builtin_span: Option<Span> = None;
        let mut named: Option<TypeId> = None;

        loop {
            let token = self.cursor.current();
            match token.kind {
                TokenKind::Keyword(kw) => {
                    if let Some(flag) = DeclFlags::from_keyword(kw) {
                        if mode == SpecifierMode::TypeId {
                            break;
                        }
                        specs.flags |= flag;
                        specs.order.push(SpecifierWord::Flag(flag));
                        self.cursor.advance();
                        continue;
                    }
                    match kw {
                        Keyword::Const | Keyword::Volatile => {
                            let cv = if kw == Keyword::Const {
                                CvQualifiers::CONST
                            } else {
                                CvQualifiers::VOLATILE
                            };
                            specs.cv |= cv;
                            specs.order.push(SpecifierWord::Cv(cv));
                            self.cursor.advance();
                        }
                        Keyword::Alignas if mode != SpecifierMode::TypeId => {
                            let attrs = self.parse_attribute_specifiers()?;
                            specs.push_attributes(attrs);
                        }
                        Keyword::Class
                        | Keyword::Struct
                        | Keyword::Union
                        | Keyword::Enum
                        | Keyword::Typename
                            if named.is_none() && builtins.is_empty() =>
                        {
                            named = Some(self.parse_elaborated_type()?);
                            specs.order.push(SpecifierWord::Type);
                        }
                        Keyword::Decltype if named.is_none() && builtins.is_empty() => {
                            named = Some(self.parse_decltype()?);
                            specs.order.push(SpecifierWord::Type);
                        }
                        _ => match BuiltinType::from_keyword(kw) {
                            Some(builtin) if named.is_none() => {
                                builtins.push(builtin);
                                specs.order.push(SpecifierWord::Builtin(builtin));
                                builtin_span = Some(match builtin_span {
                                    Some(span) => span.merge(token.span),
                                    None => token.span,
                                });
                                self.cursor.advance();
                            }
                            _ => break,
                        },
                    }
                }
                TokenKind::Punct(Punct::LBracket)
                    if mode != SpecifierMode::TypeId && self.cursor.at_attribute_open() =>
                {
                    let attrs = self.parse_attribute_specifiers()?;
                    specs.push_attributes(attrs);
                }
                TokenKind::Ident(_) | TokenKind::Punct(Punct::ColonColon)
                    if named.is_none() && builtins.is_empty() && self.name_is_type(mode) =>
                {
                    let name = self.parse_qualified_name()?;
                    let span = name.span;
                    named = Some(self.arena.alloc_type(Type {
                        kind: TypeKind::Named(name),
                        span,
                    }));
                    specs.order.push(SpecifierWord::Type);
                }
                _ => break,
            }
        }

        specs.ty = match (named, builtin_span) {
            (Some(ty), _) => Some(ty),
            (None, Some(span)) => Some(self.arena.alloc_type(Type {
                kind: TypeKind::Builtin(builtins),
                span,
            })),
            (None, None) => None,
        };
        specs.span = if self.cursor.previous_end() > start.start {
            self.cursor.span_from(start)
        } else {
            Span::point(start.start)
        };
        Ok(specs)
    }

    /// Whether the qualified name at the cursor is a type specifier.
    fn name_is_type(&self, mode: SpecifierMode) -> bool {
        if mode != SpecifierMode::Declaration {
            return true;
        }
        let Some(end) = self.cursor.scan_qualified_name(0) else {
            return false;
        };
        match self.cursor.peek(end) {
            TokenKind::Ident(_)
            | TokenKind::Keyword(Keyword::Const | Keyword::Volatile)
            | TokenKind::Punct(Punct::Star | Punct::Amp | Punct::AmpAmp | Punct::Ellipsis) => true,
            // `T C::* p`
            TokenKind::Punct(Punct::ColonColon) => self.cursor.peek(end + 1).is_ident(),
            // `T (*fp)()`, `T (&r)[3]`
            TokenKind::Punct(Punct::LParen) => matches!(
                self.cursor.peek(end + 1),
                TokenKind::Punct(Punct::Star | Punct::Amp | Punct::AmpAmp)
            ),
            _ => false,
        }
    }

    /// `class-key qualified-name`, `typename qualified-name`
    fn parse_elaborated_type(&mut self) -> Result<TypeId, ParseError> {
        let token = self.cursor.advance();
        let key = match token.kind {
            TokenKind::Keyword(Keyword::Class) => ElaboratedKey::Class,
            TokenKind::Keyword(Keyword::Struct) => ElaboratedKey::Struct,
            TokenKind::Keyword(Keyword::Union) => ElaboratedKey::Union,
            TokenKind::Keyword(Keyword::Enum) => ElaboratedKey::Enum,
            _ => ElaboratedKey::Typename,
        };
        let name = self
            .parse_qualified_name()
            .map_err(|e| e.in_context("elaborated type specifier"))?;
        let span = self.cursor.span_from(token.span);
        Ok(self.arena.alloc_type(Type {
            kind: TypeKind::Elaborated { key, name },
            span,
        }))
    }

    /// `decltype ( expr )`
    fn parse_decltype(&mut self) -> Result<TypeId, ParseError> {
        let start = self.cursor.advance().span;
        self.cursor.expect_punct(Punct::LParen)?;
        let expr = self.without_context(ParseContext::NO_GREATER, Self::parse_expr)?;
        self.cursor
            .expect_punct(Punct::RParen)
            .map_err(|e| e.in_context("decltype specifier"))?;
        let span = self.cursor.span_from(start);
        Ok(self.arena.alloc_type(Type {
            kind: TypeKind::Decltype(expr),
            span,
        }))
    }

    /// `type-specifier-seq abstract-declarator?`
    pub(crate) fn parse_type_id(&mut self) -> Result<TypeName, ParseError> {
        let start = self.cursor.current_span();
        let specifiers = self.parse_decl_specifiers(SpecifierMode::TypeId)?;
        if specifiers.ty.is_none() {
            return Err(self
                .cursor
                .error_expected(TYPE_START, Some("type specifier"))
                .in_context("type"));
        }
        let declarator = if self.at_abstract_declarator_start() {
            Some(self.parse_declarator(DeclaratorMode::Abstract)?)
        } else {
            None
        };
        Ok(TypeName {
            specifiers,
            declarator,
            span: self.cursor.span_from(start),
        })
    }

    /// cv-qualifier-seq, possibly empty.
    pub(crate) fn parse_cv_qualifiers(&mut self) -> CvQualifiers {
        let mut cv = CvQualifiers::empty();
        loop {
            if self.cursor.eat_keyword(Keyword::Const) {
                cv |= CvQualifiers::CONST;
            } else if self.cursor.eat_keyword(Keyword::Volatile) {
                cv |= CvQualifiers::VOLATILE;
            } else {
                return cv;
            }
        }
    }
}
