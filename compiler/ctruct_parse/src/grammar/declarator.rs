//! Declarators.
//!
//! `ptr-operator* noptr-declarator`, where the noptr part is a base
//! (declarator-id, parenthesized declarator, or nothing) followed by array
//! and function suffixes applied left to right. Pointer operators wrap the
//! suffixed base, so `*a[3]` is a pointer around an array.

use ctruct_ir::ast::{
    CvQualifiers, Declarator, DeclaratorKind, ExceptionSpec, FunctionDeclarator, Parameter,
    ParameterClause, PtrOpKind, PtrOperator, QualifiedName, RefQualifier,
};
use ctruct_ir::{DeclaratorId, Keyword, Punct, Span, TokenKind};

use crate::context::ParseContext;
use crate::grammar::SpecifierMode;
use crate::recovery::{TokenSet, DECL_SPECIFIER_KEYWORDS};
use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, Parser};

/// Whether a declarator-id is required, forbidden, or optional.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DeclaratorMode {
    /// Declarations: `int *p`.
    Named,
    /// Type-ids: `int *`.
    Abstract,
    /// Parameters: `int *p` or `int *`.
    Either,
}

/// What a declarator starts with.
enum PtrPrefix {
    Operator(PtrOperator),
    /// A qualified name not followed by `::*`: the declarator-id, parsed once.
    Name(QualifiedName),
    Absent,
}

const DECLARATOR_START: TokenSet = TokenSet::EMPTY
    .with_ident()
    .with_punct(Punct::ColonColon)
    .with_punct(Punct::Star)
    .with_punct(Punct::Amp)
    .with_punct(Punct::AmpAmp)
    .with_punct(Punct::LParen)
    .with_punct(Punct::Ellipsis);

impl Parser<'_> {
    pub(crate) fn parse_declarator(
        &mut self,
        mode: DeclaratorMode,
    ) -> Result<DeclaratorId, ParseError> {
        ensure_sufficient_stack(|| self.parse_ptr_declarator(mode))
    }

    fn parse_ptr_declarator(&mut self, mode: DeclaratorMode) -> Result<DeclaratorId, ParseError> {
        let op = match self.parse_ptr_operator(mode)? {
            PtrPrefix::Operator(op) => op,
            PtrPrefix::Name(name) => return self.parse_noptr_declarator(mode, Some(name)),
            PtrPrefix::Absent => return self.parse_noptr_declarator(mode, None),
        };
        let inner = self.parse_declarator(mode)?;
        let span = op.span.merge(self.arena.get_declarator(inner).span);
        Ok(self.arena.alloc_declarator(Declarator {
            kind: DeclaratorKind::Ptr { op, inner },
            span,
        }))
    }

    /// `*`, `&`, `&&` or `Class::*`, with trailing attributes and, for the
    /// pointer forms, cv-qualifiers.
    ///
    /// A leading name is parsed once. Unless `::*` follows, it is handed
    /// back as the declarator-id.
    fn parse_ptr_operator(&mut self, mode: DeclaratorMode) -> Result<PtrPrefix, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Punct(Punct::Star) => {
                self.cursor.advance();
                PtrOpKind::Pointer
            }
            TokenKind::Punct(Punct::Amp) => {
                self.cursor.advance();
                PtrOpKind::LvalueRef
            }
            TokenKind::Punct(Punct::AmpAmp) => {
                self.cursor.advance();
                PtrOpKind::RvalueRef
            }
            TokenKind::Ident(_) | TokenKind::Punct(Punct::ColonColon) => {
                if mode == DeclaratorMode::Abstract && !self.at_member_pointer() {
                    return Ok(PtrPrefix::Absent);
                }
                let class = self.parse_qualified_name()?;
                if !self.at_member_pointer_tail() {
                    if mode == DeclaratorMode::Abstract {
                        return Err(self.cursor.error_expected(
                            TokenSet::EMPTY.with_punct(Punct::ColonColon),
                            Some("member pointer"),
                        ));
                    }
                    return Ok(PtrPrefix::Name(class));
                }
                self.cursor.advance();
                self.cursor.advance();
                PtrOpKind::Member(class)
            }
            _ => return Ok(PtrPrefix::Absent),
        };
        let attrs = self.parse_attribute_specifiers()?;
        let cv = match kind {
            PtrOpKind::Pointer | PtrOpKind::Member(_) => self.parse_cv_qualifiers(),
            PtrOpKind::LvalueRef | PtrOpKind::RvalueRef => CvQualifiers::empty(),
        };
        Ok(PtrPrefix::Operator(PtrOperator {
            kind,
            attrs,
            cv,
            span: self.cursor.span_from(start),
        }))
    }

    /// `name :: *` ahead, found by a token scan.
    fn at_member_pointer(&self) -> bool {
        self.cursor.scan_qualified_name(0).is_some_and(|end| {
            self.cursor.peek(end) == TokenKind::Punct(Punct::ColonColon)
                && self.cursor.peek(end + 1) == TokenKind::Punct(Punct::Star)
        })
    }

    fn at_member_pointer_tail(&self) -> bool {
        self.cursor.check_punct(Punct::ColonColon)
            && self.cursor.peek(1) == TokenKind::Punct(Punct::Star)
    }

    fn parse_noptr_declarator(
        &mut self,
        mode: DeclaratorMode,
        name: Option<QualifiedName>,
    ) -> Result<DeclaratorId, ParseError> {
        let start = name.as_ref().map_or_else(|| self.cursor.current_span(), |n| n.span);
        let mut base = match name {
            Some(name) => {
                let kind = self.finish_declarator_id(name, false)?;
                let span = self.cursor.span_from(start);
                self.arena.alloc_declarator(Declarator { kind, span })
            }
            None => self.parse_declarator_base(mode)?,
        };

        loop {
            if self.cursor.check_punct(Punct::LBracket) && !self.cursor.at_attribute_open() {
                base = self.parse_array_suffix(base, start)?;
            } else if self.cursor.check_punct(Punct::LParen)
                && (mode != DeclaratorMode::Named || self.looks_like_parameter_clause())
            {
                let (function, has_trailing_return) = self.parse_function_suffix(base, start)?;
                base = function;
                if has_trailing_return {
                    break;
                }
            } else {
                break;
            }
        }
        Ok(base)
    }

    fn parse_declarator_base(&mut self, mode: DeclaratorMode) -> Result<DeclaratorId, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Punct(Punct::LParen) if self.paren_starts_declarator(mode) => {
                self.cursor.advance();
                let inner = self.without_context(ParseContext::NO_GREATER, |p| {
                    p.parse_declarator(mode)
                })?;
                self.cursor
                    .expect_punct(Punct::RParen)
                    .map_err(|e| e.in_context("parenthesized declarator"))?;
                DeclaratorKind::Paren(inner)
            }
            TokenKind::Punct(Punct::Ellipsis) => {
                self.cursor.advance();
                if mode != DeclaratorMode::Abstract && self.at_declarator_id() {
                    self.parse_declarator_id(true)?
                } else if mode == DeclaratorMode::Named {
                    return Err(self
                        .cursor
                        .error_expected(TokenSet::EMPTY.with_ident(), Some("declarator-id")));
                } else {
                    DeclaratorKind::Abstract { pack: true }
                }
            }
            _ if mode == DeclaratorMode::Named => {
                return Err(self
                    .cursor
                    .error_expected(DECLARATOR_START, Some("declarator")));
            }
            _ => {
                return Ok(self.arena.alloc_declarator(Declarator {
                    kind: DeclaratorKind::Abstract { pack: false },
                    span: Span::point(start.start),
                }));
            }
        };
        let span = self.cursor.span_from(start);
        Ok(self.arena.alloc_declarator(Declarator { kind, span }))
    }

    fn at_declarator_id(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Ident(_) | TokenKind::Punct(Punct::ColonColon)
        )
    }

    fn parse_declarator_id(&mut self, pack: bool) -> Result<DeclaratorKind, ParseError> {
        let name = self.parse_qualified_name()?;
        self.finish_declarator_id(name, pack)
    }

    fn finish_declarator_id(
        &mut self,
        name: QualifiedName,
        pack: bool,
    ) -> Result<DeclaratorKind, ParseError> {
        let attrs = self.parse_attribute_specifiers()?;
        Ok(DeclaratorKind::Name { name, pack, attrs })
    }

    /// At `(`: a nested declarator rather than a parameter clause.
    fn paren_starts_declarator(&self, mode: DeclaratorMode) -> bool {
        match mode {
            DeclaratorMode::Named => true,
            DeclaratorMode::Abstract | DeclaratorMode::Either => matches!(
                self.cursor.peek(1),
                TokenKind::Punct(Punct::Star | Punct::Amp | Punct::AmpAmp)
            ),
        }
    }

    /// At `(` after a declarator-id: parameters rather than an initializer.
    ///
    /// `int f(int)` and `int f()` declare functions; `int x(3)` and
    /// `int y(a + b)` are direct-initialized variables.
    fn looks_like_parameter_clause(&self) -> bool {
        match self.cursor.peek(1) {
            TokenKind::Punct(Punct::RParen | Punct::Ellipsis) => true,
            TokenKind::Keyword(kw) => DECL_SPECIFIER_KEYWORDS.contains(&TokenKind::Keyword(kw)),
            TokenKind::Punct(Punct::LBracket) => self.cursor.peek(2).is_punct(Punct::LBracket),
            TokenKind::Ident(_) | TokenKind::Punct(Punct::ColonColon) => {
                let Some(end) = self.cursor.scan_qualified_name(1) else {
                    return false;
                };
                let templated = (1..end).any(|i| self.cursor.peek(i) == TokenKind::Punct(Punct::Lt));
                match self.cursor.peek(end) {
                    TokenKind::Ident(_)
                    | TokenKind::Keyword(Keyword::Const | Keyword::Volatile)
                    | TokenKind::Punct(
                        Punct::Star | Punct::Amp | Punct::AmpAmp | Punct::Ellipsis,
                    ) => true,
                    TokenKind::Punct(Punct::LParen | Punct::LBrace) => false,
                    _ => templated,
                }
            }
            _ => false,
        }
    }

    fn parse_array_suffix(
        &mut self,
        inner: DeclaratorId,
        start: Span,
    ) -> Result<DeclaratorId, ParseError> {
        self.cursor.advance();
        let size = if self.cursor.check_punct(Punct::RBracket) {
            None
        } else {
            Some(self.without_context(ParseContext::NO_GREATER, Self::parse_expr)?)
        };
        self.cursor
            .expect_punct(Punct::RBracket)
            .map_err(|e| e.in_context("array declarator"))?;
        let attrs = self.parse_attribute_specifiers()?;
        let span = self.cursor.span_from(start);
        Ok(self.arena.alloc_declarator(Declarator {
            kind: DeclaratorKind::Array { inner, size, attrs },
            span,
        }))
    }

    /// `( params ) cv ref-qualifier exception-spec attrs (-> type-id)?`
    ///
    /// Returns the new declarator and whether a trailing return type was
    /// parsed, which ends the suffix sequence.
    fn parse_function_suffix(
        &mut self,
        inner: DeclaratorId,
        start: Span,
    ) -> Result<(DeclaratorId, bool), ParseError> {
        let params = self.parse_parameter_clause()?;
        let cv = self.parse_cv_qualifiers();
        let ref_qualifier = if self.cursor.eat_punct(Punct::Amp) {
            Some(RefQualifier::Lvalue)
        } else if self.cursor.eat_punct(Punct::AmpAmp) {
            Some(RefQualifier::Rvalue)
        } else {
            None
        };
        let exception = self.parse_exception_spec()?;
        let attrs = self.parse_attribute_specifiers()?;
        let trailing_return = if self.cursor.eat_punct(Punct::Arrow) {
            Some(
                self.parse_type_id()
                    .map_err(|e| e.in_context("trailing return type"))?,
            )
        } else {
            None
        };
        let has_trailing_return = trailing_return.is_some();
        let span = self.cursor.span_from(start);
        let id = self.arena.alloc_declarator(Declarator {
            kind: DeclaratorKind::Function(Box::new(FunctionDeclarator {
                inner,
                params,
                attrs,
                cv,
                ref_qualifier,
                exception,
                trailing_return,
            })),
            span,
        });
        Ok((id, has_trailing_return))
    }

    fn parse_exception_spec(&mut self) -> Result<Option<ExceptionSpec>, ParseError> {
        if self.cursor.eat_keyword(Keyword::Noexcept) {
            if !self.cursor.eat_punct(Punct::LParen) {
                return Ok(Some(ExceptionSpec::Noexcept(None)));
            }
            let condition = self.without_context(ParseContext::NO_GREATER, Self::parse_expr)?;
            self.cursor
                .expect_punct(Punct::RParen)
                .map_err(|e| e.in_context("noexcept specifier"))?;
            return Ok(Some(ExceptionSpec::Noexcept(Some(condition))));
        }
        if !self.cursor.eat_keyword(Keyword::Throw) {
            return Ok(None);
        }
        self.cursor.expect_punct(Punct::LParen)?;
        let mut types = Vec::new();
        while !self.cursor.check_punct(Punct::RParen) {
            types.push(self.parse_type_id()?);
            if !self.cursor.eat_punct(Punct::Comma) {
                break;
            }
        }
        self.cursor
            .expect_punct(Punct::RParen)
            .map_err(|e| e.in_context("dynamic exception specification"))?;
        Ok(Some(ExceptionSpec::Throw(types)))
    }

    /// `( (param (, param)*)? (,? ...)? )`
    fn parse_parameter_clause(&mut self) -> Result<ParameterClause, ParseError> {
        self.cursor.expect_punct(Punct::LParen)?;
        let clause = self.without_context(ParseContext::NO_GREATER, |p| {
            let mut clause = ParameterClause::default();
            if p.cursor.check_punct(Punct::RParen) {
                return Ok(clause);
            }
            loop {
                if p.cursor.eat_punct(Punct::Ellipsis) {
                    clause.variadic = true;
                    break;
                }
                clause.params.push(p.parse_parameter()?);
                if p.cursor.eat_punct(Punct::Comma) {
                    continue;
                }
                clause.variadic = p.cursor.eat_punct(Punct::Ellipsis);
                break;
            }
            Ok::<_, ParseError>(clause)
        })?;
        self.cursor
            .expect_punct(Punct::RParen)
            .map_err(|e| e.in_context("parameter list"))?;
        Ok(clause)
    }

    /// `attrs decl-specifiers declarator? (= default-argument)?`
    pub(crate) fn parse_parameter(&mut self) -> Result<Parameter, ParseError> {
        let start = self.cursor.current_span();
        let attrs = self.parse_attribute_specifiers()?;
        let specifiers = self.parse_decl_specifiers(SpecifierMode::Parameter)?;
        if specifiers.ty.is_none() {
            return Err(self
                .cursor
                .error_expected(TokenSet::EMPTY, Some("parameter declaration")));
        }
        let declarator = if self.at_parameter_declarator_start() {
            Some(self.parse_declarator(DeclaratorMode::Either)?)
        } else {
            None
        };
        let default = if self.cursor.eat_punct(Punct::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Parameter {
            attrs,
            specifiers,
            declarator,
            default,
            span: self.cursor.span_from(start),
        })
    }

    fn at_parameter_declarator_start(&self) -> bool {
        self.at_declarator_id() || self.at_abstract_declarator_start()
    }

    /// Whether an abstract declarator starts here: a pointer operator,
    /// `(`, `[` that is not `[[`, `...`, or `Class::*`.
    pub(crate) fn at_abstract_declarator_start(&self) -> bool {
        match self.cursor.current_kind() {
            TokenKind::Punct(
                Punct::Star | Punct::Amp | Punct::AmpAmp | Punct::LParen | Punct::Ellipsis,
            ) => true,
            TokenKind::Punct(Punct::LBracket) => !self.cursor.at_attribute_open(),
            TokenKind::Ident(_) | TokenKind::Punct(Punct::ColonColon) => self.at_member_pointer(),
            _ => false,
        }
    }
}
