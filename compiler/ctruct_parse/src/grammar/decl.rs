//! Declarations.
//!
//! The dispatcher is an explicit state machine. Each state looks at a
//! bounded number of tokens and either moves to the next state or builds
//! the declaration. `Done` always carries exactly one node; failures leave
//! the machine through `?`.

use ctruct_ir::ast::{
    AttributeSpecifier, Decl, DeclKind, DeclSpecifiers, FunctionBody, FunctionDef, Handler,
    InitDeclarator, Initializer, LinkageBody, LinkageSpec, MemInitializer, NamespaceDef,
    SimpleDecl, TemplateDecl,
};
use ctruct_ir::{DeclId, DeclaratorId, Keyword, Punct, Span, TokenKind};
use tracing::{debug, trace};

use crate::context::ParseContext;
use crate::grammar::{DeclaratorMode, SpecifierMode};
use crate::recovery::{TokenSet, DECL_START};
use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, Parser};

/// Tokens accepted after an init-declarator.
const DECLARATOR_END: TokenSet = TokenSet::EMPTY
    .with_punct(Punct::Semi)
    .with_punct(Punct::Comma)
    .with_punct(Punct::Eq);

/// Tokens that may begin a declarator after an empty decl-specifier-seq.
const BARE_DECLARATOR_START: TokenSet = TokenSet::EMPTY
    .with_ident()
    .with_punct(Punct::ColonColon)
    .with_punct(Punct::Star)
    .with_punct(Punct::Amp)
    .with_punct(Punct::AmpAmp)
    .with_punct(Punct::LParen)
    .with_punct(Punct::Ellipsis);

const BODY_START: TokenSet = TokenSet::EMPTY
    .with_punct(Punct::LBrace)
    .with_punct(Punct::Colon)
    .with_keyword(Keyword::Try);

enum DeclState {
    Start,
    SawTemplate,
    SawExtern,
    SawNamespace { inline: bool },
    ParsingSpecifiers(Vec<AttributeSpecifier>),
    ParsingDeclarator(Box<(Vec<AttributeSpecifier>, DeclSpecifiers)>),
    Done(DeclId),
}

impl DeclState {
    fn name(&self) -> &'static str {
        match self {
            DeclState::Start => "start",
            DeclState::SawTemplate => "saw-template",
            DeclState::SawExtern => "saw-extern",
            DeclState::SawNamespace { .. } => "saw-namespace",
            DeclState::ParsingSpecifiers(_) => "specifiers",
            DeclState::ParsingDeclarator(_) => "declarator",
            DeclState::Done(_) => "done",
        }
    }
}

impl Parser<'_> {
    /// Parse exactly one declaration.
    pub(crate) fn parse_declaration(&mut self) -> Result<DeclId, ParseError> {
        ensure_sufficient_stack(|| self.run_declaration())
    }

    fn run_declaration(&mut self) -> Result<DeclId, ParseError> {
        let start = self.cursor.current_span();
        let mut state = DeclState::Start;
        loop {
            trace!(state = state.name(), pos = self.cursor.position(), "declaration");
            state = match state {
                DeclState::Start => self.decl_start(start)?,
                DeclState::SawTemplate => self.decl_after_template(start)?,
                DeclState::SawExtern => self.decl_after_extern(start)?,
                DeclState::SawNamespace { inline } => self.decl_after_namespace(inline, start)?,
                DeclState::ParsingSpecifiers(attrs) => self.decl_specifiers(attrs, start)?,
                DeclState::ParsingDeclarator(parts) => {
                    let (attrs, specifiers) = *parts;
                    self.decl_declarators(attrs, specifiers, start)?
                }
                DeclState::Done(id) => {
                    debug!(decl = ?id, pos = self.cursor.position(), "declaration parsed");
                    return Ok(id);
                }
            };
        }
    }

    fn finish(&mut self, kind: DeclKind, start: Span) -> DeclState {
        let span = self.cursor.span_from(start);
        DeclState::Done(self.arena.alloc_decl(Decl { kind, span }))
    }

    fn reject_in_function_body(&self, what: &'static str) -> Result<(), ParseError> {
        if self.context.contains(ParseContext::IN_FUNCTION_BODY) {
            return Err(self
                .cursor
                .error_expected(TokenSet::EMPTY, Some("block-scope declaration"))
                .in_context(what));
        }
        Ok(())
    }

    fn decl_start(&mut self, start: Span) -> Result<DeclState, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Punct(Punct::Semi) => {
                self.cursor.advance();
                Ok(self.finish(DeclKind::Empty, start))
            }
            TokenKind::Keyword(Keyword::Template) => {
                self.reject_in_function_body("template declaration")?;
                self.cursor.advance();
                Ok(DeclState::SawTemplate)
            }
            TokenKind::Keyword(Keyword::Extern)
                if matches!(
                    self.cursor.peek(1),
                    TokenKind::Str(_) | TokenKind::Keyword(Keyword::Template)
                ) =>
            {
                self.reject_in_function_body("linkage specification")?;
                self.cursor.advance();
                Ok(DeclState::SawExtern)
            }
            TokenKind::Keyword(Keyword::Inline)
                if self.cursor.peek(1).is_keyword(Keyword::Namespace) =>
            {
                self.reject_in_function_body("namespace definition")?;
                self.cursor.advance();
                self.cursor.advance();
                Ok(DeclState::SawNamespace { inline: true })
            }
            TokenKind::Keyword(Keyword::Namespace) => {
                self.reject_in_function_body("namespace definition")?;
                self.cursor.advance();
                Ok(DeclState::SawNamespace { inline: false })
            }
            TokenKind::Keyword(Keyword::Using) => {
                let kind = self.parse_using().map_err(|e| e.in_context("using declaration"))?;
                Ok(self.finish(kind, start))
            }
            TokenKind::Keyword(Keyword::StaticAssert) => {
                let kind = self
                    .parse_static_assert()
                    .map_err(|e| e.in_context("static assertion"))?;
                Ok(self.finish(kind, start))
            }
            _ => {
                let attrs = self.parse_attribute_specifiers()?;
                if !attrs.is_empty() && self.cursor.eat_punct(Punct::Semi) {
                    return Ok(self.finish(DeclKind::Attribute(attrs), start));
                }
                Ok(DeclState::ParsingSpecifiers(attrs))
            }
        }
    }

    /// After `template`: `<>`, `< params >`, or an explicit instantiation.
    fn decl_after_template(&mut self, start: Span) -> Result<DeclState, ParseError> {
        if !self.cursor.check_punct(Punct::Lt) {
            let decl = self.parse_declaration()?;
            return Ok(self.finish(
                DeclKind::ExplicitInstantiation {
                    is_extern: false,
                    decl,
                },
                start,
            ));
        }
        if self.cursor.peek(1).is_punct(Punct::Gt) {
            self.cursor.advance();
            self.cursor.advance();
            let decl = self.parse_declaration()?;
            return Ok(self.finish(DeclKind::ExplicitSpecialization(decl), start));
        }
        let params = self.parse_template_params()?;
        let decl = self.parse_declaration()?;
        Ok(self.finish(DeclKind::Template(TemplateDecl { params, decl }), start))
    }

    /// After `extern`: a linkage specification or `extern template`.
    fn decl_after_extern(&mut self, start: Span) -> Result<DeclState, ParseError> {
        let TokenKind::Str(abi) = self.cursor.current_kind() else {
            self.cursor.expect_keyword(Keyword::Template)?;
            let decl = self.parse_declaration()?;
            return Ok(self.finish(
                DeclKind::ExplicitInstantiation {
                    is_extern: true,
                    decl,
                },
                start,
            ));
        };
        self.cursor.advance();
        let body = if self.cursor.check_punct(Punct::LBrace) {
            LinkageBody::Braced(
                self.parse_declaration_body()
                    .map_err(|e| e.in_context("linkage specification"))?,
            )
        } else {
            LinkageBody::Single(self.parse_declaration()?)
        };
        Ok(self.finish(DeclKind::Linkage(LinkageSpec { abi, body }), start))
    }

    /// After `inline? namespace`: a definition or an alias.
    fn decl_after_namespace(&mut self, inline: bool, start: Span) -> Result<DeclState, ParseError> {
        if !inline && self.cursor.check_ident() && self.cursor.peek(1).is_punct(Punct::Eq) {
            let alias = self.cursor.expect_ident()?;
            self.cursor.advance();
            let target = self
                .parse_qualified_name()
                .map_err(|e| e.in_context("namespace alias"))?;
            self.cursor.expect_punct(Punct::Semi)?;
            return Ok(self.finish(DeclKind::NamespaceAlias { alias, target }, start));
        }
        let name = self.cursor.eat_ident();
        if !self.cursor.check_punct(Punct::LBrace) {
            let mut expected = TokenSet::EMPTY.with_punct(Punct::LBrace);
            if name.is_none() {
                expected = expected.with_ident();
            }
            return Err(self
                .cursor
                .error_expected(expected, None)
                .in_context("namespace definition"));
        }
        let decls = self
            .parse_declaration_body()
            .map_err(|e| e.in_context("namespace definition"))?;
        Ok(self.finish(
            DeclKind::Namespace(NamespaceDef {
                inline,
                name,
                decls,
            }),
            start,
        ))
    }

    /// `{ declaration* }` with recovery inside the braces.
    fn parse_declaration_body(&mut self) -> Result<Vec<DeclId>, ParseError> {
        self.cursor.expect_punct(Punct::LBrace)?;
        let mut decls = Vec::new();
        while !self.cursor.check_punct(Punct::RBrace) && !self.cursor.is_at_end() {
            if let Some(id) = self.parse_declaration_recovering(true) {
                decls.push(id);
            }
        }
        self.cursor.expect_punct(Punct::RBrace)?;
        Ok(decls)
    }

    /// `using namespace N;`, `using X = T;`, `using typename? N::x;`
    fn parse_using(&mut self) -> Result<DeclKind, ParseError> {
        self.cursor.advance();
        if self.cursor.eat_keyword(Keyword::Namespace) {
            let name = self.parse_qualified_name()?;
            self.cursor.expect_punct(Punct::Semi)?;
            return Ok(DeclKind::UsingDirective(name));
        }
        if self.cursor.check_ident()
            && matches!(
                self.cursor.peek(1),
                TokenKind::Punct(Punct::Eq | Punct::LBracket)
            )
        {
            let name = self.cursor.expect_ident()?;
            let attrs = self.parse_attribute_specifiers()?;
            self.cursor.expect_punct(Punct::Eq)?;
            let ty = self.parse_type_id()?;
            self.cursor.expect_punct(Punct::Semi)?;
            return Ok(DeclKind::Alias { name, attrs, ty });
        }
        let typename = self.cursor.eat_keyword(Keyword::Typename);
        let name = self.parse_qualified_name()?;
        self.cursor.expect_punct(Punct::Semi)?;
        Ok(DeclKind::UsingDeclaration { typename, name })
    }

    /// `static_assert ( expr (, "message")? ) ;`
    fn parse_static_assert(&mut self) -> Result<DeclKind, ParseError> {
        self.cursor.advance();
        self.cursor.expect_punct(Punct::LParen)?;
        let condition = self.without_context(ParseContext::NO_GREATER, Self::parse_expr)?;
        let message = if self.cursor.eat_punct(Punct::Comma) {
            match self.cursor.current_kind() {
                TokenKind::Str(text) => {
                    self.cursor.advance();
                    Some(text)
                }
                _ => {
                    return Err(self
                        .cursor
                        .error_expected(TokenSet::EMPTY.with_literals(), Some("message")));
                }
            }
        } else {
            None
        };
        self.cursor.expect_punct(Punct::RParen)?;
        self.cursor.expect_punct(Punct::Semi)?;
        Ok(DeclKind::StaticAssert { condition, message })
    }

    fn decl_specifiers(
        &mut self,
        attrs: Vec<AttributeSpecifier>,
        start: Span,
    ) -> Result<DeclState, ParseError> {
        let specifiers = self.parse_decl_specifiers(SpecifierMode::Declaration)?;
        if specifiers.is_empty()
            && attrs.is_empty()
            && !self.cursor.check_set(&BARE_DECLARATOR_START)
        {
            return Err(self.cursor.error_expected(DECL_START, Some("declaration")));
        }
        // `struct S;`, `class C;`
        if specifiers.ty.is_some() && self.cursor.check_punct(Punct::Semi) {
            self.cursor.advance();
            return Ok(self.finish(
                DeclKind::Simple(SimpleDecl {
                    attrs,
                    specifiers,
                    declarators: Vec::new(),
                }),
                start,
            ));
        }
        Ok(DeclState::ParsingDeclarator(Box::new((attrs, specifiers))))
    }

    fn decl_declarators(
        &mut self,
        attrs: Vec<AttributeSpecifier>,
        specifiers: DeclSpecifiers,
        start: Span,
    ) -> Result<DeclState, ParseError> {
        let first = self.parse_declarator(DeclaratorMode::Named)?;
        let is_function = self.arena.is_function_declarator(first);

        if !is_function && specifiers.ty.is_none() {
            let span = self.arena.get_declarator(first).span;
            let found = self.cursor.current();
            return Err(ParseError::ambiguous_declaration(
                found,
                self.cursor.describe(&found),
                span,
            ));
        }

        if is_function {
            if let Some(body) = self.parse_function_body()? {
                let return_type = self
                    .arena
                    .function_declarator(first)
                    .and_then(|f| f.trailing_return.as_ref())
                    .and_then(|t| t.specifiers.ty)
                    .or(specifiers.ty);
                let def = FunctionDef {
                    attrs,
                    specifiers,
                    declarator: first,
                    return_type,
                    body,
                };
                return Ok(self.finish(DeclKind::Function(Box::new(def)), start));
            }
        }

        let mut declarators = Vec::new();
        let mut declarator = first;
        loop {
            declarators.push(self.parse_init_declarator_tail(declarator)?);
            if !self.cursor.eat_punct(Punct::Comma) {
                break;
            }
            declarator = self.parse_declarator(DeclaratorMode::Named)?;
        }
        if !self.cursor.eat_punct(Punct::Semi) {
            return Err(self
                .cursor
                .error_expected(DECLARATOR_END, None)
                .in_context("declaration"));
        }
        Ok(self.finish(
            DeclKind::Simple(SimpleDecl {
                attrs,
                specifiers,
                declarators,
            }),
            start,
        ))
    }

    fn parse_init_declarator_tail(
        &mut self,
        declarator: DeclaratorId,
    ) -> Result<InitDeclarator, ParseError> {
        let start = self.arena.get_declarator(declarator).span;
        let init = self.parse_initializer()?;
        Ok(InitDeclarator {
            declarator,
            init,
            span: self.cursor.span_from(start),
        })
    }

    /// `= expr`, `= { list }`, `{ list }` or `( list )`.
    fn parse_initializer(&mut self) -> Result<Option<Initializer>, ParseError> {
        let init = match self.cursor.current_kind() {
            TokenKind::Punct(Punct::Eq) => {
                self.cursor.advance();
                if self.cursor.check_punct(Punct::LBrace) {
                    Initializer::Braced {
                        args: self.parse_expr_list(Punct::LBrace, Punct::RBrace)?,
                        with_eq: true,
                    }
                } else {
                    Initializer::Assign(self.parse_expr().map_err(|e| e.in_context("initializer"))?)
                }
            }
            TokenKind::Punct(Punct::LBrace) => Initializer::Braced {
                args: self.parse_expr_list(Punct::LBrace, Punct::RBrace)?,
                with_eq: false,
            },
            TokenKind::Punct(Punct::LParen) => {
                Initializer::Paren(self.parse_expr_list(Punct::LParen, Punct::RParen)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(init))
    }

    /// The body of a function definition, if one follows the declarator.
    fn parse_function_body(&mut self) -> Result<Option<FunctionBody>, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Punct(Punct::LBrace | Punct::Colon) => {
                let ctor_inits = self.parse_ctor_initializers()?;
                let body = self.parse_compound_statement()?;
                Ok(Some(FunctionBody::Block { ctor_inits, body }))
            }
            TokenKind::Keyword(Keyword::Try) => {
                self.cursor.advance();
                let ctor_inits = self.parse_ctor_initializers()?;
                let body = self.parse_compound_statement()?;
                let mut handlers = Vec::new();
                while self.cursor.check_keyword(Keyword::Catch) {
                    handlers.push(self.parse_handler()?);
                }
                if handlers.is_empty() {
                    return Err(self
                        .cursor
                        .error_expected(TokenSet::EMPTY.with_keyword(Keyword::Catch), None)
                        .in_context("function try block"));
                }
                Ok(Some(FunctionBody::Try {
                    ctor_inits,
                    body,
                    handlers,
                }))
            }
            TokenKind::Punct(Punct::Eq)
                if matches!(
                    self.cursor.peek(1),
                    TokenKind::Keyword(Keyword::Default | Keyword::Delete)
                ) =>
            {
                self.cursor.advance();
                let body = if self.cursor.advance().kind.is_keyword(Keyword::Default) {
                    FunctionBody::Default
                } else {
                    FunctionBody::Delete
                };
                self.cursor.expect_punct(Punct::Semi)?;
                Ok(Some(body))
            }
            _ => Ok(None),
        }
    }

    /// `: mem-initializer (, mem-initializer)*`, or nothing.
    fn parse_ctor_initializers(&mut self) -> Result<Vec<MemInitializer>, ParseError> {
        let mut inits = Vec::new();
        if !self.cursor.eat_punct(Punct::Colon) {
            return Ok(inits);
        }
        loop {
            let start = self.cursor.current_span();
            let name = self
                .parse_qualified_name()
                .map_err(|e| e.in_context("member initializer"))?;
            let init = match self.cursor.current_kind() {
                TokenKind::Punct(Punct::LParen) => {
                    Initializer::Paren(self.parse_expr_list(Punct::LParen, Punct::RParen)?)
                }
                TokenKind::Punct(Punct::LBrace) => Initializer::Braced {
                    args: self.parse_expr_list(Punct::LBrace, Punct::RBrace)?,
                    with_eq: false,
                },
                _ => {
                    return Err(self
                        .cursor
                        .error_expected(
                            TokenSet::EMPTY
                                .with_punct(Punct::LParen)
                                .with_punct(Punct::LBrace),
                            None,
                        )
                        .in_context("member initializer"));
                }
            };
            let pack = self.cursor.eat_punct(Punct::Ellipsis);
            inits.push(MemInitializer {
                name,
                init,
                pack,
                span: self.cursor.span_from(start),
            });
            if !self.cursor.eat_punct(Punct::Comma) {
                break;
            }
        }
        if !self.cursor.check_punct(Punct::LBrace) {
            return Err(self
                .cursor
                .error_expected(BODY_START.with_punct(Punct::Comma), None)
                .in_context("constructor initializer list"));
        }
        Ok(inits)
    }

    /// `catch ( parameter | ... ) compound-statement`
    fn parse_handler(&mut self) -> Result<Handler, ParseError> {
        let start = self.cursor.advance().span;
        self.cursor.expect_punct(Punct::LParen)?;
        let param = if self.cursor.eat_punct(Punct::Ellipsis) {
            None
        } else {
            Some(self.parse_parameter()?)
        };
        self.cursor
            .expect_punct(Punct::RParen)
            .map_err(|e| e.in_context("exception handler"))?;
        let body = self.parse_compound_statement()?;
        Ok(Handler {
            param,
            body,
            span: self.cursor.span_from(start),
        })
    }
}
