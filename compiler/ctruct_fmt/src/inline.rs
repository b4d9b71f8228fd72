//! Single-line rendering of expressions, names, types and declarators.
//!
//! Everything here fits on one line; [`crate::declarations`] decides line
//! breaks and indentation.

use ctruct_ir::ast::{
    AlignasArg, Attribute, AttributeSpecifier, AttributeSpecifierKind, CvQualifiers,
    DeclSpecifiers, DeclaratorKind, ExceptionSpec, ExprKind, FunctionDeclarator, Initializer,
    Literal, MemInitializer, Parameter, ParameterClause, PtrOpKind, PtrOperator, QualifiedName,
    RefQualifier, SpecifierWord, TemplateArg, TemplateParam, TemplateParamKind, TypeKind,
    TypeName,
};
use ctruct_ir::{
    AstArena, DeclaratorId, ExprId, ExprRange, Name, Punct, Token, TokenCapture, TokenKind,
    TokenList, TypeId,
};

/// Renders AST fragments to strings.
#[derive(Clone, Copy)]
pub struct InlineRenderer<'a> {
    arena: &'a AstArena,
    tokens: &'a TokenList,
}

impl<'a> InlineRenderer<'a> {
    pub fn new(arena: &'a AstArena, tokens: &'a TokenList) -> Self {
        InlineRenderer { arena, tokens }
    }

    pub fn name(&self, name: Name) -> &'a str {
        self.tokens.interner().lookup(name)
    }

    // ===== Expressions =====

    pub fn expr(&self, id: ExprId) -> String {
        match self.arena.get_expr(id).kind {
            ExprKind::Literal(lit) => self.literal(lit).to_string(),
            ExprKind::Ident(name) => self.name(name).to_string(),
            ExprKind::Scoped { scope, member } => {
                format!("{}::{}", self.expr(scope), self.name(member))
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.expr(operand);
                // `- -x` and `& &x` must not lex as `--` or `&&`.
                if operand.starts_with(['+', '-', '&', '*']) {
                    format!("{} {operand}", op.as_symbol())
                } else {
                    format!("{}{operand}", op.as_symbol())
                }
            }
            ExprKind::Binary { op, left, right } => {
                format!("{} {} {}", self.expr(left), op.as_symbol(), self.expr(right))
            }
            ExprKind::Assign { op, target, value } => {
                format!("{} {} {}", self.expr(target), op.as_symbol(), self.expr(value))
            }
            ExprKind::Call { callee, args } => {
                format!("{}({})", self.expr(callee), self.expr_list(args))
            }
            ExprKind::ArrayLiteral(elements) => format!("[{}]", self.expr_list(elements)),
            ExprKind::Grouping(inner) => format!("({})", self.expr(inner)),
        }
    }

    fn literal(&self, lit: Literal) -> &'a str {
        match lit {
            Literal::Number(text) | Literal::String(text) | Literal::Char(text) => self.name(text),
            Literal::Bool(true) => "true",
            Literal::Bool(false) => "false",
            Literal::Nullptr => "nullptr",
            Literal::This => "this",
        }
    }

    pub fn expr_list(&self, range: ExprRange) -> String {
        join(self.arena.get_expr_list(range).iter().map(|&id| self.expr(id)), ", ")
    }

    // ===== Names and types =====

    pub fn qualified_name(&self, name: &QualifiedName) -> String {
        let mut out = String::new();
        if name.global {
            out.push_str("::");
        }
        for (i, segment) in name.segments.iter().enumerate() {
            if i > 0 {
                out.push_str("::");
            }
            out.push_str(self.name(segment.ident));
            if let Some(args) = &segment.template_args {
                out.push('<');
                out.push_str(&join(args.iter().map(|arg| self.template_arg(arg)), ", "));
                out.push('>');
            }
        }
        out
    }

    fn template_arg(&self, arg: &TemplateArg) -> String {
        match arg {
            TemplateArg::Type(ty) => self.type_name(ty),
            TemplateArg::Expr(expr) => self.expr(*expr),
        }
    }

    pub fn ty(&self, id: TypeId) -> String {
        match &self.arena.get_type(id).kind {
            TypeKind::Builtin(words) => join(words.iter().map(|w| w.as_str()), " "),
            TypeKind::Named(name) => self.qualified_name(name),
            TypeKind::Elaborated { key, name } => {
                format!("{} {}", key.as_str(), self.qualified_name(name))
            }
            TypeKind::Decltype(expr) => format!("decltype({})", self.expr(*expr)),
        }
    }

    /// Specifiers in the order they were written. Without a recorded
    /// order: flags, cv-qualifiers, the type, then attributes on the type.
    pub fn specifiers(&self, specs: &DeclSpecifiers) -> String {
        if !specs.order.is_empty() {
            return join(
                specs.order.iter().filter_map(|word| self.specifier_word(specs, *word)),
                " ",
            );
        }
        let mut words: Vec<String> = specs.flags.keywords().map(str::to_string).collect();
        words.extend(cv_words(specs.cv).map(str::to_string));
        if let Some(ty) = specs.ty {
            words.push(self.ty(ty));
        }
        if !specs.attrs.is_empty() {
            words.push(self.attributes(&specs.attrs));
        }
        words.join(" ")
    }

    fn specifier_word(&self, specs: &DeclSpecifiers, word: SpecifierWord) -> Option<String> {
        match word {
            SpecifierWord::Flag(flag) => Some(join(flag.keywords(), " ")),
            SpecifierWord::Cv(cv) => Some(join(cv_words(cv), " ")),
            SpecifierWord::Builtin(builtin) => Some(builtin.as_str().to_string()),
            SpecifierWord::Type => specs.ty.map(|id| self.ty(id)),
            SpecifierWord::Attribute(index) => {
                specs.attrs.get(index).map(|attr| self.attribute_specifier(attr))
            }
        }
    }

    pub fn type_name(&self, ty: &TypeName) -> String {
        let specs = self.specifiers(&ty.specifiers);
        match ty.declarator {
            Some(id) => join_nonempty(&specs, &self.declarator(id)),
            None => specs,
        }
    }

    // ===== Attributes =====

    /// Attribute specifiers separated by spaces.
    pub fn attributes(&self, attrs: &[AttributeSpecifier]) -> String {
        join(attrs.iter().map(|a| self.attribute_specifier(a)), " ")
    }

    fn attribute_specifier(&self, spec: &AttributeSpecifier) -> String {
        match &spec.kind {
            AttributeSpecifierKind::List(list) => {
                format!("[[{}]]", join(list.iter().map(|a| self.attribute(a)), ", "))
            }
            AttributeSpecifierKind::Alignas { arg, pack } => {
                let arg = match arg {
                    AlignasArg::Type(ty) => self.type_name(ty),
                    AlignasArg::Expr(expr) => self.expr(*expr),
                };
                let dots = if *pack { "..." } else { "" };
                format!("alignas({arg}{dots})")
            }
        }
    }

    fn attribute(&self, attr: &Attribute) -> String {
        let mut out = String::new();
        if let Some(scope) = attr.scope {
            out.push_str(self.name(scope));
            out.push_str("::");
        }
        out.push_str(self.name(attr.name));
        if let Some(args) = attr.args {
            out.push('(');
            out.push_str(&self.balanced_tokens(args));
            out.push(')');
        }
        if attr.pack {
            out.push_str("...");
        }
        out
    }

    /// Captured tokens respaced: one space between tokens, none inside
    /// brackets, before `,`, or around `::`.
    fn balanced_tokens(&self, capture: TokenCapture) -> String {
        let mut out = String::new();
        let mut prev: Option<&Token> = None;
        for token in self.tokens.get_range(capture) {
            if let Some(prev) = prev {
                if needs_space(prev.kind, token.kind) {
                    out.push(' ');
                }
            }
            out.push_str(self.tokens.text(&token.kind));
            prev = Some(token);
        }
        out
    }

    // ===== Declarators =====

    pub fn declarator(&self, id: DeclaratorId) -> String {
        match &self.arena.get_declarator(id).kind {
            DeclaratorKind::Name { name, pack, attrs } => {
                let mut out = String::new();
                if *pack {
                    out.push_str("...");
                }
                out.push_str(&self.qualified_name(name));
                if !attrs.is_empty() {
                    out.push(' ');
                    out.push_str(&self.attributes(attrs));
                }
                out
            }
            DeclaratorKind::Abstract { pack } => {
                if *pack { "...".to_string() } else { String::new() }
            }
            DeclaratorKind::Paren(inner) => format!("({})", self.declarator(*inner)),
            DeclaratorKind::Ptr { op, inner } => self.ptr_declarator(op, *inner),
            DeclaratorKind::Array { inner, size, attrs } => {
                let mut out = self.declarator(*inner);
                out.push('[');
                if let Some(size) = size {
                    out.push_str(&self.expr(*size));
                }
                out.push(']');
                if !attrs.is_empty() {
                    out.push(' ');
                    out.push_str(&self.attributes(attrs));
                }
                out
            }
            DeclaratorKind::Function(func) => self.function_declarator(func),
        }
    }

    fn ptr_declarator(&self, op: &PtrOperator, inner: DeclaratorId) -> String {
        let mut out = match &op.kind {
            PtrOpKind::Pointer => "*".to_string(),
            PtrOpKind::LvalueRef => "&".to_string(),
            PtrOpKind::RvalueRef => "&&".to_string(),
            PtrOpKind::Member(class) => format!("{}::*", self.qualified_name(class)),
        };
        let qualified = !op.attrs.is_empty() || !op.cv.is_empty();
        if !op.attrs.is_empty() {
            out.push(' ');
            out.push_str(&self.attributes(&op.attrs));
        }
        for word in cv_words(op.cv) {
            out.push(' ');
            out.push_str(word);
        }
        let inner = self.declarator(inner);
        if (qualified && !inner.is_empty()) || (out.ends_with('&') && inner.starts_with('&')) {
            out.push(' ');
        }
        out.push_str(&inner);
        out
    }

    fn function_declarator(&self, func: &FunctionDeclarator) -> String {
        let mut out = self.declarator(func.inner);
        out.push('(');
        out.push_str(&self.parameter_clause(&func.params));
        out.push(')');
        for word in cv_words(func.cv) {
            out.push(' ');
            out.push_str(word);
        }
        match func.ref_qualifier {
            Some(RefQualifier::Lvalue) => out.push_str(" &"),
            Some(RefQualifier::Rvalue) => out.push_str(" &&"),
            None => {}
        }
        match &func.exception {
            Some(ExceptionSpec::Noexcept(None)) => out.push_str(" noexcept"),
            Some(ExceptionSpec::Noexcept(Some(cond))) => {
                out.push_str(&format!(" noexcept({})", self.expr(*cond)));
            }
            Some(ExceptionSpec::Throw(types)) => {
                let types = join(types.iter().map(|t| self.type_name(t)), ", ");
                out.push_str(&format!(" throw({types})"));
            }
            None => {}
        }
        if !func.attrs.is_empty() {
            out.push(' ');
            out.push_str(&self.attributes(&func.attrs));
        }
        if let Some(ret) = &func.trailing_return {
            out.push_str(" -> ");
            out.push_str(&self.type_name(ret));
        }
        out
    }

    pub fn parameter_clause(&self, clause: &ParameterClause) -> String {
        let mut out = join(clause.params.iter().map(|p| self.parameter(p)), ", ");
        if clause.variadic {
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str("...");
        }
        out
    }

    pub fn parameter(&self, param: &Parameter) -> String {
        let mut out = self.attributes(&param.attrs);
        out = join_nonempty(&out, &self.specifiers(&param.specifiers));
        if let Some(declarator) = param.declarator {
            out = join_nonempty(&out, &self.declarator(declarator));
        }
        if let Some(default) = param.default {
            out.push_str(" = ");
            out.push_str(&self.expr(default));
        }
        out
    }

    // ===== Initializers and templates =====

    /// Initializer text, including its leading ` = ` when it has one.
    pub fn initializer(&self, init: &Initializer) -> String {
        match *init {
            Initializer::Assign(expr) => format!(" = {}", self.expr(expr)),
            Initializer::Braced { args, with_eq } => {
                let eq = if with_eq { " = " } else { "" };
                format!("{eq}{{{}}}", self.expr_list(args))
            }
            Initializer::Paren(args) => format!("({})", self.expr_list(args)),
        }
    }

    pub fn mem_initializer(&self, init: &MemInitializer) -> String {
        let dots = if init.pack { "..." } else { "" };
        format!(
            "{}{}{dots}",
            self.qualified_name(&init.name),
            self.initializer(&init.init)
        )
    }

    /// `template <...>` header, without a trailing space.
    pub fn template_header(&self, params: &[TemplateParam]) -> String {
        format!(
            "template <{}>",
            join(params.iter().map(|p| self.template_param(p)), ", ")
        )
    }

    fn template_param(&self, param: &TemplateParam) -> String {
        match &param.kind {
            TemplateParamKind::Type {
                key,
                pack,
                name,
                default,
            } => {
                let mut out = key.as_str().to_string();
                if *pack {
                    out.push_str("...");
                }
                if let Some(name) = name {
                    out.push(' ');
                    out.push_str(self.name(*name));
                }
                if let Some(default) = default {
                    out.push_str(" = ");
                    out.push_str(&self.type_name(default));
                }
                out
            }
            TemplateParamKind::Template {
                params,
                pack,
                name,
                default,
            } => {
                let mut out = self.template_header(params);
                out.push_str(" class");
                if *pack {
                    out.push_str("...");
                }
                if let Some(name) = name {
                    out.push(' ');
                    out.push_str(self.name(*name));
                }
                if let Some(default) = default {
                    out.push_str(" = ");
                    out.push_str(&self.qualified_name(default));
                }
                out
            }
            TemplateParamKind::NonType(param) => self.parameter(param),
        }
    }
}

fn cv_words(cv: CvQualifiers) -> impl Iterator<Item = &'static str> {
    [
        (CvQualifiers::CONST, "const"),
        (CvQualifiers::VOLATILE, "volatile"),
    ]
    .into_iter()
    .filter(move |(flag, _)| cv.contains(*flag))
    .map(|(_, word)| word)
}

fn join<S: AsRef<str>>(items: impl Iterator<Item = S>, sep: &str) -> String {
    let mut out = String::new();
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(item.as_ref());
    }
    out
}

/// `a b`, or whichever side is non-empty.
pub(crate) fn join_nonempty(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{left} {right}"),
    }
}

fn needs_space(prev: TokenKind, next: TokenKind) -> bool {
    let opens = |k: TokenKind| {
        matches!(
            k,
            TokenKind::Punct(Punct::LParen | Punct::LBracket | Punct::LBrace | Punct::ColonColon)
        )
    };
    let tight = |k: TokenKind| {
        matches!(
            k,
            TokenKind::Punct(
                Punct::RParen | Punct::RBracket | Punct::RBrace | Punct::Comma | Punct::ColonColon
            )
        )
    };
    !opens(prev) && !tight(next)
}
