//! Declaration and statement layout.
//!
//! One declaration per line. Namespace, linkage and function bodies open
//! a brace on the header line and indent their contents; empty bodies
//! print as `{}`. Template headers sit on their own line.

use ctruct_ir::ast::{
    Decl, DeclKind, FunctionBody, FunctionDef, Handler, LinkageBody, MemInitializer, Program,
    SimpleDecl, StmtKind,
};
use ctruct_ir::{AstArena, DeclId, StmtId, TokenList};

use crate::context::FormatContext;
use crate::inline::{join_nonempty, InlineRenderer};

/// Format a parsed program to canonical source text.
///
/// `tokens` must be the list the program was parsed from; names and
/// literal text resolve through its interner.
pub fn format_program(program: &Program, tokens: &TokenList) -> String {
    let mut formatter = ProgramFormatter::new(&program.arena, tokens);
    formatter.format_decls(&program.decls);
    formatter.ctx.finalize()
}

struct ProgramFormatter<'a> {
    arena: &'a AstArena,
    inline: InlineRenderer<'a>,
    ctx: FormatContext,
}

impl<'a> ProgramFormatter<'a> {
    fn new(arena: &'a AstArena, tokens: &'a TokenList) -> Self {
        ProgramFormatter {
            arena,
            inline: InlineRenderer::new(arena, tokens),
            ctx: FormatContext::new(),
        }
    }

    fn format_decls(&mut self, decls: &[DeclId]) {
        for &id in decls {
            self.format_decl(id);
            self.ctx.emit_newline();
        }
    }

    /// Emit one declaration, leaving the cursor at the end of its last line.
    fn format_decl(&mut self, id: DeclId) {
        let decl: &'a Decl = self.arena.get_decl(id);
        match &decl.kind {
            DeclKind::Simple(simple) => {
                let text = self.simple_decl(simple);
                self.ctx.emit(&text);
            }
            DeclKind::Function(def) => self.format_function(def),
            DeclKind::Template(template) => {
                let header = self.inline.template_header(&template.params);
                self.ctx.emit_line(&header);
                self.format_decl(template.decl);
            }
            DeclKind::ExplicitSpecialization(inner) => {
                self.ctx.emit_line("template <>");
                self.format_decl(*inner);
            }
            DeclKind::ExplicitInstantiation { is_extern, decl } => {
                self.ctx
                    .emit(if *is_extern { "extern template " } else { "template " });
                self.format_decl(*decl);
            }
            DeclKind::Namespace(ns) => {
                if ns.inline {
                    self.ctx.emit("inline ");
                }
                self.ctx.emit("namespace ");
                if let Some(name) = ns.name {
                    self.ctx.emit(self.inline.name(name));
                    self.ctx.emit(" ");
                }
                self.format_braced_decls(&ns.decls);
            }
            DeclKind::NamespaceAlias { alias, target } => {
                let text = format!(
                    "namespace {} = {};",
                    self.inline.name(*alias),
                    self.inline.qualified_name(target)
                );
                self.ctx.emit(&text);
            }
            DeclKind::Linkage(linkage) => {
                self.ctx.emit("extern ");
                self.ctx.emit(self.inline.name(linkage.abi));
                self.ctx.emit(" ");
                match &linkage.body {
                    LinkageBody::Braced(decls) => self.format_braced_decls(decls),
                    LinkageBody::Single(inner) => self.format_decl(*inner),
                }
            }
            DeclKind::Attribute(attrs) => {
                let text = format!("{};", self.inline.attributes(attrs));
                self.ctx.emit(&text);
            }
            DeclKind::UsingDirective(name) => {
                let text = format!("using namespace {};", self.inline.qualified_name(name));
                self.ctx.emit(&text);
            }
            DeclKind::UsingDeclaration { typename, name } => {
                let typename = if *typename { "typename " } else { "" };
                let text = format!("using {typename}{};", self.inline.qualified_name(name));
                self.ctx.emit(&text);
            }
            DeclKind::Alias { name, attrs, ty } => {
                let head = join_nonempty(self.inline.name(*name), &self.inline.attributes(attrs));
                let text = format!("using {head} = {};", self.inline.type_name(ty));
                self.ctx.emit(&text);
            }
            DeclKind::StaticAssert { condition, message } => {
                let mut text = format!("static_assert({}", self.inline.expr(*condition));
                if let Some(message) = message {
                    text.push_str(", ");
                    text.push_str(self.inline.name(*message));
                }
                text.push_str(");");
                self.ctx.emit(&text);
            }
            DeclKind::Empty => self.ctx.emit(";"),
        }
    }

    fn simple_decl(&self, simple: &SimpleDecl) -> String {
        let head = join_nonempty(
            &self.inline.attributes(&simple.attrs),
            &self.inline.specifiers(&simple.specifiers),
        );
        let declarators: Vec<String> = simple
            .declarators
            .iter()
            .map(|d| {
                let mut text = self.inline.declarator(d.declarator);
                if let Some(init) = &d.init {
                    text.push_str(&self.inline.initializer(init));
                }
                text
            })
            .collect();
        format!("{};", join_nonempty(&head, &declarators.join(", ")))
    }

    fn format_braced_decls(&mut self, decls: &[DeclId]) {
        if decls.is_empty() {
            self.ctx.emit("{}");
            return;
        }
        self.ctx.emit_line("{");
        self.ctx.indent();
        self.format_decls(decls);
        self.ctx.dedent();
        self.ctx.emit("}");
    }

    fn format_function(&mut self, def: &FunctionDef) {
        let head = join_nonempty(
            &self.inline.attributes(&def.attrs),
            &self.inline.specifiers(&def.specifiers),
        );
        let head = join_nonempty(&head, &self.inline.declarator(def.declarator));
        self.ctx.emit(&head);
        match &def.body {
            FunctionBody::Default => self.ctx.emit(" = default;"),
            FunctionBody::Delete => self.ctx.emit(" = delete;"),
            FunctionBody::Block { ctor_inits, body } => {
                self.format_ctor_inits(ctor_inits);
                self.ctx.emit(" ");
                self.format_stmt(*body);
            }
            FunctionBody::Try {
                ctor_inits,
                body,
                handlers,
            } => {
                self.ctx.emit(" try");
                self.format_ctor_inits(ctor_inits);
                self.ctx.emit(" ");
                self.format_stmt(*body);
                for handler in handlers {
                    self.format_handler(handler);
                }
            }
        }
    }

    fn format_ctor_inits(&mut self, inits: &[MemInitializer]) {
        if inits.is_empty() {
            return;
        }
        let list: Vec<String> = inits.iter().map(|i| self.inline.mem_initializer(i)).collect();
        self.ctx.emit(" : ");
        self.ctx.emit(&list.join(", "));
    }

    fn format_handler(&mut self, handler: &Handler) {
        let param = match &handler.param {
            Some(param) => self.inline.parameter(param),
            None => "...".to_string(),
        };
        self.ctx.emit(&format!(" catch ({param}) "));
        self.format_stmt(handler.body);
    }

    // ===== Statements =====

    fn format_stmt(&mut self, id: StmtId) {
        match self.arena.get_stmt(id).kind {
            StmtKind::Expr(expr) => {
                let text = format!("{};", self.inline.expr(expr));
                self.ctx.emit(&text);
            }
            StmtKind::Block(range) => {
                let stmts = self.arena.get_stmt_list(range);
                if stmts.is_empty() {
                    self.ctx.emit("{}");
                    return;
                }
                self.ctx.emit_line("{");
                self.ctx.indent();
                for &stmt in stmts {
                    self.format_stmt(stmt);
                    self.ctx.emit_newline();
                }
                self.ctx.dedent();
                self.ctx.emit("}");
            }
            StmtKind::Return(Some(expr)) => {
                let text = format!("return {};", self.inline.expr(expr));
                self.ctx.emit(&text);
            }
            StmtKind::Return(None) => self.ctx.emit("return;"),
            StmtKind::Decl(decl) => self.format_decl(decl),
            StmtKind::Empty => self.ctx.emit(";"),
        }
    }
}
