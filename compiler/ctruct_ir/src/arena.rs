//! Arena allocation for the flat AST.
//!
//! Every node kind lives in its own contiguous `Vec`; children refer to
//! each other with typed indices. Backtracking parsers take an
//! [`ArenaMark`] and truncate back to it, so abandoned attempts leave no
//! orphaned nodes behind.

use std::fmt;

use crate::ast::{Decl, Declarator, DeclaratorKind, Expr, FunctionDeclarator, QualifiedName, Stmt, Type};

macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident,)*) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    )* };
}

define_id! {
    /// Index into the expression arena.
    ExprId,
    /// Index into the statement arena.
    StmtId,
    /// Index into the declaration arena.
    DeclId,
    /// Index into the declarator arena.
    DeclaratorId,
    /// Index into the type-specifier arena.
    TypeId,
}

macro_rules! define_range {
    ($($(#[$meta:meta])* $name:ident,)*) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: Self = Self { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                Self { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}..{})", stringify!($name), self.start, self.start + self.len)
            }
        }
    )* };
}

define_range! {
    /// Slice of the flattened expression list storage.
    ExprRange,
    /// Slice of the flattened statement list storage.
    StmtRange,
}

/// Arena lengths captured for later truncation.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ArenaMark {
    exprs: usize,
    expr_lists: usize,
    stmts: usize,
    stmt_lists: usize,
    decls: usize,
    declarators: usize,
    types: usize,
}

/// Contiguous storage for every node of one program.
#[derive(Clone, Eq, PartialEq, Default)]
pub struct AstArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    stmts: Vec<Stmt>,
    stmt_lists: Vec<StmtId>,
    decls: Vec<Decl>,
    declarators: Vec<Declarator>,
    types: Vec<Type>,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with capacity estimated from the token count.
    pub fn with_capacity(token_count: usize) -> Self {
        let estimate = token_count / 4;
        AstArena {
            exprs: Vec::with_capacity(estimate),
            expr_lists: Vec::with_capacity(estimate / 4),
            stmts: Vec::with_capacity(estimate / 8),
            stmt_lists: Vec::with_capacity(estimate / 8),
            decls: Vec::with_capacity(estimate / 4),
            declarators: Vec::with_capacity(estimate / 2),
            types: Vec::with_capacity(estimate / 4),
        }
    }

    // ===== Expressions =====

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len() as u32;
        self.expr_lists.extend(exprs);
        let len = self.expr_lists.len() as u32 - start;
        ExprRange::new(start, len)
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    // ===== Statements =====

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(self.stmts.len() as u32);
        self.stmts.push(stmt);
        id
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn alloc_stmt_list(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = self.stmt_lists.len() as u32;
        self.stmt_lists.extend(stmts);
        let len = self.stmt_lists.len() as u32 - start;
        StmtRange::new(start, len)
    }

    #[inline]
    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        let start = range.start as usize;
        &self.stmt_lists[start..start + range.len()]
    }

    // ===== Declarations =====

    #[inline]
    pub fn alloc_decl(&mut self, decl: Decl) -> DeclId {
        let id = DeclId::new(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    #[inline]
    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    // ===== Declarators =====

    #[inline]
    pub fn alloc_declarator(&mut self, declarator: Declarator) -> DeclaratorId {
        let id = DeclaratorId::new(self.declarators.len() as u32);
        self.declarators.push(declarator);
        id
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_declarator(&self, id: DeclaratorId) -> &Declarator {
        &self.declarators[id.index()]
    }

    // ===== Types =====

    #[inline]
    pub fn alloc_type(&mut self, ty: Type) -> TypeId {
        let id = TypeId::new(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_type(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    // ===== Backtracking =====

    pub fn mark(&self) -> ArenaMark {
        ArenaMark {
            exprs: self.exprs.len(),
            expr_lists: self.expr_lists.len(),
            stmts: self.stmts.len(),
            stmt_lists: self.stmt_lists.len(),
            decls: self.decls.len(),
            declarators: self.declarators.len(),
            types: self.types.len(),
        }
    }

    /// Drop every node allocated after `mark` was taken.
    pub fn truncate(&mut self, mark: ArenaMark) {
        self.exprs.truncate(mark.exprs);
        self.expr_lists.truncate(mark.expr_lists);
        self.stmts.truncate(mark.stmts);
        self.stmt_lists.truncate(mark.stmt_lists);
        self.decls.truncate(mark.decls);
        self.declarators.truncate(mark.declarators);
        self.types.truncate(mark.types);
    }

    // ===== Declarator queries =====

    /// The declarator-id at the core of a declarator, if it has one.
    pub fn declarator_name(&self, id: DeclaratorId) -> Option<&QualifiedName> {
        let mut current = id;
        loop {
            match &self.get_declarator(current).kind {
                DeclaratorKind::Name { name, .. } => return Some(name),
                DeclaratorKind::Abstract { .. } => return None,
                DeclaratorKind::Paren(inner)
                | DeclaratorKind::Ptr { inner, .. }
                | DeclaratorKind::Array { inner, .. } => current = *inner,
                DeclaratorKind::Function(func) => current = func.inner,
            }
        }
    }

    /// The function suffix that applies directly to the declarator-id.
    ///
    /// Parentheses are transparent. `f(int)` and `*f(int)` declare
    /// functions; `(*fp)(int)` declares a pointer.
    pub fn function_declarator(&self, id: DeclaratorId) -> Option<&FunctionDeclarator> {
        let mut innermost: Option<&DeclaratorKind> = None;
        let mut current = id;
        loop {
            let kind = &self.get_declarator(current).kind;
            match kind {
                DeclaratorKind::Name { .. } | DeclaratorKind::Abstract { .. } => break,
                DeclaratorKind::Paren(inner) => current = *inner,
                DeclaratorKind::Ptr { inner, .. } | DeclaratorKind::Array { inner, .. } => {
                    innermost = Some(kind);
                    current = *inner;
                }
                DeclaratorKind::Function(func) => {
                    innermost = Some(kind);
                    current = func.inner;
                }
            }
        }
        match innermost {
            Some(DeclaratorKind::Function(func)) => Some(func),
            _ => None,
        }
    }

    #[inline]
    pub fn is_function_declarator(&self, id: DeclaratorId) -> bool {
        self.function_declarator(id).is_some()
    }
}

impl fmt::Debug for AstArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstArena")
            .field("exprs", &self.exprs.len())
            .field("stmts", &self.stmts.len())
            .field("decls", &self.decls.len())
            .field("declarators", &self.declarators.len())
            .field("types", &self.types.len())
            .finish_non_exhaustive()
    }
}
