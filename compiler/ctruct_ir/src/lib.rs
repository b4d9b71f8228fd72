//! Ctruct IR: tokens, spans, interned names and the arena AST shared by
//! the lexer, parser and printer.
//!
//! # Design
//!
//! - **Intern everything**: identifier and literal text becomes `Name(u32)`
//! - **Flatten everything**: children are typed arena indices, not boxes
//! - **One owner per parse**: a `TokenList` owns its interner, a `Program`
//!   owns its arena

mod arena;
pub mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use arena::{ArenaMark, AstArena, DeclId, DeclaratorId, ExprId, ExprRange, StmtId, StmtRange, TypeId};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::{Position, Span, SpanError, Spanned};
pub use token::{Keyword, Punct, Token, TokenCapture, TokenKind, TokenList};
