//! Ctruct Formatter
//!
//! Prints a parsed [`Program`](ctruct_ir::ast::Program) back to canonical
//! C++ source. Output is stable under reparsing: formatting the parse of
//! formatted output reproduces it exactly.
//!
//! # Modules
//!
//! - [`emitter`]: Output abstraction
//! - [`context`]: Indentation and line-start tracking
//! - [`inline`]: Single-line rendering of expressions, types and declarators
//! - [`declarations`]: Line layout for declarations and function bodies

pub mod context;
pub mod declarations;
pub mod emitter;
pub mod inline;

pub use context::{FormatContext, INDENT_WIDTH};
pub use declarations::format_program;
pub use emitter::{Emitter, StringEmitter};
pub use inline::InlineRenderer;
