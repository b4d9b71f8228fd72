//! Grammar productions, one module per syntactic category.
//!
//! - `expr`: precedence climbing over the fixed operator table
//! - `name`: qualified names and template argument lists
//! - `attr`: `[[...]]` and `alignas` specifiers
//! - `specifiers`: decl-specifier-seqs and type-ids
//! - `declarator`: pointer prefixes, noptr bases and suffixes
//! - `decl`: the declaration dispatcher
//! - `template`: template parameter lists
//! - `stmt`: function bodies

mod attr;
mod decl;
mod declarator;
mod expr;
mod name;
mod specifiers;
mod stmt;
mod template;

pub(crate) use declarator::DeclaratorMode;
pub(crate) use specifiers::SpecifierMode;
