//! Symbol and type resolution.
//!
//! The first of the two passes. It walks the module once and builds a
//! [`symbol_table::SymbolTable`]:
//!
//! - which qualified names each scope declares
//! - the type descriptor of every variable, parameter and function
//! - the return type of each function, fixed by its first `return`
//!
//! Resolution is fail-fast. The first violated rule aborts the pass with an
//! [`Error`](crate::errors::errors::Error) that quotes the offending source.

pub mod symbol_table;
pub mod type_checker;

#[cfg(test)]
mod tests;
