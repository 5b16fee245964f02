//! Scope tracking shared by the resolver and the code generator.
//!
//! Both passes walk the same tree and re-derive the same scopes. This
//! module provides:
//!
//! - The single-depth scope stack (global plus at most one function)
//! - Canonical `scope::name` qualification of symbols
//! - The diagnostic formatter quoting source excerpts

pub mod scope_tracker;
