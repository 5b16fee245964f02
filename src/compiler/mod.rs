//! Code generation module.
//!
//! This module contains the generator that turns a resolved module into
//! C-like target text. It handles:
//!
//! - Declarations for every scope, taken from the symbol table
//! - Function signatures and bodies
//! - Expression rendering, including rewrites of built-in conversions
//! - Line-buffered, indentation-aware output

pub mod builtins;
pub mod compiler;
pub mod expr;
pub mod stmt;
pub mod writer;
