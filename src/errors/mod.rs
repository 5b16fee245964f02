//! Error types and error handling for the compiler.
//!
//! This module defines the diagnostics raised by both passes. It includes:
//!
//! - The `Error` structure carrying the offending span and source excerpt
//! - Specific error variants for every rejected construct
//! - A coarse `ErrorKind` classification
//! - Helpful suggestions attached to common mistakes

pub mod errors;
