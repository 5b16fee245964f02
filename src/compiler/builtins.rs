//! Fixed tables the generator consults: primitive type names in the output
//! language, the built-in conversions it rewrites, and the preamble.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ast::types::TypeDescriptor;

/// Emitted ahead of everything else when headings are on.
pub const PREAMBLE: &str = "/* Generated by sketchc. Edits will be overwritten. */\n\
#include <Arduino.h>\n\
#include <string>\n\
\n\
using namespace std;\n\
\n";

/// How a call to a built-in conversion is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `str(...)`: a literal argument becomes a quoted string, anything else `to_string(...)`
    ToString,
    /// Functional cast to the named output type
    Cast(&'static str),
    /// `list(...)` / `tuple(...)` of a literal becomes a brace initializer
    Braced,
}

lazy_static! {
    pub static ref TYPE_LOOKUP: HashMap<&'static str, &'static str> = HashMap::from([
        ("int", "int"),
        ("float", "double"),
        ("str", "string"),
        ("bool", "bool"),
        ("void", "void"),
    ]);
    pub static ref CONVERSIONS: HashMap<&'static str, Conversion> = HashMap::from([
        ("str", Conversion::ToString),
        ("int", Conversion::Cast("int")),
        ("float", Conversion::Cast("double")),
        ("bool", Conversion::Cast("bool")),
        ("list", Conversion::Braced),
        ("tuple", Conversion::Braced),
    ]);
}

/// Output spelling of a primitive descriptor; `None` for composites.
pub fn primitive_name(ty: &TypeDescriptor) -> Option<&'static str> {
    if !ty.is_primitive() {
        return None;
    }
    TYPE_LOOKUP.get(ty.to_string().as_str()).copied()
}
