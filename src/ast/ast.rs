use serde::Deserialize;

use super::statements::Stmt;

/// Source span of a node, using the front end's field names.
///
/// Lines are 1-based, columns are 0-based byte offsets. A node built without
/// position information carries the all-zero span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Span {
    pub lineno: usize,
    pub col_offset: usize,
    pub end_lineno: usize,
    pub end_col_offset: usize,
}

impl Span {
    pub fn new(lineno: usize, col_offset: usize, end_lineno: usize, end_col_offset: usize) -> Self {
        Span {
            lineno,
            col_offset,
            end_lineno,
            end_col_offset,
        }
    }

    /// Span covering a single line fragment.
    pub fn line(lineno: usize, col_offset: usize, end_col_offset: usize) -> Self {
        Span::new(lineno, col_offset, lineno, end_col_offset)
    }

    pub fn is_null(&self) -> bool {
        self.lineno == 0
    }
}

/// Anything carrying a span and a node-kind name usable in diagnostics.
pub trait Located {
    fn get_span(&self) -> &Span;
    /// Name of the node kind, as the front end spells it.
    fn kind_name(&self) -> &str;
}

/// Root of a compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Module { body }
    }

    /// Reads a tree dumped as JSON, one object per node with its class name under `_type`.
    pub fn from_json(json: &str) -> serde_json::Result<Module> {
        serde_json::from_str(json)
    }

    pub fn from_json_value(value: serde_json::Value) -> serde_json::Result<Module> {
        serde_json::from_value(value)
    }
}
