//! Generator configuration.

use serde::Deserialize;

/// Options controlling the shape of the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Emit the preamble, the section comments inside functions and
    /// docstrings as block comments. Off produces bare declarations and code.
    pub emit_headings: bool,
}

impl GeneratorConfig {
    /// Only declarations and code, no comments.
    pub fn terse() -> Self {
        GeneratorConfig {
            emit_headings: false,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            emit_headings: true,
        }
    }
}
