#![allow(clippy::module_inception)]

use crate::{
    ast::ast::Module, compiler::compiler::generate, config::GeneratorConfig,
    errors::errors::Error, type_checker::type_checker::resolve,
};

pub mod ast;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod macros;
pub mod scope;
pub mod type_checker;

extern crate regex;

/// Splits source text into the lines diagnostics quote from.
pub fn source_lines(source: &str) -> Vec<String> {
    source.lines().map(String::from).collect()
}

/// Resolves `module` and generates its target text.
///
/// `source` is the text the module was parsed from; it is only used to quote
/// the offending code when a pass fails.
pub fn transpile(module: &Module, source: &str, config: GeneratorConfig) -> Result<String, Error> {
    let lines = source_lines(source);
    let table = resolve(module, &lines)?;
    log::debug!("resolution finished, generating");
    generate(module, &table, &lines, config)
}

/// Like [`transpile`], reading the module from a JSON dump of its syntax tree.
pub fn transpile_json(json: &str, source: &str, config: GeneratorConfig) -> Result<String, Error> {
    let module = Module::from_json(json).map_err(|error| {
        Error::new(
            errors::errors::ErrorImpl::UnsupportedConstruct {
                construct: format!("malformed syntax tree: {}", error)
            },
            ast::ast::Span::default(),
            String::new(),
        )
    })?;
    transpile(&module, source, config)
}
