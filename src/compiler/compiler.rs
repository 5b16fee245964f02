//! Main generator module.
//!
//! This module contains the core Compiler structure driving the generation
//! pass: it walks a resolved module once, emits declarations for every scope
//! from the symbol table and hands statements to [`gen_statement`].

use std::io::Write;

use crate::{
    ast::{
        ast::{Located, Module, Span},
        statements::Stmt,
        types::TypeDescriptor,
    },
    config::GeneratorConfig,
    errors::errors::{Error, ErrorImpl},
    scope::scope_tracker::ScopeTracker,
    type_checker::symbol_table::SymbolTable,
    MK_ERROR,
};

use super::{
    builtins::{primitive_name, PREAMBLE},
    stmt::gen_statement,
    writer::LineWriter,
};

/// The state of a single generation run.
///
/// This structure holds:
/// - The symbol table produced by resolution (read-only)
/// - A scope tracker mirroring the one the resolver used
/// - The configuration deciding whether headings are emitted
/// - The line writer the output goes through
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the symbol table and the source lines
/// * `W` - The sink receiving complete lines
pub struct Compiler<'a, W: Write> {
    /// Types of every symbol, as fixed by resolution
    pub table: &'a SymbolTable,
    /// Current scope, for qualifying names and quoting source in diagnostics
    pub scope: ScopeTracker<'a>,
    /// Output options
    pub config: GeneratorConfig,
    /// Buffered, indentation-aware output
    pub writer: LineWriter<W>,
}

impl<'a, W: Write> Compiler<'a, W> {
    /// Creates a new Compiler instance.
    ///
    /// # Arguments
    ///
    /// * `table` - The symbol table returned by `resolve` for the same module
    /// * `lines` - The source text split into lines, for diagnostics
    /// * `config` - Output options
    /// * `sink` - Where complete lines are written
    ///
    /// # Returns
    ///
    /// A new Compiler positioned at the global scope with no indentation.
    pub fn new(
        table: &'a SymbolTable,
        lines: &'a [String],
        config: GeneratorConfig,
        sink: W,
    ) -> Self {
        Compiler {
            table,
            scope: ScopeTracker::new(lines),
            config,
            writer: LineWriter::new(sink),
        }
    }

    /// Appends a fragment to the output.
    ///
    /// # Arguments
    ///
    /// * `fragment` - Text to append; may span several lines
    /// * `indent` - Whether to prefix each line with the current indentation
    ///
    /// # Returns
    ///
    /// `OutputFailure` if the sink rejects a flushed line.
    pub fn output(&mut self, fragment: &str, indent: bool) -> Result<(), Error> {
        self.writer
            .output(fragment, indent)
            .map_err(|error| output_failure(&error))
    }

    /// Spelling of a primitive type in the output language.
    ///
    /// # Arguments
    ///
    /// * `ty` - The descriptor to map
    /// * `span` - Location quoted if the type has no plain spelling
    pub fn mapped_type(&self, ty: &TypeDescriptor, span: &Span) -> Result<&'static str, Error> {
        primitive_name(ty).ok_or_else(|| {
            MK_ERROR!(
                self.scope,
                span span,
                ErrorImpl::UnsupportedConstruct {
                    construct: format!("values of type {} have no plain declaration", ty)
                }
            )
        })
    }

    /// Looks up the recorded type of a qualified symbol.
    ///
    /// # Returns
    ///
    /// `UntypedSymbol` when the symbol is known but never received a type.
    pub fn symbol_type(&self, symbol: &str, node: &dyn Located) -> Result<&'a TypeDescriptor, Error> {
        self.table.get_type(symbol).ok_or_else(|| {
            MK_ERROR!(
                self.scope,
                node,
                ErrorImpl::UntypedSymbol {
                    symbol: symbol.to_string()
                }
            )
        })
    }

    /// Emits the declaration of one symbol.
    ///
    /// Primitives become `<type> <name>;`, lists a fixed-size array of the
    /// mapped element type.
    fn emit_declaration(&mut self, symbol: &str, span: &Span) -> Result<(), Error> {
        let table = self.table;
        let ty = table.get_type(symbol).ok_or_else(|| {
            MK_ERROR!(
                self.scope,
                span span,
                ErrorImpl::UntypedSymbol {
                    symbol: symbol.to_string()
                }
            )
        })?;
        let name = ScopeTracker::unscoped_sym(symbol);

        let declaration = match ty {
            TypeDescriptor::List { size, element } => {
                format!("{} {}[{}];\n", self.mapped_type(element, span)?, name, size)
            }
            _ => format!("{} {};\n", self.mapped_type(ty, span)?, name),
        };
        self.output(&declaration, true)
    }

    /// Emits declarations for every symbol the current scope owns, sorted by name.
    ///
    /// # Arguments
    ///
    /// * `span` - Location of the scope's owner, quoted on failure
    pub fn emit_scope_local_decls(&mut self, span: &Span) -> Result<(), Error> {
        let table = self.table;
        let locals = table.find_local_syms(self.scope.current_scope());
        if locals.is_empty() {
            return Ok(());
        }

        if self.config.emit_headings && !self.scope.is_global() {
            self.output("/* Local Variable Declarations */\n", true)?;
        }
        for symbol in locals {
            self.emit_declaration(symbol, span)?;
        }
        self.output("\n", false)
    }

    /// Emits a docstring as a block comment. Nothing is emitted with headings off.
    pub fn emit_docstring(&mut self, text: &str) -> Result<(), Error> {
        if !self.config.emit_headings {
            return Ok(());
        }

        let lines = clean_docstring(text);
        let comment = match lines.as_slice() {
            [] => return Ok(()),
            [line] => format!("/* {} */\n", line),
            lines => {
                let body: Vec<String> = lines.iter().map(|line| format!("  {}", line)).collect();
                format!("/*\n{}\n*/\n", body.join("\n"))
            }
        };
        self.output(&comment, true)
    }

    /// Emits a leading docstring of `body` as a comment.
    ///
    /// # Returns
    ///
    /// The statements that remain to be generated.
    pub fn emit_leading_docstring<'b>(&mut self, body: &'b [Stmt]) -> Result<&'b [Stmt], Error> {
        if let Some((first, rest)) = body.split_first() {
            if let Some(text) = first.as_docstring() {
                self.emit_docstring(text)?;
                return Ok(rest);
            }
        }
        Ok(body)
    }

    /// Generates the whole module.
    ///
    /// Emits the preamble (with headings on), the module docstring, the
    /// module-level declarations, then every top-level statement in order.
    pub fn gen(&mut self, module: &Module) -> Result<(), Error> {
        if self.config.emit_headings {
            self.output(PREAMBLE, false)?;
        }

        let body = self.emit_leading_docstring(&module.body)?;
        self.emit_scope_local_decls(&Span::default())?;
        for stmt in body {
            gen_statement(self, stmt)?;
        }
        Ok(())
    }

    /// Flushes whatever is still pending and returns the sink.
    pub fn finish(self) -> Result<W, Error> {
        self.writer.finish().map_err(|error| output_failure(&error))
    }
}

fn output_failure(error: &std::io::Error) -> Error {
    Error::new(
        ErrorImpl::OutputFailure {
            message: error.to_string(),
        },
        Span::default(),
        String::new(),
    )
}

/// Dedents a docstring and neutralises comment terminators inside it.
///
/// The first line loses its own leading whitespace; the remaining lines lose
/// the indentation they share, counted in spaces and tabs only. Leading and
/// trailing blank lines are dropped.
pub fn clean_docstring(text: &str) -> Vec<String> {
    let raw: Vec<&str> = text.lines().collect();
    let margin = raw
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut lines: Vec<String> = raw
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let line = if index == 0 {
                line.trim_start()
            } else {
                line.get(margin..).unwrap_or("")
            };
            line.trim_end().replace("*/", "* /")
        })
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|line| line.is_empty()).count();
    lines.drain(..leading);
    lines
}

/// Generates target text for `module` into `sink`.
///
/// # Arguments
///
/// * `module` - The module that was resolved into `table`
/// * `table` - The symbol table returned by `resolve`
/// * `lines` - Source lines, for diagnostics
/// * `config` - Output options
/// * `sink` - Receives the output line by line
///
/// # Returns
///
/// The sink once everything has been flushed.
pub fn generate_to<W: Write>(
    module: &Module,
    table: &SymbolTable,
    lines: &[String],
    config: GeneratorConfig,
    sink: W,
) -> Result<W, Error> {
    let mut compiler = Compiler::new(table, lines, config, sink);
    compiler.gen(module)?;
    compiler.finish()
}

/// Generates target text for `module` into a string.
///
/// Same as [`generate_to`] with an in-memory sink.
pub fn generate(
    module: &Module,
    table: &SymbolTable,
    lines: &[String],
    config: GeneratorConfig,
) -> Result<String, Error> {
    let bytes = generate_to(module, table, lines, config, Vec::new())?;
    String::from_utf8(bytes).map_err(|error| {
        Error::new(
            ErrorImpl::OutputFailure {
                message: error.to_string(),
            },
            Span::default(),
            String::new(),
        )
    })
}
