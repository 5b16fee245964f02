use crate::{
    ast::ast::Span,
    errors::errors::{Error, ErrorImpl},
};

/// Separator between a scope qualifier and a bare symbol name.
pub const SCOPE_SEPARATOR: &str = "::";

/// Tracks the current scope and formats diagnostics against the source.
///
/// There is the global scope and at most one function scope on top of it;
/// a function scope may never be entered while another one is active.
#[derive(Debug, Clone)]
pub struct ScopeTracker<'a> {
    scope: Option<String>,
    lines: &'a [String],
}

impl<'a> ScopeTracker<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        ScopeTracker { scope: None, lines }
    }

    /// Enters the scope of function `name`.
    ///
    /// Fails with `NestedScope` when a function scope is already active.
    pub fn enter_scope(&mut self, name: &str, span: &Span) -> Result<(), Error> {
        if let Some(outer) = &self.scope {
            return Err(self.exception(
                span,
                ErrorImpl::NestedScope {
                    outer: outer.clone(),
                    inner: name.to_string(),
                },
            ));
        }
        log::trace!("entering scope {}", name);
        self.scope = Some(name.to_string());
        Ok(())
    }

    pub fn exit_scope(&mut self, name: &str) {
        debug_assert_eq!(self.scope.as_deref(), Some(name), "unpaired exit_scope");
        log::trace!("leaving scope {}", name);
        self.scope = None;
    }

    /// The canonical qualifier: empty at global level, the function name inside a body.
    pub fn current_scope(&self) -> &str {
        self.scope.as_deref().unwrap_or("")
    }

    pub fn is_global(&self) -> bool {
        self.scope.is_none()
    }

    pub fn scoped_sym(&self, bare_name: &str) -> String {
        qualify(self.current_scope(), bare_name)
    }

    /// Strips the scope qualifier from a canonical name.
    pub fn unscoped_sym(qualified_name: &str) -> &str {
        match qualified_name.rfind(SCOPE_SEPARATOR) {
            Some(index) => &qualified_name[index + SCOPE_SEPARATOR.len()..],
            None => qualified_name,
        }
    }

    pub fn lines(&self) -> &'a [String] {
        self.lines
    }

    /// Builds the fatal diagnostic for `span`, quoting its source text.
    pub fn exception(&self, span: &Span, error: ErrorImpl) -> Error {
        Error::new(error, *span, source_excerpt(self.lines, span))
    }
}

/// Renders `bare_name` qualified by `scope`.
pub fn qualify(scope: &str, bare_name: &str) -> String {
    if scope.is_empty() {
        bare_name.to_string()
    } else {
        format!("{}{}{}", scope, SCOPE_SEPARATOR, bare_name)
    }
}

/// The exact source text covered by `span`, with line breaks folded to spaces.
///
/// Returns an empty string for the null span or a span outside `lines`.
pub fn source_excerpt(lines: &[String], span: &Span) -> String {
    if span.is_null() || span.lineno > lines.len() {
        return String::new();
    }

    let clamped = span.end_lineno > lines.len();
    let last = span.end_lineno.max(span.lineno).min(lines.len());
    let mut parts: Vec<&str> = lines[span.lineno - 1..last]
        .iter()
        .map(|line| line.as_str())
        .collect();

    let end = parts.len() - 1;
    if !clamped {
        parts[end] = parts[end].get(..span.end_col_offset).unwrap_or(parts[end]);
    }
    parts[0] = parts[0].get(span.col_offset..).unwrap_or("");

    parts.join(" ")
}
