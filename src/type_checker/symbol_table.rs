use std::collections::{HashMap, HashSet};

use crate::{
    ast::types::TypeDescriptor,
    scope::scope_tracker::{ScopeTracker, SCOPE_SEPARATOR},
};

/// Symbols per scope and the type of every qualified symbol.
///
/// Only the resolver can build one, so holding a `SymbolTable` means
/// resolution ran to completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    /// Key = scope qualifier, value = qualified symbol names declared there
    symbols: HashMap<String, HashSet<String>>,
    /// Key = qualified symbol name, value = its type
    types: HashMap<String, TypeDescriptor>,
    /// Key = function name, value = qualified parameter names in declaration order
    parameters: HashMap<String, Vec<String>>,
}

impl SymbolTable {
    pub(crate) fn new() -> Self {
        SymbolTable::default()
    }

    pub(crate) fn add_symbol_to_scope(&mut self, scope: &str, symbol: String) {
        self.symbols.entry(scope.to_string()).or_default().insert(symbol);
    }

    /// Records the type of a qualified symbol. Returns false if it already has one.
    pub(crate) fn add_symbol_type(&mut self, symbol: String, symbol_type: TypeDescriptor) -> bool {
        if self.types.contains_key(&symbol) {
            return false;
        }
        log::debug!("recorded {} as {}", symbol, symbol_type);
        self.types.insert(symbol, symbol_type);
        true
    }

    pub(crate) fn set_func_ret_type(&mut self, function: &str, return_type: TypeDescriptor) {
        debug_assert!(self.types.get(function).is_some_and(|ty| ty.is_deferred_function()));
        log::debug!("return type of {} fixed to {}", function, return_type);
        self.types
            .insert(function.to_string(), TypeDescriptor::func(return_type));
    }

    pub(crate) fn add_parameter(&mut self, function: &str, parameter: String) {
        self.parameters
            .entry(function.to_string())
            .or_default()
            .push(parameter);
    }

    pub fn is_known_in_scope(&self, scope: &str, symbol: &str) -> bool {
        self.symbols
            .get(scope)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Type recorded under exactly this qualified name.
    pub fn get_type(&self, symbol: &str) -> Option<&TypeDescriptor> {
        self.types.get(symbol)
    }

    /// Looks up a qualified name, falling back to its bare (global) name.
    ///
    /// Returns the name the type was found under along with the type.
    pub fn find_type<'t>(&'t self, symbol: &'t str) -> Option<(&'t str, &'t TypeDescriptor)> {
        if let Some(ty) = self.types.get(symbol) {
            return Some((symbol, ty));
        }
        let bare = ScopeTracker::unscoped_sym(symbol);
        self.types.get(bare).map(|ty| (bare, ty))
    }

    /// Return type of a function; `void` while it is still deferred.
    pub fn find_ret_type(&self, function: &str) -> Option<TypeDescriptor> {
        self.find_type(function).and_then(|(_, ty)| ty.return_type())
    }

    /// Qualified names that need a local declaration in `scope`, sorted.
    ///
    /// Function parameters and names pulled in with `global` are excluded.
    pub fn find_local_syms(&self, scope: &str) -> Vec<&str> {
        let prefix = if scope.is_empty() {
            String::new()
        } else {
            format!("{}{}", scope, SCOPE_SEPARATOR)
        };
        let parameters = self.parameters(scope);

        let mut locals: Vec<&str> = self
            .symbols
            .get(scope)
            .map(|symbols| {
                symbols
                    .iter()
                    .filter(|symbol| symbol.starts_with(&prefix))
                    .filter(|symbol| !parameters.contains(*symbol))
                    .map(|symbol| symbol.as_str())
                    .collect()
            })
            .unwrap_or_default();
        locals.sort_unstable();
        locals
    }

    /// Qualified parameter names of `function`, in declaration order.
    pub fn parameters(&self, function: &str) -> &[String] {
        self.parameters
            .get(function)
            .map(|parameters| parameters.as_slice())
            .unwrap_or(&[])
    }
}
