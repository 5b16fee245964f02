use crate::{
    ast::{
        ast::{Located, Module, Span},
        expressions::{Constant, Expr, ExprKind, UnaryOperator},
        statements::{Arg, FunctionDef, Stmt, StmtKind},
        types::TypeDescriptor,
    },
    errors::errors::{Error, ErrorImpl},
    scope::scope_tracker::{source_excerpt, ScopeTracker},
    MK_ERROR,
};

use super::symbol_table::SymbolTable;

#[derive(Debug)]
pub struct TypeChecker<'a> {
    pub table: SymbolTable,
    pub scope: ScopeTracker<'a>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        TypeChecker {
            table: SymbolTable::new(),
            scope: ScopeTracker::new(lines),
        }
    }

    fn is_known_in_current_scope(&self, symbol: &str) -> bool {
        self.table
            .is_known_in_scope(self.scope.current_scope(), symbol)
    }

    /// Type of a name as seen from the current scope, falling back to the global name.
    pub fn fetch_variable_type(&self, name: &str, node: &Expr) -> Result<TypeDescriptor, Error> {
        let scoped = self.scope.scoped_sym(name);
        if let Some((_, ty)) = self.table.find_type(&scoped) {
            return Ok(ty.clone());
        }

        if self.is_known_in_current_scope(&scoped) || self.is_known_in_current_scope(name) {
            Err(MK_ERROR!(self.scope, node, ErrorImpl::UntypedSymbol { symbol: scoped }))
        } else {
            Err(MK_ERROR!(self.scope, node, ErrorImpl::SymbolNotFound { symbol: scoped }))
        }
    }

    /// Declares `name` in the current scope with an annotated type.
    fn handle_annotated_variable(
        &mut self,
        name: &str,
        var_type: TypeDescriptor,
        span: &Span,
    ) -> Result<(), Error> {
        let scoped = self.scope.scoped_sym(name);

        if let Some(known_type) = self.table.get_type(&scoped) {
            if *known_type != var_type {
                return Err(MK_ERROR!(
                    self.scope,
                    span span,
                    ErrorImpl::TypeConflict {
                        symbol: name.to_string(),
                        expected: known_type.to_string(),
                        received: var_type.to_string(),
                    }
                ));
            }
        }

        if self.table.get_type(&scoped).is_some()
            || self.is_known_in_current_scope(&scoped)
            || self.is_known_in_current_scope(name)
        {
            return Err(MK_ERROR!(
                self.scope,
                span span,
                ErrorImpl::Redeclaration {
                    symbol: name.to_string(),
                    scope: self.scope.current_scope().to_string(),
                }
            ));
        }

        self.table
            .add_symbol_to_scope(self.scope.current_scope(), scoped.clone());
        self.table.add_symbol_type(scoped, var_type);
        Ok(())
    }
}

/// Resolves an annotation to a type. `None` is accepted where `allow_void` is set.
///
/// A name must be a primitive; a string annotation holds a descriptor in its
/// text form, which also admits lists (`"list:3:int"`).
pub fn annotation_type(
    type_checker: &TypeChecker,
    annotation: &Expr,
    allow_void: bool,
) -> Result<TypeDescriptor, Error> {
    let unknown = |type_: String| MK_ERROR!(type_checker.scope, annotation, ErrorImpl::UnknownType { type_ });

    match &annotation.kind {
        ExprKind::Name { id } => TypeDescriptor::from_annotation(id).ok_or_else(|| unknown(id.clone())),
        ExprKind::Constant {
            value: Constant::Str(text),
        } => {
            let parsed = text
                .parse::<TypeDescriptor>()
                .map_err(|error| MK_ERROR!(type_checker.scope, annotation, error))?;
            match parsed {
                TypeDescriptor::Func(_) => Err(unknown(text.clone())),
                TypeDescriptor::Void if !allow_void => Err(unknown(text.clone())),
                TypeDescriptor::List { size: 0, .. } => {
                    Err(MK_ERROR!(type_checker.scope, annotation, ErrorImpl::EmptyContainer))
                }
                ty => Ok(ty),
            }
        }
        ExprKind::Constant {
            value: Constant::None,
        } if allow_void => Ok(TypeDescriptor::Void),
        _ => Err(unknown(source_excerpt(type_checker.scope.lines(), &annotation.span))),
    }
}

/// Type of the value in an annotated assignment.
///
/// Besides everything `infer_expr_type` handles, a string literal is a `str`
/// and a conversion call (`int(..)`, `str(..)`, ...) has the type it converts
/// to. A call to a function with a fixed return type has that type. `None`
/// means the value comes from a call the resolver knows nothing about, and the
/// annotation is taken as given.
fn annotated_value_type(type_checker: &TypeChecker, value: &Expr) -> Result<Option<TypeDescriptor>, Error> {
    match &value.kind {
        ExprKind::Constant {
            value: Constant::Str(_),
        } => Ok(Some(TypeDescriptor::Str)),
        ExprKind::Call { func, args, .. } => {
            let Some(callee) = func.as_name() else {
                return Ok(None);
            };

            if let (Some(converted), [argument]) = (TypeDescriptor::from_annotation(callee), args.as_slice()) {
                annotated_value_type(type_checker, argument)?;
                return Ok(Some(converted));
            }

            let scoped = type_checker.scope.scoped_sym(callee);
            match type_checker.table.find_type(&scoped) {
                Some((_, TypeDescriptor::Func(Some(ret)))) => Ok(Some((**ret).clone())),
                _ => Ok(None),
            }
        }
        _ => infer_expr_type(type_checker, value).map(Some),
    }
}

/// Infers the type of an expression bottom-up.
pub fn infer_expr_type(type_checker: &TypeChecker, expr: &Expr) -> Result<TypeDescriptor, Error> {
    match &expr.kind {
        ExprKind::Constant { value } => match value {
            Constant::Int(_) => Ok(TypeDescriptor::Int),
            Constant::Float(_) => Ok(TypeDescriptor::Float),
            Constant::Bool(_) => Ok(TypeDescriptor::Bool),
            Constant::Str(_) | Constant::None => Err(MK_ERROR!(
                type_checker.scope,
                expr,
                ErrorImpl::UnsupportedConstant {
                    kind: value.kind_name().to_string()
                }
            )),
        },
        ExprKind::UnaryOp { op, operand } => match op {
            UnaryOperator::UAdd | UnaryOperator::USub => infer_expr_type(type_checker, operand),
            _ => Err(MK_ERROR!(
                type_checker.scope,
                expr,
                ErrorImpl::UnsupportedOperator {
                    operator: format!("{:?}", op)
                }
            )),
        },
        ExprKind::Name { id } => {
            let ty = type_checker.fetch_variable_type(id, expr)?;
            if ty.is_function() {
                return Err(MK_ERROR!(
                    type_checker.scope,
                    expr,
                    ErrorImpl::UnsupportedConstruct {
                        construct: format!("function {} used as a value", id)
                    }
                ));
            }
            Ok(ty)
        }
        ExprKind::BinOp { left, right, .. } => {
            let left_type = infer_expr_type(type_checker, left)?;
            let right_type = infer_expr_type(type_checker, right)?;
            if left_type != right_type {
                return Err(MK_ERROR!(
                    type_checker.scope,
                    expr,
                    ErrorImpl::OperandTypeMismatch {
                        left: left_type.to_string(),
                        right: right_type.to_string(),
                    }
                ));
            }
            if !left_type.is_primitive() {
                return Err(MK_ERROR!(
                    type_checker.scope,
                    expr,
                    ErrorImpl::UnsupportedConstruct {
                        construct: format!("arithmetic on values of type {}", left_type)
                    }
                ));
            }
            Ok(left_type)
        }
        ExprKind::List { elts } | ExprKind::Tuple { elts } => {
            let Some(first) = elts.first() else {
                return Err(MK_ERROR!(type_checker.scope, expr, ErrorImpl::EmptyContainer));
            };

            let element_type = infer_expr_type(type_checker, first)?;
            if !element_type.is_primitive() {
                return Err(MK_ERROR!(type_checker.scope, expr, ErrorImpl::NestedContainer));
            }
            for element in elts.iter().skip(1) {
                let other = infer_expr_type(type_checker, element)?;
                if other != element_type {
                    return Err(MK_ERROR!(
                        type_checker.scope,
                        expr,
                        ErrorImpl::HeterogeneousContainer {
                            first: element_type.to_string(),
                            other: other.to_string(),
                        }
                    ));
                }
            }

            Ok(TypeDescriptor::list(elts.len(), element_type))
        }
        _ => Err(MK_ERROR!(
            type_checker.scope,
            expr,
            ErrorImpl::UnsupportedConstruct {
                construct: format!(
                    "cannot obtain type information from {} node",
                    expr.kind_name()
                )
            }
        )),
    }
}

fn type_check_arg(type_checker: &mut TypeChecker, function: &str, arg: &Arg) -> Result<(), Error> {
    let scoped = type_checker.scope.scoped_sym(&arg.arg);

    match &arg.annotation {
        Some(annotation) => {
            let arg_type = annotation_type(type_checker, annotation, false)?;
            if !arg_type.is_primitive() {
                return Err(MK_ERROR!(
                    type_checker.scope,
                    annotation,
                    ErrorImpl::UnsupportedConstruct {
                        construct: format!("parameter {} of type {}", arg.arg, arg_type)
                    }
                ));
            }
            type_checker.handle_annotated_variable(&arg.arg, arg_type, arg.get_span())?;
        }
        None => {
            // Known by name only; a later assignment may still give it a type
            type_checker
                .table
                .add_symbol_to_scope(function, scoped.clone());
        }
    }

    type_checker.table.add_parameter(function, scoped);
    Ok(())
}

fn type_check_function(
    type_checker: &mut TypeChecker,
    function: &FunctionDef,
    stmt: &Stmt,
) -> Result<(), Error> {
    let scoped_name = type_checker.scope.scoped_sym(&function.name);
    let function_type = match &function.returns {
        Some(returns) => {
            let return_type = annotation_type(type_checker, returns, true)?;
            if !return_type.is_primitive() {
                return Err(MK_ERROR!(
                    type_checker.scope,
                    returns,
                    ErrorImpl::UnsupportedConstruct {
                        construct: format!("returning a value of type {}", return_type)
                    }
                ));
            }
            TypeDescriptor::func(return_type)
        }
        None => TypeDescriptor::Func(None),
    };

    type_checker.scope.enter_scope(&function.name, &stmt.span)?;

    if !type_checker.table.add_symbol_type(scoped_name, function_type) {
        return Err(MK_ERROR!(
            type_checker.scope,
            stmt,
            ErrorImpl::Redeclaration {
                symbol: function.name.clone(),
                scope: String::new(),
            }
        ));
    }

    if function.args.has_extended_forms() {
        return Err(MK_ERROR!(
            type_checker.scope,
            stmt,
            ErrorImpl::UnsupportedConstruct {
                construct: String::from("only plain positional parameters are supported")
            }
        ));
    }

    for arg in function.args.args.iter() {
        type_check_arg(type_checker, &function.name, arg)?;
    }
    for stmt in function.body.iter() {
        type_check_stmt(type_checker, stmt)?;
    }

    type_checker.scope.exit_scope(&function.name);
    Ok(())
}

fn type_check_assign_target(
    type_checker: &mut TypeChecker,
    target: &Expr,
    value_type: &TypeDescriptor,
) -> Result<(), Error> {
    match &target.kind {
        ExprKind::Name { id } => {
            // A name declared `global` in this function binds the bare symbol
            let declared_global = type_checker.is_known_in_current_scope(id);
            let scoped = if declared_global {
                id.clone()
            } else {
                type_checker.scope.scoped_sym(id)
            };

            match type_checker.table.get_type(&scoped) {
                None => {
                    let scope = if declared_global {
                        String::new()
                    } else {
                        type_checker.scope.current_scope().to_string()
                    };
                    type_checker.table.add_symbol_to_scope(&scope, scoped.clone());
                    type_checker.table.add_symbol_type(scoped, value_type.clone());
                    Ok(())
                }
                Some(known_type) if known_type != value_type => Err(MK_ERROR!(
                    type_checker.scope,
                    target,
                    ErrorImpl::TypeConflict {
                        symbol: id.clone(),
                        expected: known_type.to_string(),
                        received: value_type.to_string(),
                    }
                )),
                Some(_) => Ok(()),
            }
        }
        ExprKind::Subscript { value, slice } => {
            let Some(base) = value.as_name() else {
                return Err(MK_ERROR!(
                    type_checker.scope,
                    target,
                    ErrorImpl::UnsupportedConstruct {
                        construct: String::from("subscript assignment to something other than a name")
                    }
                ));
            };

            let base_type = type_checker.fetch_variable_type(base, value)?;
            let Some(element_type) = base_type.element_type() else {
                return Err(MK_ERROR!(
                    type_checker.scope,
                    target,
                    ErrorImpl::UnsupportedConstruct {
                        construct: format!("indexing {} of type {}", base, base_type)
                    }
                ));
            };
            if element_type != value_type {
                return Err(MK_ERROR!(
                    type_checker.scope,
                    target,
                    ErrorImpl::TypeConflict {
                        symbol: format!("{}[]", base),
                        expected: element_type.to_string(),
                        received: value_type.to_string(),
                    }
                ));
            }

            let index = slice.unwrap_index();
            let index_type = infer_expr_type(type_checker, index)?;
            if index_type != TypeDescriptor::Int {
                return Err(MK_ERROR!(
                    type_checker.scope,
                    index,
                    ErrorImpl::TypeConflict {
                        symbol: String::from("index"),
                        expected: TypeDescriptor::Int.to_string(),
                        received: index_type.to_string(),
                    }
                ));
            }
            if let (Some(position), TypeDescriptor::List { size, .. }) = (index.as_int_constant(), &base_type) {
                if !base_type.index_in_bounds(position) {
                    return Err(MK_ERROR!(
                        type_checker.scope,
                        index,
                        ErrorImpl::IndexOutOfRange {
                            index: position,
                            size: *size,
                        }
                    ));
                }
            }
            Ok(())
        }
        _ => Err(MK_ERROR!(
            type_checker.scope,
            target,
            ErrorImpl::UnsupportedConstruct {
                construct: format!("assignment to {} target", target.kind_name())
            }
        )),
    }
}

/// Lists are only ever filled from a literal, one element at a time.
fn reject_list_copy(type_checker: &TypeChecker, target_type: &TypeDescriptor, value: &Expr) -> Result<(), Error> {
    match (target_type, &value.kind) {
        (TypeDescriptor::List { .. }, ExprKind::List { .. } | ExprKind::Tuple { .. }) => Ok(()),
        (TypeDescriptor::List { .. }, _) => Err(MK_ERROR!(
            type_checker.scope,
            value,
            ErrorImpl::UnsupportedConstruct {
                construct: String::from("copying a whole list")
            }
        )),
        _ => Ok(()),
    }
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &Stmt) -> Result<(), Error> {
    match &stmt.kind {
        StmtKind::FunctionDef(function) => type_check_function(type_checker, function, stmt),
        StmtKind::AnnAssign {
            target,
            annotation,
            value,
        } => {
            // An annotated assignment is local by definition
            let Some(name) = target.as_name() else {
                return Err(MK_ERROR!(
                    type_checker.scope,
                    target,
                    ErrorImpl::UnsupportedConstruct {
                        construct: format!("annotated assignment to {} target", target.kind_name())
                    }
                ));
            };
            let var_type = annotation_type(type_checker, annotation, false)?;

            if let Some(value) = value {
                if let Some(value_type) = annotated_value_type(type_checker, value)? {
                    if value_type != var_type {
                        return Err(MK_ERROR!(
                            type_checker.scope,
                            value,
                            ErrorImpl::TypeConflict {
                                symbol: name.to_string(),
                                expected: var_type.to_string(),
                                received: value_type.to_string(),
                            }
                        ));
                    }
                }
                reject_list_copy(type_checker, &var_type, value)?;
            }

            type_checker.handle_annotated_variable(name, var_type, &stmt.span)
        }
        StmtKind::Assign { targets, value } => {
            let value_type = infer_expr_type(type_checker, value)?;
            reject_list_copy(type_checker, &value_type, value)?;
            for target in targets.iter() {
                type_check_assign_target(type_checker, target, &value_type)?;
            }
            Ok(())
        }
        StmtKind::Return { value } => {
            if type_checker.scope.is_global() {
                return Err(MK_ERROR!(type_checker.scope, stmt, ErrorImpl::ReturnOutsideFunction));
            }

            let return_type = match value {
                Some(value) => infer_expr_type(type_checker, value)?,
                None => TypeDescriptor::Void,
            };

            // The current scope is exactly the enclosing function
            let function = type_checker.scope.current_scope().to_string();
            let known_type = type_checker
                .table
                .get_type(&function)
                .cloned()
                .unwrap_or(TypeDescriptor::Func(None));

            if known_type.is_deferred_function() {
                type_checker.table.set_func_ret_type(&function, return_type);
                return Ok(());
            }

            match known_type.return_type() {
                Some(expected) if expected == return_type => Ok(()),
                expected => Err(MK_ERROR!(
                    type_checker.scope,
                    stmt,
                    ErrorImpl::ReturnTypeMismatch {
                        expected: expected.unwrap_or(known_type).to_string(),
                        received: return_type.to_string(),
                    }
                )),
            }
        }
        StmtKind::Global { names } => {
            // Every module-level name is global already
            if !type_checker.scope.is_global() {
                let scope = type_checker.scope.current_scope().to_string();
                for name in names.iter() {
                    type_checker.table.add_symbol_to_scope(&scope, name.clone());
                }
            }
            Ok(())
        }
        StmtKind::Expr { .. } | StmtKind::Pass => Ok(()),
        StmtKind::Unsupported => Err(MK_ERROR!(
            type_checker.scope,
            stmt,
            ErrorImpl::UnsupportedConstruct {
                construct: stmt.kind_name().to_string()
            }
        )),
    }
}

/// Runs the resolution pass over a whole module.
///
/// Stops at the first violated rule; on success the returned table holds a
/// type for every symbol the module declares.
pub fn resolve(module: &Module, lines: &[String]) -> Result<SymbolTable, Error> {
    let mut type_checker = TypeChecker::new(lines);

    for stmt in module.body.iter() {
        type_check_stmt(&mut type_checker, stmt)?;
    }

    Ok(type_checker.table)
}
