use std::io::Write;

use crate::{
    ast::{
        ast::Located,
        expressions::{Expr, ExprKind},
        statements::{FunctionDef, Stmt, StmtKind},
    },
    errors::errors::{Error, ErrorImpl},
    scope::scope_tracker::qualify,
    MK_ERROR,
};

use super::{
    compiler::Compiler,
    expr::{gen_expression, EmitContext},
};

fn gen_function_def<W: Write>(
    compiler: &mut Compiler<W>,
    function: &FunctionDef,
    stmt: &Stmt,
) -> Result<(), Error> {
    let scoped_name = compiler.scope.scoped_sym(&function.name);
    let return_type = compiler.table.find_ret_type(&scoped_name).ok_or_else(|| {
        MK_ERROR!(
            compiler.scope,
            stmt,
            ErrorImpl::SymbolNotFound {
                symbol: scoped_name.clone()
            }
        )
    })?;
    let return_type = compiler.mapped_type(&return_type, &stmt.span)?;

    let mut parameters = Vec::with_capacity(function.args.args.len());
    for arg in function.args.args.iter() {
        let ty = compiler.symbol_type(&qualify(&function.name, &arg.arg), arg)?;
        parameters.push(format!("{} {}", compiler.mapped_type(ty, arg.get_span())?, arg.arg));
    }

    log::debug!("generating {} {}", return_type, function.name);
    compiler.output(
        &format!(
            "\n{} {}({}) {{\n",
            return_type,
            function.name,
            parameters.join(", ")
        ),
        false,
    )?;

    compiler.scope.enter_scope(&function.name, &stmt.span)?;
    compiler.writer.indent();

    let body = compiler.emit_leading_docstring(&function.body)?;
    compiler.emit_scope_local_decls(&stmt.span)?;
    if compiler.config.emit_headings {
        compiler.output("/* Main Code */\n", true)?;
    }
    for stmt in body {
        gen_statement(compiler, stmt)?;
    }

    compiler.writer.outdent();
    compiler.scope.exit_scope(&function.name);
    compiler.output("}\n", false)
}

/// Renders an assignment target: a bare name or `name[index]`.
fn gen_target<W: Write>(compiler: &Compiler<W>, target: &Expr) -> Result<String, Error> {
    match &target.kind {
        ExprKind::Name { id } => Ok(id.clone()),
        ExprKind::Subscript { .. } => gen_expression(compiler, target, EmitContext::default()),
        _ => Err(MK_ERROR!(
            compiler.scope,
            target,
            ErrorImpl::UnsupportedConstruct {
                construct: format!("assignment to {} target", target.kind_name())
            }
        )),
    }
}

fn gen_assign<W: Write>(
    compiler: &mut Compiler<W>,
    targets: &[Expr],
    value: &Expr,
) -> Result<(), Error> {
    let mut names = Vec::with_capacity(targets.len());
    for target in targets {
        names.push(gen_target(compiler, target)?);
    }

    // Arrays cannot be assigned as a whole; store element by element
    if let ExprKind::List { elts } | ExprKind::Tuple { elts } = &value.kind {
        let mut lines = Vec::with_capacity(names.len() * elts.len());
        for name in names.iter() {
            for (index, element) in elts.iter().enumerate() {
                let element = gen_expression(compiler, element, EmitContext::assignment())?;
                lines.push(format!("{}[{}] = {};", name, index, element));
            }
        }
        return compiler.output(&format!("{}\n", lines.join("\n")), true);
    }

    let value = gen_expression(compiler, value, EmitContext::assignment())?;
    compiler.output(&format!("{} = {};\n", names.join(" = "), value), true)
}

/// Generates one statement.
pub fn gen_statement<W: Write>(compiler: &mut Compiler<W>, stmt: &Stmt) -> Result<(), Error> {
    match &stmt.kind {
        StmtKind::FunctionDef(function) => gen_function_def(compiler, function, stmt),
        StmtKind::AnnAssign { target, value, .. } => match value {
            Some(value) => gen_assign(compiler, std::slice::from_ref(target), value),
            // Declared with the rest of the scope
            None => Ok(()),
        },
        StmtKind::Assign { targets, value } => gen_assign(compiler, targets, value),
        StmtKind::Return { value } => match value {
            None => compiler.output("return;\n", true),
            Some(value) => {
                let rendered = gen_expression(compiler, value, EmitContext::default())?;
                let line = match &value.kind {
                    ExprKind::BinOp { .. } | ExprKind::Compare { .. } | ExprKind::BoolOp { .. } => {
                        format!("return {};\n", rendered)
                    }
                    _ => format!("return ({});\n", rendered),
                };
                compiler.output(&line, true)
            }
        },
        StmtKind::Expr { value } => {
            let rendered = gen_expression(compiler, value, EmitContext::default())?;
            compiler.output(&format!("{};\n", rendered), true)
        }
        StmtKind::Global { .. } | StmtKind::Pass => Ok(()),
        StmtKind::Unsupported => Err(MK_ERROR!(
            compiler.scope,
            stmt,
            ErrorImpl::UnsupportedConstruct {
                construct: stmt.kind_name().to_string()
            }
        )),
    }
}
