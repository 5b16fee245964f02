use std::io::Write;

use crate::{
    ast::{
        ast::Located,
        expressions::{Constant, Expr, ExprKind, UnaryOperator},
        types::TypeDescriptor,
    },
    errors::errors::{Error, ErrorImpl},
    MK_ERROR,
};

use super::{
    builtins::{Conversion, CONVERSIONS},
    compiler::Compiler,
};

/// Context threaded down the expression recursion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitContext {
    /// Right-hand side of an assignment: string literals become owned strings
    pub in_assignment: bool,
}

impl EmitContext {
    pub fn assignment() -> Self {
        EmitContext {
            in_assignment: true,
        }
    }
}

/// Double-quoted literal with escapes for the output language.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn gen_constant<W: Write>(
    compiler: &Compiler<W>,
    value: &Constant,
    expr: &Expr,
    context: EmitContext,
) -> Result<String, Error> {
    match value {
        Constant::Bool(value) => Ok(value.to_string()),
        Constant::Int(value) => Ok(value.to_string()),
        Constant::Float(value) => Ok(format!("{:?}", value)),
        Constant::Str(text) if context.in_assignment => Ok(format!("string({})", quote(text))),
        Constant::Str(text) => Ok(quote(text)),
        Constant::None => Err(MK_ERROR!(
            compiler.scope,
            expr,
            ErrorImpl::UnsupportedConstant {
                kind: value.kind_name().to_string()
            }
        )),
    }
}

fn gen_list<W: Write>(compiler: &Compiler<W>, elts: &[Expr], context: EmitContext) -> Result<String, Error> {
    let elements = elts
        .iter()
        .map(|element| gen_expression(compiler, element, context))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{{{}}}", elements.join(", ")))
}

/// Rewrites a call to a built-in conversion, if `func` names one.
fn gen_conversion<W: Write>(
    compiler: &Compiler<W>,
    func: &Expr,
    args: &[Expr],
    expr: &Expr,
    context: EmitContext,
) -> Result<Option<String>, Error> {
    let Some(conversion) = func.as_name().and_then(|name| CONVERSIONS.get(name)) else {
        return Ok(None);
    };
    let [argument] = args else {
        return Ok(None);
    };

    let rendered = match conversion {
        Conversion::ToString => match &argument.kind {
            ExprKind::Constant {
                value: value @ Constant::Str(_),
            } => gen_constant(compiler, value, argument, context)?,
            _ => format!(
                "to_string({})",
                gen_expression(compiler, argument, EmitContext::default())?
            ),
        },
        Conversion::Cast(target) => format!(
            "{}({})",
            target,
            gen_expression(compiler, argument, EmitContext::default())?
        ),
        Conversion::Braced => match &argument.kind {
            ExprKind::List { elts } | ExprKind::Tuple { elts } => gen_list(compiler, elts, context)?,
            _ => {
                return Err(MK_ERROR!(
                    compiler.scope,
                    expr,
                    ErrorImpl::UnsupportedConstruct {
                        construct: String::from("list() and tuple() only accept a literal")
                    }
                ))
            }
        },
    };
    Ok(Some(rendered))
}

fn gen_call<W: Write>(
    compiler: &Compiler<W>,
    expr: &Expr,
    func: &Expr,
    args: &[Expr],
    has_keywords: bool,
    context: EmitContext,
) -> Result<String, Error> {
    if has_keywords {
        return Err(MK_ERROR!(
            compiler.scope,
            expr,
            ErrorImpl::UnsupportedConstruct {
                construct: String::from("keyword arguments")
            }
        ));
    }

    if let Some(rendered) = gen_conversion(compiler, func, args, expr, context)? {
        return Ok(rendered);
    }

    let callee = match &func.kind {
        ExprKind::Name { id } => id.clone(),
        ExprKind::Attribute { .. } => gen_expression(compiler, func, EmitContext::default())?,
        _ => {
            return Err(MK_ERROR!(
                compiler.scope,
                func,
                ErrorImpl::UnsupportedConstruct {
                    construct: format!("calling a {} expression", func.kind_name())
                }
            ))
        }
    };

    // Arguments are passed as-is, never constructed
    let arguments = args
        .iter()
        .map(|arg| gen_expression(compiler, arg, EmitContext::default()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!("{}({})", callee, arguments.join(", ")))
}

/// Renders an expression to a text fragment.
///
/// Operator expressions come out fully parenthesized so no precedence rules
/// of the output language come into play.
pub fn gen_expression<W: Write>(
    compiler: &Compiler<W>,
    expr: &Expr,
    context: EmitContext,
) -> Result<String, Error> {
    match &expr.kind {
        ExprKind::Constant { value } => gen_constant(compiler, value, expr, context),
        ExprKind::Name { id } => Ok(id.clone()),
        ExprKind::List { elts } | ExprKind::Tuple { elts } => gen_list(compiler, elts, context),
        ExprKind::UnaryOp { op, operand } => {
            let operand = gen_expression(compiler, operand, context)?;
            Ok(match op {
                UnaryOperator::UAdd => format!("+{}", operand),
                UnaryOperator::USub => format!("-{}", operand),
                UnaryOperator::Not => format!("not {}", operand),
                UnaryOperator::Invert => format!("~{}", operand),
            })
        }
        ExprKind::BinOp { left, op, right } => {
            let symbol = op.symbol().ok_or_else(|| {
                MK_ERROR!(
                    compiler.scope,
                    expr,
                    ErrorImpl::UnsupportedOperator {
                        operator: format!("{:?}", op)
                    }
                )
            })?;
            let left = gen_expression(compiler, left, context)?;
            let right = gen_expression(compiler, right, context)?;
            Ok(format!("({} {} {})", left, symbol, right))
        }
        ExprKind::BoolOp { op, values } => {
            let values = values
                .iter()
                .map(|value| gen_expression(compiler, value, context))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("({})", values.join(&format!(" {} ", op.keyword()))))
        }
        ExprKind::Compare {
            left,
            ops,
            comparators,
        } => {
            let ([op], [right]) = (ops.as_slice(), comparators.as_slice()) else {
                return Err(MK_ERROR!(
                    compiler.scope,
                    expr,
                    ErrorImpl::ChainedComparison { count: ops.len() }
                ));
            };
            let symbol = op.symbol().ok_or_else(|| {
                MK_ERROR!(
                    compiler.scope,
                    expr,
                    ErrorImpl::UnsupportedOperator {
                        operator: format!("{:?}", op)
                    }
                )
            })?;
            let left = gen_expression(compiler, left, context)?;
            let right = gen_expression(compiler, right, context)?;
            Ok(format!("({} {} {})", left, symbol, right))
        }
        ExprKind::Call {
            func,
            args,
            keywords,
        } => gen_call(compiler, expr, func, args, !keywords.is_empty(), context),
        ExprKind::Attribute { value, attr } => {
            let value = gen_expression(compiler, value, EmitContext::default())?;
            Ok(format!("{}.{}", value, attr))
        }
        ExprKind::Subscript { value, slice } => {
            let Some(name) = value.as_name() else {
                return Err(MK_ERROR!(
                    compiler.scope,
                    expr,
                    ErrorImpl::UnsupportedConstruct {
                        construct: String::from("subscript of something other than a name")
                    }
                ));
            };
            let index = slice.unwrap_index();
            let scoped = compiler.scope.scoped_sym(name);
            if let (Some(position), Some((_, base_type))) =
                (index.as_int_constant(), compiler.table.find_type(&scoped))
            {
                if let TypeDescriptor::List { size, .. } = base_type {
                    if !base_type.index_in_bounds(position) {
                        return Err(MK_ERROR!(
                            compiler.scope,
                            index,
                            ErrorImpl::IndexOutOfRange {
                                index: position,
                                size: *size,
                            }
                        ));
                    }
                }
            }
            let index = gen_expression(compiler, index, EmitContext::default())?;
            Ok(format!("{}[{}]", name, index))
        }
        ExprKind::Index { value } => gen_expression(compiler, value, context),
        ExprKind::Unsupported => Err(MK_ERROR!(
            compiler.scope,
            expr,
            ErrorImpl::UnsupportedConstruct {
                construct: expr.kind_name().to_string()
            }
        )),
    }
}
