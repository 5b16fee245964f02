//! Constructors for building trees without a JSON dump.
//!
//! Nodes come out with the null span; chain `with_span` where diagnostics
//! need to quote source text.

use super::{
    ast::{Module, Span},
    expressions::{
        BinaryOperator, BoolOperator, CmpOperator, Constant, Expr, ExprKind, UnaryOperator,
    },
    statements::{Arg, Arguments, FunctionDef, Stmt, StmtKind},
};

impl Expr {
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl Stmt {
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl Arg {
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::default())
}

fn stmt(kind: StmtKind) -> Stmt {
    Stmt::new(kind, Span::default())
}

pub fn module(body: Vec<Stmt>) -> Module {
    Module::new(body)
}

// EXPRESSIONS

pub fn int(value: i64) -> Expr {
    expr(ExprKind::Constant {
        value: Constant::Int(value),
    })
}

pub fn float(value: f64) -> Expr {
    expr(ExprKind::Constant {
        value: Constant::Float(value),
    })
}

pub fn string(value: &str) -> Expr {
    expr(ExprKind::Constant {
        value: Constant::Str(value.to_string()),
    })
}

pub fn boolean(value: bool) -> Expr {
    expr(ExprKind::Constant {
        value: Constant::Bool(value),
    })
}

pub fn none() -> Expr {
    expr(ExprKind::Constant {
        value: Constant::None,
    })
}

pub fn name(id: &str) -> Expr {
    expr(ExprKind::Name { id: id.to_string() })
}

pub fn list(elts: Vec<Expr>) -> Expr {
    expr(ExprKind::List { elts })
}

pub fn tuple(elts: Vec<Expr>) -> Expr {
    expr(ExprKind::Tuple { elts })
}

pub fn unary(op: UnaryOperator, operand: Expr) -> Expr {
    expr(ExprKind::UnaryOp {
        op,
        operand: Box::new(operand),
    })
}

pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    expr(ExprKind::BinOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

pub fn bool_op(op: BoolOperator, values: Vec<Expr>) -> Expr {
    expr(ExprKind::BoolOp { op, values })
}

pub fn compare(left: Expr, ops: Vec<CmpOperator>, comparators: Vec<Expr>) -> Expr {
    expr(ExprKind::Compare {
        left: Box::new(left),
        ops,
        comparators,
    })
}

pub fn call(func: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call {
        func: Box::new(func),
        args,
        keywords: vec![],
    })
}

pub fn attribute(value: Expr, attr: &str) -> Expr {
    expr(ExprKind::Attribute {
        value: Box::new(value),
        attr: attr.to_string(),
    })
}

pub fn subscript(value: Expr, slice: Expr) -> Expr {
    expr(ExprKind::Subscript {
        value: Box::new(value),
        slice: Box::new(slice),
    })
}

// STATEMENTS

pub fn arg(name: &str, annotation: Option<&str>) -> Arg {
    Arg {
        span: Span::default(),
        arg: name.to_string(),
        annotation: annotation.map(self::name),
    }
}

pub fn function(name: &str, args: Vec<Arg>, returns: Option<Expr>, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::FunctionDef(FunctionDef {
        name: name.to_string(),
        args: Arguments::new(args),
        body,
        returns,
    }))
}

pub fn assign(targets: Vec<Expr>, value: Expr) -> Stmt {
    stmt(StmtKind::Assign { targets, value })
}

/// `target = value` for a single named target.
pub fn assign_to(target: &str, value: Expr) -> Stmt {
    assign(vec![name(target)], value)
}

pub fn ann_assign(target: &str, annotation: &str, value: Option<Expr>) -> Stmt {
    annotated(target, name(annotation), value)
}

/// Annotated assignment with an arbitrary annotation expression, e.g. `string("list:3:int")`.
pub fn annotated(target: &str, annotation: Expr, value: Option<Expr>) -> Stmt {
    stmt(StmtKind::AnnAssign {
        target: name(target),
        annotation,
        value,
    })
}

pub fn ret(value: Option<Expr>) -> Stmt {
    stmt(StmtKind::Return { value })
}

pub fn expr_stmt(value: Expr) -> Stmt {
    stmt(StmtKind::Expr { value })
}

pub fn global(names: &[&str]) -> Stmt {
    stmt(StmtKind::Global {
        names: names.iter().map(|x| x.to_string()).collect(),
    })
}

pub fn pass() -> Stmt {
    stmt(StmtKind::Pass)
}
