use serde::Deserialize;

use super::{
    ast::{Located, Span},
    expressions::Expr,
};

/// A single formal parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Arg {
    #[serde(flatten)]
    pub span: Span,
    pub arg: String,
    pub annotation: Option<Expr>,
}

impl Located for Arg {
    fn get_span(&self) -> &Span {
        &self.span
    }

    fn kind_name(&self) -> &str {
        "arg"
    }
}

/// Parameter list of a function definition.
///
/// Only plain positional parameters are modelled; the remaining lists are
/// kept so that their presence can be rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Arguments {
    pub args: Vec<Arg>,
    #[serde(default)]
    pub vararg: Option<Arg>,
    #[serde(default)]
    pub kwarg: Option<Arg>,
    #[serde(default)]
    pub kwonlyargs: Vec<Arg>,
    #[serde(default)]
    pub defaults: Vec<Expr>,
}

impl Arguments {
    pub fn new(args: Vec<Arg>) -> Self {
        Arguments {
            args,
            ..Default::default()
        }
    }

    pub fn has_extended_forms(&self) -> bool {
        self.vararg.is_some()
            || self.kwarg.is_some()
            || !self.kwonlyargs.is_empty()
            || !self.defaults.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub args: Arguments,
    pub body: Vec<Stmt>,
    pub returns: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stmt {
    #[serde(flatten)]
    pub span: Span,
    #[serde(flatten)]
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "_type")]
pub enum StmtKind {
    FunctionDef(FunctionDef),
    AnnAssign {
        target: Expr,
        annotation: Expr,
        value: Option<Expr>,
    },
    Assign {
        targets: Vec<Expr>,
        value: Expr,
    },
    Return {
        value: Option<Expr>,
    },
    Expr {
        value: Expr,
    },
    Global {
        names: Vec<String>,
    },
    Pass,
    #[serde(other)]
    Unsupported,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { span, kind }
    }

    /// A bare string expression statement, i.e. the docstring shape.
    pub fn as_docstring(&self) -> Option<&str> {
        match &self.kind {
            StmtKind::Expr { value } => value.as_str_constant(),
            _ => None,
        }
    }
}

impl Located for Stmt {
    fn get_span(&self) -> &Span {
        &self.span
    }

    fn kind_name(&self) -> &str {
        match &self.kind {
            StmtKind::FunctionDef(_) => "FunctionDef",
            StmtKind::AnnAssign { .. } => "AnnAssign",
            StmtKind::Assign { .. } => "Assign",
            StmtKind::Return { .. } => "Return",
            StmtKind::Expr { .. } => "Expr",
            StmtKind::Global { .. } => "Global",
            StmtKind::Pass => "Pass",
            StmtKind::Unsupported => "unknown statement",
        }
    }
}
