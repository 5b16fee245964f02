use serde::Deserialize;

use super::ast::{Located, Span};

/// Literal payload of a `Constant` node.
///
/// Variant order matters for ingestion: booleans must be tried before
/// integers and integers before floats.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Constant {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    None,
}

impl Constant {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Constant::Bool(_) => "bool",
            Constant::Int(_) => "int",
            Constant::Float(_) => "float",
            Constant::Str(_) => "str",
            Constant::None => "None",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "_type")]
pub enum UnaryOperator {
    UAdd,
    USub,
    Not,
    Invert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "_type")]
pub enum BinaryOperator {
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
    FloorDiv,
    Pow,
    MatMult,
}

impl BinaryOperator {
    /// Infix spelling shared by both languages; `None` when the target has no such operator.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            BinaryOperator::Add => Some("+"),
            BinaryOperator::Sub => Some("-"),
            BinaryOperator::Mult => Some("*"),
            BinaryOperator::Div => Some("/"),
            BinaryOperator::Mod => Some("%"),
            BinaryOperator::LShift => Some("<<"),
            BinaryOperator::RShift => Some(">>"),
            BinaryOperator::BitOr => Some("|"),
            BinaryOperator::BitXor => Some("^"),
            BinaryOperator::BitAnd => Some("&"),
            BinaryOperator::FloorDiv | BinaryOperator::Pow | BinaryOperator::MatMult => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "_type")]
pub enum BoolOperator {
    And,
    Or,
}

impl BoolOperator {
    pub fn keyword(&self) -> &'static str {
        match self {
            BoolOperator::And => "and",
            BoolOperator::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "_type")]
pub enum CmpOperator {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOperator {
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            CmpOperator::Eq => Some("=="),
            CmpOperator::NotEq => Some("!="),
            CmpOperator::Lt => Some("<"),
            CmpOperator::LtE => Some("<="),
            CmpOperator::Gt => Some(">"),
            CmpOperator::GtE => Some(">="),
            CmpOperator::Is | CmpOperator::IsNot | CmpOperator::In | CmpOperator::NotIn => None,
        }
    }
}

/// Keyword argument of a call (`f(x=1)`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Keyword {
    pub arg: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Expr {
    #[serde(flatten)]
    pub span: Span,
    #[serde(flatten)]
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "_type")]
pub enum ExprKind {
    Constant {
        value: Constant,
    },
    Name {
        id: String,
    },
    List {
        elts: Vec<Expr>,
    },
    Tuple {
        elts: Vec<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    BoolOp {
        op: BoolOperator,
        values: Vec<Expr>,
    },
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOperator>,
        comparators: Vec<Expr>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        #[serde(default)]
        keywords: Vec<Keyword>,
    },
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    Subscript {
        value: Box<Expr>,
        slice: Box<Expr>,
    },
    /// Index wrapper emitted by older front ends around a subscript's slice.
    Index {
        value: Box<Expr>,
    },
    #[serde(other)]
    Unsupported,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { span, kind }
    }

    /// The bare identifier when this is a `Name` node.
    pub fn as_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Name { id } => Some(id),
            _ => None,
        }
    }

    pub fn as_str_constant(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Constant {
                value: Constant::Str(text),
            } => Some(text),
            _ => None,
        }
    }

    /// Integer literal value, including a negated one (`-1`).
    pub fn as_int_constant(&self) -> Option<i64> {
        match &self.kind {
            ExprKind::Constant {
                value: Constant::Int(value),
            } => Some(*value),
            ExprKind::UnaryOp {
                op: UnaryOperator::USub,
                operand,
            } => operand.as_int_constant().and_then(|value| value.checked_neg()),
            ExprKind::Index { value } => value.as_int_constant(),
            _ => None,
        }
    }

    /// Strips an `Index` wrapper, if any.
    pub fn unwrap_index(&self) -> &Expr {
        match &self.kind {
            ExprKind::Index { value } => value.unwrap_index(),
            _ => self,
        }
    }
}

impl Located for Expr {
    fn get_span(&self) -> &Span {
        &self.span
    }

    fn kind_name(&self) -> &str {
        match &self.kind {
            ExprKind::Constant { .. } => "Constant",
            ExprKind::Name { .. } => "Name",
            ExprKind::List { .. } => "List",
            ExprKind::Tuple { .. } => "Tuple",
            ExprKind::UnaryOp { .. } => "UnaryOp",
            ExprKind::BinOp { .. } => "BinOp",
            ExprKind::BoolOp { .. } => "BoolOp",
            ExprKind::Compare { .. } => "Compare",
            ExprKind::Call { .. } => "Call",
            ExprKind::Attribute { .. } => "Attribute",
            ExprKind::Subscript { .. } => "Subscript",
            ExprKind::Index { .. } => "Index",
            ExprKind::Unsupported => "unknown expression",
        }
    }
}
