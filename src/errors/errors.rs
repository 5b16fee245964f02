use std::fmt::Display;

use thiserror::Error;

use crate::ast::ast::Span;

/// A fatal diagnostic: what went wrong, where, and the offending source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Span,
    excerpt: String,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Span, excerpt: String) -> Self {
        Error {
            internal_error: error_impl,
            position,
            excerpt,
        }
    }

    pub fn get_position(&self) -> &Span {
        &self.position
    }

    pub fn get_excerpt(&self) -> &str {
        &self.excerpt
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::Redeclaration { .. } => "Redeclaration",
            ErrorImpl::TypeConflict { .. } => "TypeConflict",
            ErrorImpl::OperandTypeMismatch { .. } => "OperandTypeMismatch",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::UnsupportedConstruct { .. } => "UnsupportedConstruct",
            ErrorImpl::UnsupportedConstant { .. } => "UnsupportedConstant",
            ErrorImpl::UnsupportedOperator { .. } => "UnsupportedOperator",
            ErrorImpl::EmptyContainer => "EmptyContainer",
            ErrorImpl::HeterogeneousContainer { .. } => "HeterogeneousContainer",
            ErrorImpl::NestedContainer => "NestedContainer",
            ErrorImpl::IndexOutOfRange { .. } => "IndexOutOfRange",
            ErrorImpl::ChainedComparison { .. } => "ChainedComparison",
            ErrorImpl::NestedScope { .. } => "NestedScope",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::SymbolNotFound { .. } => "SymbolNotFound",
            ErrorImpl::UntypedSymbol { .. } => "UntypedSymbol",
            ErrorImpl::OutputFailure { .. } => "OutputFailure",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::Redeclaration { .. } => ErrorTip::Suggestion(String::from(
                "Reuse the existing declaration instead of annotating the name again",
            )),
            ErrorImpl::TypeConflict { .. } | ErrorImpl::ReturnTypeMismatch { .. } => {
                ErrorTip::Suggestion(String::from(
                    "A name keeps the type it was first given; use a new name for the other value",
                ))
            }
            ErrorImpl::OperandTypeMismatch { .. } => ErrorTip::Suggestion(String::from(
                "Convert one operand explicitly so both sides share a type",
            )),
            ErrorImpl::UnsupportedConstant { kind } if kind == "str" => {
                ErrorTip::Suggestion(String::from("Annotate the target, e.g. `name: str = \"...\"`"))
            }
            ErrorImpl::EmptyContainer => ErrorTip::Suggestion(String::from(
                "Give the list at least one element so its element type is known",
            )),
            ErrorImpl::ChainedComparison { .. } => {
                ErrorTip::Suggestion(String::from("Split the comparison and join the parts with `and`"))
            }
            ErrorImpl::UntypedSymbol { .. } => {
                ErrorTip::Suggestion(String::from("Add a type annotation to the parameter"))
            }
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "In line {}: [{}] {}",
            self.position.lineno, self.excerpt, self.internal_error
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Coarse failure classes every `ErrorImpl` falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Redeclaration,
    TypeConflict,
    Unsupported,
    LookupFailure,
    Output,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Variable {symbol} is already known in scope {scope}")]
    Redeclaration { symbol: String, scope: String },
    #[error("Symbol {symbol} is of type '{expected}' but is used as type '{received}'")]
    TypeConflict {
        symbol: String,
        expected: String,
        received: String,
    },
    #[error("We do not support different types on binary operators: '{left}' and '{right}'")]
    OperandTypeMismatch { left: String, right: String },
    #[error("Function should return '{expected}' but this return statement is of type '{received}'")]
    ReturnTypeMismatch { expected: String, received: String },
    #[error("Unsupported construct: {construct}")]
    UnsupportedConstruct { construct: String },
    #[error("Constants of type {kind} cannot be used to infer a type")]
    UnsupportedConstant { kind: String },
    #[error("Operator {operator} is not supported")]
    UnsupportedOperator { operator: String },
    #[error("We are unable to handle empty lists, yet")]
    EmptyContainer,
    #[error("Only homogeneous lists and tuples are supported: found '{first}' and '{other}'")]
    HeterogeneousContainer { first: String, other: String },
    #[error("Lists may only hold primitive elements")]
    NestedContainer,
    #[error("Index {index} is outside a list of size {size}")]
    IndexOutOfRange { index: i64, size: usize },
    #[error("Only a single comparison operator is supported, found {count}")]
    ChainedComparison { count: usize },
    #[error("Function {inner} cannot be defined inside function {outer}")]
    NestedScope { outer: String, inner: String },
    #[error("Return statement outside of a function")]
    ReturnOutsideFunction,
    #[error("Unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("Trying to find type for {symbol} but it cannot be found")]
    SymbolNotFound { symbol: String },
    #[error("Symbol {symbol} never received a type")]
    UntypedSymbol { symbol: String },
    #[error("Failed to write output: {message}")]
    OutputFailure { message: String },
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::Redeclaration { .. } => ErrorKind::Redeclaration,
            ErrorImpl::TypeConflict { .. }
            | ErrorImpl::OperandTypeMismatch { .. }
            | ErrorImpl::ReturnTypeMismatch { .. } => ErrorKind::TypeConflict,
            ErrorImpl::UnsupportedConstruct { .. }
            | ErrorImpl::UnsupportedConstant { .. }
            | ErrorImpl::UnsupportedOperator { .. }
            | ErrorImpl::EmptyContainer
            | ErrorImpl::HeterogeneousContainer { .. }
            | ErrorImpl::NestedContainer
            | ErrorImpl::IndexOutOfRange { .. }
            | ErrorImpl::ChainedComparison { .. }
            | ErrorImpl::NestedScope { .. }
            | ErrorImpl::ReturnOutsideFunction
            | ErrorImpl::UnknownType { .. } => ErrorKind::Unsupported,
            ErrorImpl::SymbolNotFound { .. } | ErrorImpl::UntypedSymbol { .. } => {
                ErrorKind::LookupFailure
            }
            ErrorImpl::OutputFailure { .. } => ErrorKind::Output,
        }
    }
}
