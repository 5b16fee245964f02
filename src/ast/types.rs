//! Type descriptors.
//!
//! Every symbol the resolver records carries one of these. The canonical
//! text form (`int`, `func:float`, `list:3:int`, ...) is what diagnostics
//! print and what `FromStr` accepts back.

use std::{fmt::Display, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::errors::ErrorImpl;

lazy_static! {
    static ref PRIMITIVE_PATTERN: Regex = Regex::new("^(int|float|str|bool|void)$").unwrap();
    static ref FUNC_PATTERN: Regex = Regex::new("^func(?::(int|float|str|bool|void))?$").unwrap();
    static ref LIST_PATTERN: Regex = Regex::new("^list:([0-9]+):(int|float|str|bool)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Int,
    Float,
    Str,
    Bool,
    Void,
    /// A function; the return type stays `None` until the first `return` fixes it.
    Func(Option<Box<TypeDescriptor>>),
    /// Fixed-length homogeneous sequence of a primitive element type.
    List {
        size: usize,
        element: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn list(size: usize, element: TypeDescriptor) -> Self {
        TypeDescriptor::List {
            size,
            element: Box::new(element),
        }
    }

    pub fn func(return_type: TypeDescriptor) -> Self {
        TypeDescriptor::Func(Some(Box::new(return_type)))
    }

    /// Resolves an annotation name such as `int` or `str`.
    pub fn from_annotation(name: &str) -> Option<Self> {
        match name {
            "int" => Some(TypeDescriptor::Int),
            "float" => Some(TypeDescriptor::Float),
            "str" => Some(TypeDescriptor::Str),
            "bool" => Some(TypeDescriptor::Bool),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, TypeDescriptor::Func(_) | TypeDescriptor::List { .. })
    }

    pub fn is_function(&self) -> bool {
        matches!(self, TypeDescriptor::Func(_))
    }

    /// A function whose return type has not been fixed yet.
    pub fn is_deferred_function(&self) -> bool {
        matches!(self, TypeDescriptor::Func(None))
    }

    /// Return type of a function descriptor; a deferred function returns `void`.
    pub fn return_type(&self) -> Option<TypeDescriptor> {
        match self {
            TypeDescriptor::Func(Some(ret)) => Some((**ret).clone()),
            TypeDescriptor::Func(None) => Some(TypeDescriptor::Void),
            _ => None,
        }
    }

    /// Whether a constant `index` addresses an element. Always true for non-lists.
    pub fn index_in_bounds(&self, index: i64) -> bool {
        match self {
            TypeDescriptor::List { size, .. } => usize::try_from(index).is_ok_and(|index| index < *size),
            _ => true,
        }
    }

    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        match self {
            TypeDescriptor::List { element, .. } => Some(element),
            _ => None,
        }
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeDescriptor::Int => write!(f, "int"),
            TypeDescriptor::Float => write!(f, "float"),
            TypeDescriptor::Str => write!(f, "str"),
            TypeDescriptor::Bool => write!(f, "bool"),
            TypeDescriptor::Void => write!(f, "void"),
            TypeDescriptor::Func(None) => write!(f, "func"),
            TypeDescriptor::Func(Some(ret)) => write!(f, "func:{}", ret),
            TypeDescriptor::List { size, element } => write!(f, "list:{}:{}", size, element),
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = ErrorImpl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ErrorImpl::UnknownType {
            type_: s.to_string(),
        };

        if let Some(captures) = PRIMITIVE_PATTERN.captures(s) {
            return match &captures[1] {
                "void" => Ok(TypeDescriptor::Void),
                name => TypeDescriptor::from_annotation(name).ok_or_else(unknown),
            };
        }
        if let Some(captures) = FUNC_PATTERN.captures(s) {
            return match captures.get(1) {
                Some(ret) => Ok(TypeDescriptor::func(ret.as_str().parse()?)),
                None => Ok(TypeDescriptor::Func(None)),
            };
        }
        if let Some(captures) = LIST_PATTERN.captures(s) {
            let size = captures[1].parse::<usize>().map_err(|_| unknown())?;
            let element = TypeDescriptor::from_annotation(&captures[2]).ok_or_else(unknown)?;
            return Ok(TypeDescriptor::list(size, element));
        }
        Err(unknown())
    }
}
