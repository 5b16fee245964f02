//! Utility macros for the compiler.
//!
//! - `MK_ERROR!` - Builds a fatal `Error` quoting the offending node's source
//!
//! Both passes raise every diagnostic through this macro so the rendered
//! text is identical no matter which pass failed.

/// Creates an `Error` for a node through a `ScopeTracker`.
///
/// # Arguments
///
/// * `$tracker` - The `ScopeTracker` owning the source lines
/// * `$node` - Any `Located` node (or `span` followed by a `Span` reference)
/// * `$impl` - The `ErrorImpl` describing the failure
///
/// # Example
///
/// ```ignore
/// return Err(MK_ERROR!(type_checker.scope, expr, ErrorImpl::EmptyContainer));
/// return Err(MK_ERROR!(compiler.scope, span &stmt.span, ErrorImpl::NestedContainer));
/// ```
#[macro_export]
macro_rules! MK_ERROR {
    ($tracker:expr, span $span:expr, $impl:expr) => {
        $tracker.exception($span, $impl)
    };
    ($tracker:expr, $node:expr, $impl:expr) => {
        $tracker.exception($crate::ast::ast::Located::get_span($node), $impl)
    };
}
