/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the tree handed over by the front end
///
/// Submodules:
/// - ast: Spans, the module root and JSON ingestion
/// - expressions: Definitions for the supported expression kinds
/// - statements: Definitions for the supported statement kinds
/// - types: Type descriptors recorded by the resolver
/// - builder: Helpers for constructing trees programmatically
pub mod ast;
pub mod builder;
pub mod expressions;
pub mod statements;
pub mod types;
