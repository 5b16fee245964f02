//! Unit tests for the resolution pass.

use super::type_checker::resolve;
use crate::{
    ast::{
        ast::{Module, Span},
        builder::*,
        expressions::{BinaryOperator, UnaryOperator},
        statements::Arg,
        types::TypeDescriptor,
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
};

use super::symbol_table::SymbolTable;

fn resolve_ok(module: &Module) -> SymbolTable {
    resolve(module, &[]).unwrap()
}

fn resolve_err(module: &Module) -> Error {
    resolve(module, &[]).unwrap_err()
}

fn add_function() -> Module {
    module(vec![function(
        "add",
        vec![arg("a", Some("int")), arg("b", Some("int"))],
        Some(name("int")),
        vec![ret(Some(binary(name("a"), BinaryOperator::Add, name("b"))))],
    )])
}

#[test]
fn test_annotated_function() {
    let table = resolve_ok(&add_function());

    assert_eq!(table.get_type("add"), Some(&TypeDescriptor::func(TypeDescriptor::Int)));
    assert_eq!(table.get_type("add::a"), Some(&TypeDescriptor::Int));
    assert_eq!(table.get_type("add::b"), Some(&TypeDescriptor::Int));
    assert_eq!(table.parameters("add"), ["add::a", "add::b"]);
    assert!(table.find_local_syms("add").is_empty());
}

#[test]
fn test_list_literal_type() {
    let table = resolve_ok(&module(vec![assign_to(
        "x",
        list(vec![int(1), int(2), int(3)]),
    )]));

    assert_eq!(table.get_type("x"), Some(&TypeDescriptor::list(3, TypeDescriptor::Int)));
    assert_eq!(table.find_local_syms(""), ["x"]);
}

#[test]
fn test_type_conflict_on_rebinding() {
    let error = resolve_err(&module(vec![
        assign_to("x", int(1)),
        assign_to("x", float(1.0)),
    ]));

    assert_eq!(error.kind(), ErrorKind::TypeConflict);
    let message = error.to_string();
    assert!(message.contains("'int'"));
    assert!(message.contains("'float'"));
}

#[test]
fn test_same_type_rebinding_is_stable() {
    let table = resolve_ok(&module(vec![
        assign_to("x", int(1)),
        assign_to("x", binary(name("x"), BinaryOperator::Add, int(1))),
    ]));

    assert_eq!(table.get_type("x"), Some(&TypeDescriptor::Int));
}

#[test]
fn test_heterogeneous_list_is_rejected() {
    let error = resolve_err(&module(vec![assign_to("x", list(vec![int(1), float(2.0)]))]));

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::HeterogeneousContainer {
            first: "int".to_string(),
            other: "float".to_string(),
        }
    );
}

#[test]
fn test_empty_list_is_rejected() {
    let error = resolve_err(&module(vec![assign_to("x", list(vec![]))]));

    assert_eq!(error.get_impl(), &ErrorImpl::EmptyContainer);
}

#[test]
fn test_nested_list_is_rejected() {
    let error = resolve_err(&module(vec![assign_to(
        "x",
        list(vec![list(vec![int(1)])]),
    )]));

    assert_eq!(error.get_impl(), &ErrorImpl::NestedContainer);
}

#[test]
fn test_tuple_resolves_like_list() {
    let table = resolve_ok(&module(vec![assign_to(
        "t",
        tuple(vec![float(1.0), float(2.5)]),
    )]));

    assert_eq!(table.get_type("t"), Some(&TypeDescriptor::list(2, TypeDescriptor::Float)));
}

#[test]
fn test_function_locals_are_isolated() {
    let error = resolve_err(&module(vec![
        function("f", vec![], None, vec![assign_to("y", int(1))]),
        assign_to("z", name("y")),
    ]));
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::SymbolNotFound {
            symbol: "y".to_string()
        }
    );

    let error = resolve_err(&module(vec![
        function("f", vec![], None, vec![assign_to("y", int(1))]),
        function("g", vec![], None, vec![assign_to("z", name("y"))]),
    ]));
    assert_eq!(error.kind(), ErrorKind::LookupFailure);
}

#[test]
fn test_local_shadows_global_without_global_statement() {
    let table = resolve_ok(&module(vec![
        assign_to("x", int(1)),
        function("f", vec![], None, vec![assign_to("x", float(2.0))]),
    ]));

    assert_eq!(table.get_type("x"), Some(&TypeDescriptor::Int));
    assert_eq!(table.get_type("f::x"), Some(&TypeDescriptor::Float));
    assert_eq!(table.find_local_syms("f"), ["f::x"]);
}

#[test]
fn test_global_statement_binds_module_symbol() {
    let table = resolve_ok(&module(vec![
        assign_to("counter", int(0)),
        function(
            "tick",
            vec![],
            None,
            vec![
                global(&["counter"]),
                assign_to("counter", binary(name("counter"), BinaryOperator::Add, int(1))),
            ],
        ),
    ]));

    assert_eq!(table.get_type("tick::counter"), None);
    assert!(table.find_local_syms("tick").is_empty());

    let error = resolve_err(&module(vec![
        assign_to("counter", int(0)),
        function(
            "tick",
            vec![],
            None,
            vec![global(&["counter"]), assign_to("counter", float(0.5))],
        ),
    ]));
    assert_eq!(error.kind(), ErrorKind::TypeConflict);
}

#[test]
fn test_global_statement_declares_new_module_symbol() {
    let table = resolve_ok(&module(vec![function(
        "setup",
        vec![],
        None,
        vec![global(&["ready"]), assign_to("ready", boolean(true))],
    )]));

    assert_eq!(table.get_type("ready"), Some(&TypeDescriptor::Bool));
    assert_eq!(table.find_local_syms(""), ["ready"]);
}

#[test]
fn test_return_fixes_deferred_function() {
    let table = resolve_ok(&module(vec![
        function("f", vec![], None, vec![ret(Some(float(1.5)))]),
        function("g", vec![], None, vec![pass()]),
    ]));

    assert_eq!(table.get_type("f"), Some(&TypeDescriptor::func(TypeDescriptor::Float)));
    assert_eq!(table.get_type("g"), Some(&TypeDescriptor::Func(None)));
    assert_eq!(table.find_ret_type("g"), Some(TypeDescriptor::Void));
}

#[test]
fn test_second_return_must_match() {
    let error = resolve_err(&module(vec![function(
        "f",
        vec![],
        None,
        vec![ret(Some(int(1))), ret(Some(float(1.0)))],
    )]));

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::ReturnTypeMismatch {
            expected: "int".to_string(),
            received: "float".to_string(),
        }
    );
}

#[test]
fn test_bare_return_is_void() {
    let table = resolve_ok(&module(vec![function("f", vec![], None, vec![ret(None)])]));

    assert_eq!(table.get_type("f"), Some(&TypeDescriptor::func(TypeDescriptor::Void)));
}

#[test]
fn test_return_against_annotation() {
    let error = resolve_err(&module(vec![function(
        "f",
        vec![],
        Some(name("int")),
        vec![ret(None)],
    )]));

    assert_eq!(error.kind(), ErrorKind::TypeConflict);
}

#[test]
fn test_return_outside_function() {
    let error = resolve_err(&module(vec![ret(Some(int(1)))]));

    assert_eq!(error.get_impl(), &ErrorImpl::ReturnOutsideFunction);
}

#[test]
fn test_annotated_redeclaration() {
    let error = resolve_err(&module(vec![
        ann_assign("x", "int", Some(int(1))),
        ann_assign("x", "int", Some(int(2))),
    ]));
    assert_eq!(error.kind(), ErrorKind::Redeclaration);

    let error = resolve_err(&module(vec![
        ann_assign("x", "int", Some(int(1))),
        ann_assign("x", "float", Some(float(2.0))),
    ]));
    assert_eq!(error.kind(), ErrorKind::TypeConflict);
}

#[test]
fn test_annotated_string_variable() {
    let table = resolve_ok(&module(vec![ann_assign("greeting", "str", Some(string("hi")))]));

    assert_eq!(table.get_type("greeting"), Some(&TypeDescriptor::Str));
}

#[test]
fn test_string_literal_cannot_be_inferred() {
    let error = resolve_err(&module(vec![assign_to("s", string("hi"))]));

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnsupportedConstant {
            kind: "str".to_string()
        }
    );
}

#[test]
fn test_unknown_annotation() {
    let error = resolve_err(&module(vec![ann_assign("xs", "list", None)]));

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnknownType {
            type_: "list".to_string()
        }
    );
}

#[test]
fn test_untyped_argument_lookup() {
    let error = resolve_err(&module(vec![function(
        "f",
        vec![arg("a", None)],
        None,
        vec![ret(Some(name("a")))],
    )]));

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UntypedSymbol {
            symbol: "f::a".to_string()
        }
    );
}

#[test]
fn test_function_redefinition() {
    let error = resolve_err(&module(vec![
        function("f", vec![], None, vec![pass()]),
        function("f", vec![], None, vec![pass()]),
    ]));

    assert_eq!(error.kind(), ErrorKind::Redeclaration);
}

#[test]
fn test_nested_function_is_rejected() {
    let error = resolve_err(&module(vec![function(
        "outer",
        vec![],
        None,
        vec![function("inner", vec![], None, vec![pass()])],
    )]));

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::NestedScope {
            outer: "outer".to_string(),
            inner: "inner".to_string(),
        }
    );
}

#[test]
fn test_subscript_assignment() {
    let table = resolve_ok(&module(vec![
        assign_to("x", list(vec![int(1), int(2), int(3)])),
        assign(vec![subscript(name("x"), int(0))], int(7)),
    ]));
    assert_eq!(table.get_type("x"), Some(&TypeDescriptor::list(3, TypeDescriptor::Int)));

    let error = resolve_err(&module(vec![
        assign_to("x", list(vec![int(1), int(2), int(3)])),
        assign(vec![subscript(name("x"), int(0))], float(7.0)),
    ]));
    assert_eq!(error.kind(), ErrorKind::TypeConflict);
}

#[test]
fn test_operand_type_mismatch() {
    let error = resolve_err(&module(vec![assign_to(
        "y",
        binary(int(1), BinaryOperator::Add, float(2.5)),
    )]));

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::OperandTypeMismatch {
            left: "int".to_string(),
            right: "float".to_string(),
        }
    );
}

#[test]
fn test_diagnostic_quotes_source() {
    let lines: Vec<String> = ["x = 1", "x = 1.0"].iter().map(|x| x.to_string()).collect();
    let module = module(vec![
        assign_to("x", int(1)).with_span(Span::line(1, 0, 5)),
        assign(
            vec![name("x").with_span(Span::line(2, 0, 1))],
            float(1.0).with_span(Span::line(2, 4, 7)),
        )
        .with_span(Span::line(2, 0, 7)),
    ]);

    let error = resolve(&module, &lines).unwrap_err();

    assert_eq!(error.get_position().lineno, 2);
    assert_eq!(error.get_excerpt(), "x");
}

#[test]
fn test_annotated_value_must_match() {
    let error = resolve_err(&module(vec![ann_assign("x", "int", Some(float(1.5)))]));
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::TypeConflict {
            symbol: "x".to_string(),
            expected: "int".to_string(),
            received: "float".to_string(),
        }
    );

    let error = resolve_err(&module(vec![ann_assign(
        "x",
        "int",
        Some(list(vec![int(1), int(2)])),
    )]));
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::TypeConflict {
            symbol: "x".to_string(),
            expected: "int".to_string(),
            received: "list:2:int".to_string(),
        }
    );
}

#[test]
fn test_annotated_value_names_must_exist() {
    let error = resolve_err(&module(vec![ann_assign("x", "int", Some(name("missing")))]));

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::SymbolNotFound {
            symbol: "missing".to_string()
        }
    );
    assert_eq!(error.kind(), ErrorKind::LookupFailure);
}

#[test]
fn test_string_values_need_a_string_annotation() {
    let error = resolve_err(&module(vec![ann_assign("x", "int", Some(string("hi")))]));
    assert_eq!(error.kind(), ErrorKind::TypeConflict);

    let error = resolve_err(&module(vec![
        assign_to("n", int(3)),
        ann_assign("x", "int", Some(call(name("str"), vec![name("n")]))),
    ]));
    assert_eq!(error.kind(), ErrorKind::TypeConflict);

    let table = resolve_ok(&module(vec![
        assign_to("n", int(3)),
        ann_assign("label", "str", Some(call(name("str"), vec![name("n")]))),
    ]));
    assert_eq!(table.get_type("label"), Some(&TypeDescriptor::Str));
}

#[test]
fn test_annotated_call_values() {
    // Nothing is known about external calls, so the annotation stands
    let table = resolve_ok(&module(vec![ann_assign(
        "level",
        "int",
        Some(call(name("analogRead"), vec![name("A0")])),
    )]));
    assert_eq!(table.get_type("level"), Some(&TypeDescriptor::Int));

    let error = resolve_err(&module(vec![
        function("half", vec![], Some(name("float")), vec![ret(Some(float(0.5)))]),
        ann_assign("x", "int", Some(call(name("half"), vec![]))),
    ]));
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::TypeConflict {
            symbol: "x".to_string(),
            expected: "int".to_string(),
            received: "float".to_string(),
        }
    );
}

#[test]
fn test_whole_list_copy_is_rejected() {
    let error = resolve_err(&module(vec![
        assign_to("x", list(vec![int(1), int(2)])),
        assign_to("y", name("x")),
    ]));
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnsupportedConstruct {
            construct: "copying a whole list".to_string()
        }
    );

    let error = resolve_err(&module(vec![
        assign_to("x", list(vec![int(1), int(2), int(3)])),
        annotated("y", string("list:3:int"), Some(name("x"))),
    ]));
    assert_eq!(error.kind(), ErrorKind::Unsupported);
}

#[test]
fn test_none_return_annotation_is_void() {
    let table = resolve_ok(&module(vec![function("f", vec![], Some(none()), vec![ret(None)])]));

    assert_eq!(table.get_type("f"), Some(&TypeDescriptor::func(TypeDescriptor::Void)));
}

#[test]
fn test_declaration_without_value() {
    let table = resolve_ok(&module(vec![
        ann_assign("count", "int", None),
        function(
            "f",
            vec![],
            None,
            vec![ann_assign("total", "float", None), ret(Some(name("total")))],
        ),
    ]));

    assert_eq!(table.get_type("count"), Some(&TypeDescriptor::Int));
    assert_eq!(table.get_type("f::total"), Some(&TypeDescriptor::Float));
    assert_eq!(table.get_type("f"), Some(&TypeDescriptor::func(TypeDescriptor::Float)));
}

#[test]
fn test_descriptor_annotations() {
    let table = resolve_ok(&module(vec![annotated(
        "buf",
        string("list:3:int"),
        Some(list(vec![int(1), int(2), int(3)])),
    )]));
    assert_eq!(table.get_type("buf"), Some(&TypeDescriptor::list(3, TypeDescriptor::Int)));

    let table = resolve_ok(&module(vec![annotated("ratio", string("float"), None)]));
    assert_eq!(table.get_type("ratio"), Some(&TypeDescriptor::Float));

    let error = resolve_err(&module(vec![annotated("f", string("func:int"), None)]));
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnknownType {
            type_: "func:int".to_string()
        }
    );

    let error = resolve_err(&module(vec![annotated("v", string("void"), None)]));
    assert_eq!(error.kind(), ErrorKind::Unsupported);

    let error = resolve_err(&module(vec![annotated("buf", string("list:0:int"), None)]));
    assert_eq!(error.get_impl(), &ErrorImpl::EmptyContainer);

    let error = resolve_err(&module(vec![annotated(
        "buf",
        string("list:3:int"),
        Some(list(vec![int(1), int(2)])),
    )]));
    assert_eq!(error.kind(), ErrorKind::TypeConflict);
}

#[test]
fn test_list_parameters_and_returns_are_rejected() {
    let parameter = Arg {
        annotation: Some(string("list:2:int")),
        ..arg("xs", None)
    };
    let error = resolve_err(&module(vec![function("f", vec![parameter], None, vec![pass()])]));
    assert_eq!(error.kind(), ErrorKind::Unsupported);

    let error = resolve_err(&module(vec![function(
        "g",
        vec![],
        Some(string("list:2:int")),
        vec![pass()],
    )]));
    assert_eq!(error.kind(), ErrorKind::Unsupported);

    let table = resolve_ok(&module(vec![function(
        "h",
        vec![],
        Some(string("void")),
        vec![ret(None)],
    )]));
    assert_eq!(table.get_type("h"), Some(&TypeDescriptor::func(TypeDescriptor::Void)));
}

#[test]
fn test_constant_index_out_of_range() {
    let error = resolve_err(&module(vec![
        assign_to("x", list(vec![int(1), int(2), int(3)])),
        assign(vec![subscript(name("x"), int(5))], int(1)),
    ]));
    assert_eq!(error.get_impl(), &ErrorImpl::IndexOutOfRange { index: 5, size: 3 });

    let error = resolve_err(&module(vec![
        assign_to("x", list(vec![int(1), int(2), int(3)])),
        assign(vec![subscript(name("x"), unary(UnaryOperator::USub, int(1)))], int(1)),
    ]));
    assert_eq!(error.get_impl(), &ErrorImpl::IndexOutOfRange { index: -1, size: 3 });

    resolve_ok(&module(vec![
        assign_to("x", list(vec![int(1), int(2), int(3)])),
        assign(vec![subscript(name("x"), int(2))], int(1)),
    ]));
}
