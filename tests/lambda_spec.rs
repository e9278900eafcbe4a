/// Tests for the string-lambda compiler.
///
/// Covers the four parameter forms, implicit-parameter inference, outer-scope
/// resolution, evaluation of the supported operators and compile errors.
use kestrel::host::Builtins;
use kestrel::lambda::{compile, compile_with, CompileError, Form};
use kestrel::value::{RuntimeError, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn apply(source: &str, args: &[Value]) -> Value {
    let lambda = compile(source).expect("compile failed");
    lambda.call(&Builtins::new(), args).expect("call failed")
}

fn apply_in(host: &Builtins, source: &str, args: &[Value]) -> Value {
    let lambda = compile_with(source, host).expect("compile failed");
    lambda.call(host, args).expect("call failed")
}

fn params(source: &str) -> Vec<String> {
    compile(source).expect("compile failed").params().to_vec()
}

fn s(text: &str) -> Value {
    Value::str(text)
}

// ---------------------------------------------------------------------------
// Explicit arrow form
// ---------------------------------------------------------------------------

#[test]
fn arrow_doubles() {
    assert_eq!(apply("x -> x * 2", &[Value::Int(5)]), Value::Int(10));
}

#[test]
fn arrow_params_are_ordered() {
    let lambda = compile("a, b -> a - b").unwrap();
    assert_eq!(lambda.form(), Form::Arrow);
    assert_eq!(lambda.params(), ["a", "b"]);
    assert_eq!(
        lambda
            .call(&Builtins::new(), &[Value::Int(10), Value::Int(3)])
            .unwrap(),
        Value::Int(7)
    );
}

#[test]
fn arrow_params_may_be_parenthesised() {
    assert_eq!(params("(a, b) -> b"), vec!["a", "b"]);
}

#[test]
fn arrow_with_no_params() {
    let lambda = compile("-> 42").unwrap();
    assert_eq!(lambda.arity(), 0);
    assert_eq!(lambda.call(&Builtins::new(), &[]).unwrap(), Value::Int(42));
}

#[test]
fn arrow_ignores_outer_scope_for_params() {
    let host = Builtins::new().with("y", Value::Int(100));
    assert_eq!(
        apply_in(&host, "x -> x + y", &[Value::Int(1)]),
        Value::Int(101)
    );
    assert_eq!(compile_with("x -> x + y", &host).unwrap().params(), ["x"]);
}

#[test]
fn surplus_args_are_ignored() {
    assert_eq!(
        apply("x -> x", &[Value::Int(1), Value::Int(2), Value::Int(3)]),
        Value::Int(1)
    );
}

#[test]
fn missing_args_are_undefined() {
    assert_eq!(apply("x, y -> y", &[Value::Int(1)]), Value::Undefined);
}

// ---------------------------------------------------------------------------
// Placeholder form
// ---------------------------------------------------------------------------

#[test]
fn placeholder_with_outer_binding() {
    let host = Builtins::new().with("world", s("World"));
    let lambda = compile_with("_ + ' ' + world", &host).unwrap();
    assert_eq!(lambda.form(), Form::Placeholder);
    assert_eq!(lambda.params(), ["_"]);
    assert_eq!(lambda.call(&host, &[s("Hello")]).unwrap(), s("Hello World"));
}

#[test]
fn placeholder_params_do_not_depend_on_scope() {
    assert_eq!(params("_ + ' ' + world"), vec!["_"]);
}

#[test]
fn placeholder_unresolved_name_fails_at_call_time() {
    let lambda = compile("_ + missing").expect("compiles without a binding");
    let err = lambda.call(&Builtins::new(), &[Value::Int(1)]).unwrap_err();
    assert_eq!(err, RuntimeError::Unresolved("missing".to_string()));
}

#[test]
fn quoted_underscore_is_not_a_placeholder() {
    let lambda = compile("x + '_'").unwrap();
    assert_eq!(lambda.form(), Form::Implicit);
    assert_eq!(lambda.params(), ["x"]);
}

#[test]
fn longer_identifier_is_not_a_placeholder() {
    assert_eq!(params("_x + 1"), vec!["_x"]);
}

// ---------------------------------------------------------------------------
// Point-free form
// ---------------------------------------------------------------------------

#[test]
fn point_free_concatenation() {
    let lambda = compile("+ ' World'").unwrap();
    assert_eq!(lambda.form(), Form::PointFree);
    assert_eq!(lambda.arity(), 1);
    assert_eq!(lambda.call(&Builtins::new(), &[s("Hello")]).unwrap(), s("Hello World"));
}

#[test]
fn point_free_matches_placeholder_form() {
    for input in ["Hello", "", "a b"] {
        assert_eq!(
            apply("+ ' World'", &[s(input)]),
            apply("_ + ' World'", &[s(input)])
        );
    }
}

#[test]
fn point_free_method_call() {
    assert_eq!(apply(".toUpperCase()", &[s("Hello")]), s("HELLO"));
}

#[test]
fn point_free_property() {
    assert_eq!(apply(".length", &[s("Hello")]), Value::Int(5));
}

#[test]
fn point_free_comparison() {
    assert_eq!(apply("> 3", &[Value::Int(5)]), Value::Bool(true));
    assert_eq!(apply("=== 'a'", &[s("b")]), Value::Bool(false));
}

// ---------------------------------------------------------------------------
// Implicit inference
// ---------------------------------------------------------------------------

#[test]
fn implicit_single_param() {
    let lambda = compile("str + ' World'").unwrap();
    assert_eq!(lambda.form(), Form::Implicit);
    assert_eq!(lambda.params(), ["str"]);
    assert_eq!(lambda.call(&Builtins::new(), &[s("Hello")]).unwrap(), s("Hello World"));
}

#[test]
fn implicit_params_in_first_occurrence_order() {
    assert_eq!(params("b - a"), vec!["b", "a"]);
    assert_eq!(params("x * x + y"), vec!["x", "y"]);
    assert_eq!(apply("b - a", &[Value::Int(10), Value::Int(4)]), Value::Int(6));
}

#[test]
fn member_names_are_not_params() {
    assert_eq!(params("s.slice(n).length + m"), vec!["s", "n", "m"]);
}

#[test]
fn reserved_words_are_not_params() {
    assert_eq!(params("x || this"), vec!["x"]);
    assert_eq!(params("x === undefined"), vec!["x"]);
}

#[test]
fn outer_bindings_are_not_params() {
    let host = Builtins::new().with("offset", Value::Int(10));
    let lambda = compile_with("x + offset", &host).unwrap();
    assert_eq!(lambda.params(), ["x"]);
    assert_eq!(lambda.call(&host, &[Value::Int(5)]).unwrap(), Value::Int(15));
}

#[test]
fn outer_filtering_keeps_relative_order() {
    let host = Builtins::new().with("b", Value::Int(0));
    assert_eq!(compile_with("c + b + a", &host).unwrap().params(), ["c", "a"]);
    assert_eq!(params("c + b + a"), vec!["c", "b", "a"]);
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[test]
fn string_concatenation_with_numbers() {
    assert_eq!(apply("s + 1", &[s("a")]), s("a1"));
    assert_eq!(apply("1 + s", &[s("a")]), s("1a"));
}

#[test]
fn inexact_integer_division_is_float() {
    assert_eq!(apply("x / 2", &[Value::Int(5)]), Value::Float(2.5));
    assert_eq!(apply("x / 2", &[Value::Int(4)]), Value::Int(2));
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let lambda = compile("x / 0").unwrap();
    assert!(lambda.call(&Builtins::new(), &[Value::Int(1)]).is_err());
}

#[test]
fn conditional_expression() {
    let src = "n > 2 ? 'big' : 'small'";
    assert_eq!(apply(src, &[Value::Int(3)]), s("big"));
    assert_eq!(apply(src, &[Value::Int(1)]), s("small"));
}

#[test]
fn logical_operators_return_deciding_operand() {
    assert_eq!(apply("a || b", &[Value::Int(0), s("x")]), s("x"));
    assert_eq!(apply("a && b", &[Value::Int(0), s("x")]), Value::Int(0));
}

#[test]
fn method_arguments_and_indexing() {
    assert_eq!(apply("s.slice(1, 3)", &[s("Hello")]), s("el"));
    assert_eq!(apply("xs[1]", &[Value::list(vec![Value::Int(7), Value::Int(8)])]), Value::Int(8));
    assert_eq!(apply("xs[5]", &[Value::list(vec![])]), Value::Undefined);
}

#[test]
fn calling_an_outer_function() {
    let host = Builtins::new().with(
        "twice",
        Value::function("twice", |args| match args.first() {
            Some(Value::Int(i)) => Ok(Value::Int(i * 2)),
            _ => Err(RuntimeError::Error("twice: expected an int".to_string())),
        }),
    );
    assert_eq!(apply_in(&host, "twice(x) + 1", &[Value::Int(4)]), Value::Int(9));
}

#[test]
fn bare_method_reference_is_an_error() {
    let lambda = compile(".toUpperCase").unwrap();
    assert!(lambda.call(&Builtins::new(), &[s("a")]).is_err());
}

// ---------------------------------------------------------------------------
// Compile errors
// ---------------------------------------------------------------------------

#[test]
fn empty_body_after_arrow() {
    assert!(matches!(compile("x -> "), Err(CompileError::EmptyBody)));
}

#[test]
fn empty_source() {
    assert!(matches!(compile("   "), Err(CompileError::EmptyBody)));
}

#[test]
fn invalid_param_name() {
    assert!(matches!(compile("1x -> 1"), Err(CompileError::InvalidParam(_))));
    assert!(matches!(compile("a,, b -> a"), Err(CompileError::InvalidParam(_))));
}

#[test]
fn unsupported_syntax() {
    assert!(matches!(compile("x -> (x"), Err(CompileError::Parse(_))));
    assert!(matches!(compile("'abc"), Err(CompileError::Lex(_))));
    assert!(matches!(compile("x = 1"), Err(CompileError::Lex(_))));
}

#[test]
fn unrecognised_leading_token_is_rejected() {
    assert!(compile(") x").is_err());
    assert!(compile(", x").is_err());
    assert!(compile("* ").is_err());
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[test]
fn compiling_twice_is_equivalent() {
    let first = compile("n * n + 1").unwrap();
    let second = compile("n * n + 1").unwrap();
    assert_eq!(first.params(), second.params());
    assert_eq!(first.body(), second.body());
    let host = Builtins::new();
    for n in [-3, 0, 7] {
        assert_eq!(
            first.call(&host, &[Value::Int(n)]).unwrap(),
            second.call(&host, &[Value::Int(n)]).unwrap()
        );
    }
}
