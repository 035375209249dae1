//! Integration tests for checked functions and currying

use typeweave_core::{builtins, func, maybe, record};
use typeweave_foundation::{Error, ErrorKind, LtFn, Result, Value};

fn call(f: &Value, args: &[Value]) -> Result<Value> {
    f.as_fn()
        .ok_or_else(|| Error::internal("not a function"))?
        .call(args)
}

fn add(args: &[Value]) -> Result<Value> {
    match args {
        [Value::Int(a), Value::Int(b)] => Ok(Value::Int(a + b)),
        _ => Err(Error::internal("add expects two ints")),
    }
}

#[test]
fn currying_two_then_three() {
    let ty = func(
        [builtins::number(), builtins::number()],
        builtins::number(),
        None,
    );
    let f = ty.of(add, true);
    let g = call(&f, &[Value::Int(2)]).unwrap();
    assert_eq!(call(&g, &[Value::Int(3)]).unwrap(), Value::Int(5));
}

#[test]
fn bad_first_argument_fails_before_running() {
    let ty = func(
        [builtins::number(), builtins::number()],
        builtins::number(),
        None,
    );
    let f = ty.of(|_: &[Value]| Err(Error::internal("body ran")), true);
    let err = call(&f, &[Value::from("a")]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation { .. }));
}

#[test]
fn functions_as_record_fields() {
    let handler = func([builtins::string()], builtins::boolean(), Some("Predicate"));
    let rule = record(
        [("name", builtins::string()), ("test", handler.as_type().clone())],
        Some("Rule"),
    )
    .unwrap();

    let checked = handler.of(
        |args: &[Value]| Ok(Value::Bool(args[0].as_str().is_some_and(str::is_empty))),
        false,
    );
    let built = rule
        .construct(&Value::from_pairs([
            ("name", Value::from("empty")),
            ("test", checked),
        ]))
        .unwrap();
    let test = built.as_record().and_then(|r| r.get("test")).unwrap();
    assert_eq!(call(test, &[Value::from("")]).unwrap(), Value::Bool(true));

    let unchecked = Value::Fn(LtFn::native("test", |_: &[Value]| Ok(Value::Bool(true))));
    let err = rule
        .construct(&Value::from_pairs([
            ("name", Value::from("raw")),
            ("test", unchecked),
        ]))
        .unwrap_err();
    match err.kind {
        ErrorKind::Validation { expected, path, .. } => {
            assert_eq!(expected, "Predicate");
            assert_eq!(path, vec!["Rule", "test"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn equal_descriptors_share_membership() {
    let a = func([builtins::number()], builtins::number(), None);
    let b = func([builtins::number()], builtins::number(), None);
    let f = a.of(|args: &[Value]| Ok(args[0].clone()), false);
    assert!(b.is(&f));
    let c = func([builtins::integer()], builtins::number(), None);
    assert!(!c.is(&f));
}

#[test]
fn optional_trailing_parameters_are_still_required() {
    let ty = func(
        [builtins::number(), maybe(builtins::number(), None)],
        builtins::number(),
        None,
    );
    let f = ty.of(|args: &[Value]| Ok(args[0].clone()), false);
    let err = call(&f, &[Value::Int(1)]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Arity { .. }));
    assert_eq!(call(&f, &[Value::Int(1), Value::Nil]).unwrap(), Value::Int(1));
}
