//! Integration tests for construction, membership, and idempotence

use typeweave_core::{
    Kind, Meta, Type, builtins, dict, enums_of, get_type_name, irreducible, list, maybe, record,
    subtype, tuple, union,
};
use typeweave_foundation::{ErrorKind, Value};

fn ints(values: &[i64]) -> Value {
    Value::from(values.iter().map(|n| Value::Int(*n)).collect::<Vec<_>>())
}

fn assert_idempotent(ty: &Type, raw: &Value) {
    let once = ty.construct(raw).unwrap();
    let twice = ty.construct(&once).unwrap();
    assert_eq!(once, twice, "{ty} is not idempotent on {raw}");
    assert!(ty.is(&once), "{ty} rejects its own output {once}");
}

// =============================================================================
// Idempotence and Round-trip
// =============================================================================

#[test]
fn every_kind_is_idempotent() {
    let num = builtins::number();
    let text = builtins::string();
    let point = record([("x", num.clone()), ("y", num.clone())], Some("Point")).unwrap();

    let cases: Vec<(Type, Value)> = vec![
        (num.clone(), Value::Int(1)),
        (
            subtype(num.clone(), |v| v.as_number().is_some_and(|n| n > 0.0), None),
            Value::Int(3),
        ),
        (enums_of("a b", None).unwrap(), Value::from("b")),
        (point.as_type().clone(), Value::from_pairs([("x", 1), ("y", 2)])),
        (
            tuple([num.clone(), text.clone()], None),
            Value::from(vec![Value::Int(1), Value::from("a")]),
        ),
        (list(num.clone(), None), ints(&[1, 2, 3])),
        (
            list(point.as_type().clone(), None),
            Value::from(vec![Value::from_pairs([("x", 1), ("y", 2)])]),
        ),
        (
            dict(text.clone(), point.as_type().clone(), None),
            Value::from_pairs([("origin", Value::from_pairs([("x", 0), ("y", 0)]))]),
        ),
        (
            Type::from(union([text.clone(), num.clone()], None)),
            Value::from("a"),
        ),
        (maybe(num.clone(), None), Value::Nil),
        (maybe(num, None), Value::Int(5)),
    ];

    for (ty, raw) in &cases {
        assert_idempotent(ty, raw);
    }
}

#[test]
fn construction_never_mutates_input() {
    let point = record([("x", builtins::number())], Some("Point")).unwrap();
    let points = list(point.as_type().clone(), None);
    let raw = Value::from(vec![Value::from_pairs([("x", 1)])]);
    let snapshot = raw.clone();
    let built = points.construct(&raw).unwrap();
    assert_eq!(raw, snapshot);
    assert_ne!(built, raw);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn tuple_arity() {
    let pair = tuple([builtins::number(), builtins::number()], None);
    let err = pair.construct(&ints(&[1, 2, 3])).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Arity { .. }));
    assert_eq!(pair.construct(&ints(&[1, 2])).unwrap(), ints(&[1, 2]));
}

#[test]
fn nested_failure_paths() {
    let point = record(
        [("x", builtins::number()), ("y", builtins::number())],
        Some("Point"),
    )
    .unwrap();
    let polygon = record(
        [("points", list(point.as_type().clone(), None))],
        Some("Polygon"),
    )
    .unwrap();
    let raw = Value::from_pairs([(
        "points",
        Value::from(vec![
            Value::from_pairs([("x", Value::Int(0)), ("y", Value::Int(0))]),
            Value::from_pairs([("x", Value::Int(1)), ("y", Value::from("up"))]),
        ]),
    )]);
    let err = polygon.construct(&raw).unwrap_err();
    match err.kind {
        ErrorKind::Validation {
            expected,
            actual,
            path,
        } => {
            assert_eq!(expected, "Num");
            assert_eq!(actual, Value::from("up"));
            assert_eq!(path, vec!["Polygon", "points", "1", "y"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn custom_irreducible() {
    let email = irreducible("Email", |v| v.as_str().is_some_and(|s| s.contains('@')));
    assert!(email.is(&Value::from("a@b.c")));
    let err = email.construct(&Value::from("nope")).unwrap_err();
    assert!(format!("{err}").contains("Email"));
}

// =============================================================================
// Introspection
// =============================================================================

#[test]
fn meta_describes_construction() {
    let scores = dict(builtins::string(), builtins::number(), Some("Scores"));
    assert_eq!(scores.kind(), Kind::Dict);
    match scores.meta() {
        Meta::Dict { domain, codomain } => {
            assert_eq!(domain, &builtins::string());
            assert_eq!(codomain, &builtins::number());
        }
        other => panic!("unexpected meta: {other:?}"),
    }
    assert_eq!(scores.name(), Some("Scores"));
    assert_eq!(get_type_name(&list(scores, None)), "Array<Scores>");
}
