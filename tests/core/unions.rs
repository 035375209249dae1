//! Integration tests for union dispatch

use typeweave_core::{builtins, maybe, union};
use typeweave_foundation::{ErrorKind, Value};

#[test]
fn dispatch_determinism() {
    let u = union([builtins::string(), builtins::number()], None);
    assert_eq!(u.dispatch(&Value::from("a")), Some(builtins::string()));
    assert_eq!(u.dispatch(&Value::Int(1)), Some(builtins::number()));
    assert_eq!(u.dispatch(&Value::Bool(true)), None);

    let err = u.construct(&Value::Bool(true)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Dispatch { .. }));
}

#[test]
fn first_matching_member_wins_on_ambiguity() {
    let u = union([builtins::number(), builtins::integer()], None);
    assert_eq!(u.dispatch(&Value::Int(1)), Some(builtins::number()));
}

#[test]
fn dispatch_override_resolves_ambiguity() {
    let u = union([builtins::number(), builtins::integer()], Some("Numeric"));
    u.set_dispatch(|v| match v {
        Value::Int(_) => Some(builtins::integer()),
        Value::Float(_) => Some(builtins::number()),
        _ => None,
    })
    .unwrap();
    assert_eq!(u.dispatch(&Value::Int(1)), Some(builtins::integer()));
    assert_eq!(u.construct(&Value::Float(1.5)).unwrap(), Value::Float(1.5));
    assert!(u.construct(&Value::from("1")).is_err());
}

#[test]
fn maybe_of_union() {
    let u = union([builtins::string(), builtins::number()], Some("Scalar"));
    let optional = maybe(u.into(), None);
    assert!(optional.is(&Value::Nil));
    assert!(optional.is(&Value::from("a")));
    assert_eq!(optional.to_string(), "?Scalar");
}
