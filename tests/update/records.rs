//! Integration tests for updating record instances

use typeweave_core::update::patch;
use typeweave_core::{RecordType, Type, builtins, list, maybe, record, union, update};
use typeweave_foundation::{ErrorKind, Value};

fn point() -> RecordType {
    record(
        [("x", builtins::number()), ("y", builtins::number())],
        Some("Point"),
    )
    .unwrap()
}

#[test]
fn set_field_on_record() {
    let ty = point();
    let p = ty.construct(&Value::from_pairs([("x", 1), ("y", 2)])).unwrap();
    let next = ty.update(&p, &patch::at("x", patch::set(3))).unwrap();
    let expected = ty.construct(&Value::from_pairs([("x", 3), ("y", 2)])).unwrap();
    assert_eq!(next, expected);
}

#[test]
fn update_never_mutates_the_instance() {
    let ty = point();
    let p = ty.construct(&Value::from_pairs([("x", 1), ("y", 2)])).unwrap();
    let snapshot = p.clone();
    let _ = ty.update(&p, &patch::at("y", patch::set(9))).unwrap();
    assert_eq!(p, snapshot);
    assert_eq!(p.as_record().unwrap().get("y"), Some(&Value::Int(2)));
}

#[test]
fn free_update_revalidates_records() {
    let ty = point();
    let p = ty.construct(&Value::from_pairs([("x", 1), ("y", 2)])).unwrap();
    let next = update(&p, &patch::merge(Value::from_pairs([("y", 5)]))).unwrap();
    assert!(ty.is(&next));

    let err = update(&p, &patch::at("x", patch::set("left"))).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation { .. }));
}

#[test]
fn nested_record_inside_list() {
    let ty = point();
    let points = list(ty.as_type().clone(), None);
    let v = points
        .construct(&Value::from(vec![
            Value::from_pairs([("x", 0), ("y", 0)]),
            Value::from_pairs([("x", 1), ("y", 1)]),
        ]))
        .unwrap();
    let spec = patch::at(1, patch::at("x", patch::set(10)));
    let next = points.update(&v, &spec).unwrap();
    let second = next.as_vec().and_then(|items| items.get(1)).unwrap();
    assert!(ty.is(second));
    assert_eq!(second.as_record().unwrap().get("x"), Some(&Value::Int(10)));

    // The untouched sibling is the same instance.
    let first_before = v.as_vec().and_then(|items| items.get(0)).unwrap();
    let first_after = next.as_vec().and_then(|items| items.get(0)).unwrap();
    assert_eq!(first_before, first_after);
}

#[test]
fn removing_a_required_field_fails() {
    let ty = point();
    let p = ty.construct(&Value::from_pairs([("x", 1), ("y", 2)])).unwrap();
    assert!(update(&p, &patch::remove(["x"])).is_err());
}

fn circle_and_square() -> (RecordType, RecordType) {
    let circle = record([("r", builtins::number())], Some("Circle")).unwrap();
    let square = record([("side", builtins::number())], Some("Square")).unwrap();
    (circle, square)
}

fn holding(field: Type) -> (RecordType, Value) {
    let holder = record([("p", field)], Some("Holder")).unwrap();
    let h = holder
        .construct(&Value::from_pairs([(
            "p",
            Value::from_pairs([("x", 1), ("y", 2)]),
        )]))
        .unwrap();
    (holder, h)
}

#[test]
fn set_clears_an_optional_record_field() {
    let (holder, h) = holding(maybe(Type::from(point()), None));
    let next = holder
        .update(&h, &patch::at("p", patch::set(Value::Nil)))
        .unwrap();
    assert!(holder.is(&next));
    assert_eq!(next.as_record().unwrap().get("p"), Some(&Value::Nil));
}

#[test]
fn set_switches_a_union_field_member() {
    let (circle, square) = circle_and_square();
    let shape = union(
        [circle.as_type().clone(), square.as_type().clone()],
        Some("Shape"),
    );
    let holder = record([("s", Type::from(shape))], Some("Holder")).unwrap();
    let c = circle.construct(&Value::from_pairs([("r", 1)])).unwrap();
    let h = holder.construct(&Value::from_pairs([("s", c)])).unwrap();
    let sq = square.construct(&Value::from_pairs([("side", 2)])).unwrap();

    let next = holder
        .update(&h, &patch::at("s", patch::set(sq.clone())))
        .unwrap();
    let s = next.as_record().unwrap().get("s").unwrap();
    assert!(square.is(s));
    assert_eq!(s, &sq);
}

#[test]
fn set_replaces_a_record_outright() {
    let (circle, square) = circle_and_square();
    let c = circle.construct(&Value::from_pairs([("r", 1)])).unwrap();
    let sq = square.construct(&Value::from_pairs([("side", 2)])).unwrap();
    let next = update(&c, &patch::set(sq.clone())).unwrap();
    assert_eq!(next, sq);
    assert!(!circle.is(&next));
}

#[test]
fn replaced_fields_are_checked_by_the_enclosing_record() {
    let (holder, h) = holding(Type::from(point()));
    let err = holder
        .update(&h, &patch::at("p", patch::set(Value::Nil)))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation { .. }));
}

#[test]
fn merge_on_a_nested_record_keeps_its_type() {
    let ty = point();
    let (_, h) = holding(ty.as_type().clone());
    let spec = patch::at("p", patch::merge(Value::from_pairs([("y", 7)])));
    let next = update(&h, &spec).unwrap();
    let p = next.as_record().unwrap().get("p").unwrap();
    assert!(ty.is(p));
    assert_eq!(p.as_record().unwrap().get("y"), Some(&Value::Int(7)));
}
