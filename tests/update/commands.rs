//! Integration tests for built-in and custom update commands

use typeweave_core::update::patch;
use typeweave_core::{builtins, command_names, dict, list, register_command, update};
use typeweave_foundation::{ErrorKind, LtFn, Value};

fn ints(values: &[i64]) -> Value {
    Value::from(values.iter().map(|n| Value::Int(*n)).collect::<Vec<_>>())
}

#[test]
fn swap_list_elements() {
    let nums = list(builtins::number(), None);
    let v = nums.construct(&ints(&[1, 2, 3, 4])).unwrap();
    assert_eq!(nums.update(&v, &patch::swap(1, 2)).unwrap(), ints(&[1, 3, 2, 4]));
}

#[test]
fn remove_dict_keys() {
    let scores = dict(builtins::string(), builtins::number(), None);
    let v = scores
        .construct(&Value::from_pairs([("a", 1), ("b", 2)]))
        .unwrap();
    assert_eq!(
        scores.update(&v, &patch::remove(["a"])).unwrap(),
        Value::from_pairs([("b", 2)])
    );
}

#[test]
fn push_unshift_splice() {
    let v = ints(&[2, 3]);
    assert_eq!(update(&v, &patch::push([4, 5])).unwrap(), ints(&[2, 3, 4, 5]));
    assert_eq!(update(&v, &patch::unshift([0, 1])).unwrap(), ints(&[0, 1, 2, 3]));
    assert_eq!(
        update(&v, &patch::splice(1, 0, [9, 9])).unwrap(),
        ints(&[2, 9, 9, 3])
    );
}

#[test]
fn merge_overlays_entries() {
    let v = Value::from_pairs([("a", 1), ("b", 2)]);
    let next = update(&v, &patch::merge(Value::from_pairs([("b", 20), ("c", 30)]))).unwrap();
    assert_eq!(next, Value::from_pairs([("a", 1), ("b", 20), ("c", 30)]));
}

#[test]
fn apply_runs_the_function() {
    let double = LtFn::native("double", |args: &[Value]| {
        Ok(Value::Int(args[0].as_int().unwrap_or(0) * 2))
    });
    let v = Value::from_pairs([("n", 21)]);
    let next = update(&v, &patch::at("n", patch::apply(double))).unwrap();
    assert_eq!(next, Value::from_pairs([("n", 42)]));
}

#[test]
fn typed_update_rejects_invalid_results() {
    let nums = list(builtins::number(), None);
    let v = nums.construct(&ints(&[1])).unwrap();
    let err = nums.update(&v, &patch::push(["x"])).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation { .. }));
}

#[test]
fn container_mismatch() {
    let err = update(&ints(&[1]), &patch::merge(Value::from_pairs([("a", 1)]))).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Update { .. }));
    let err = update(&Value::from_pairs([("a", 1)]), &patch::swap(0, 1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Update { .. }));
}

#[test]
fn unknown_command() {
    let spec = Value::from_pairs([("$frobnicate", Value::Nil)]);
    let err = update(&Value::Nil, &spec).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Update { .. }));
}

#[test]
fn custom_commands() {
    register_command("$update_test_increment", |current: &Value, by: &Value| {
        let by = by.as_int().unwrap_or(1);
        Ok(Value::Int(current.as_int().unwrap_or(0) + by))
    })
    .unwrap();
    assert!(
        command_names()
            .iter()
            .any(|n| n == "$update_test_increment")
    );

    let v = Value::from_pairs([("count", 1)]);
    let spec = patch::at(
        "count",
        Value::from_pairs([("$update_test_increment", 4)]),
    );
    assert_eq!(update(&v, &spec).unwrap(), Value::from_pairs([("count", 5)]));
}
