//! Builders for update specs.
//!
//! ```
//! use typeweave_core::update::patch;
//! use typeweave_core::update;
//! use typeweave_foundation::Value;
//!
//! let spec = patch::at("count", patch::set(2));
//! let next = update(&Value::from_pairs([("count", 1)]), &spec).unwrap();
//! assert_eq!(next, Value::from_pairs([("count", 2)]));
//! ```

use typeweave_foundation::{LtFn, Value};

fn command(name: &str, arg: Value) -> Value {
    Value::from_pairs([(name, arg)])
}

/// `{key: spec}`: applies `spec` to one child.
pub fn at(key: impl Into<Value>, spec: Value) -> Value {
    Value::from_pairs([(key.into(), spec)])
}

/// `{$set: value}`.
pub fn set(value: impl Into<Value>) -> Value {
    command("$set", value.into())
}

/// `{$apply: f}`.
#[must_use]
pub fn apply(f: LtFn) -> Value {
    command("$apply", Value::Fn(f))
}

/// `{$push: items}`.
pub fn push<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Value {
    command("$push", sequence(items))
}

/// `{$unshift: items}`.
pub fn unshift<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Value {
    command("$unshift", sequence(items))
}

/// `{$splice: [[start, delete_count, items...]]}` with a single operation.
pub fn splice<T: Into<Value>>(
    start: i64,
    delete_count: i64,
    items: impl IntoIterator<Item = T>,
) -> Value {
    let op = [Value::Int(start), Value::Int(delete_count)]
        .into_iter()
        .chain(items.into_iter().map(Into::into))
        .collect::<Vec<Value>>();
    command("$splice", Value::from(vec![Value::from(op)]))
}

/// `{$swap: {from, to}}`.
#[must_use]
pub fn swap(from: i64, to: i64) -> Value {
    command("$swap", Value::from_pairs([("from", from), ("to", to)]))
}

/// `{$merge: partial}`.
#[must_use]
pub fn merge(partial: Value) -> Value {
    command("$merge", partial)
}

/// `{$remove: keys}`.
pub fn remove<T: Into<Value>>(keys: impl IntoIterator<Item = T>) -> Value {
    command("$remove", sequence(keys))
}

fn sequence<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Value {
    Value::Vec(items.into_iter().map(Into::into).collect())
}
