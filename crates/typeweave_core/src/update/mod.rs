//! The immutable update interpreter.
//!
//! An update spec is a map. Keys starting with `$` name commands looked up
//! in the process-wide [command table](commands); every other key addresses
//! a child of the current value (a record field, a map key, or a sequence
//! index) and holds a nested spec for it.
//!
//! Children are rebuilt first, then commands run in name order. Untouched
//! siblings are shared with the input; the input itself is never modified.
//! Whenever a record is rebuilt from its own fields (a child key, `$merge`,
//! `$remove`), the record type that built it validates the result again.
//! Commands that replace the value outright (`$set`, `$apply`) pass their
//! result through; the enclosing record, or [`Type::update`](crate::Type::update)
//! at the root, checks it against the declared type.

pub mod commands;
pub mod patch;

use typeweave_foundation::{Error, Result, SemanticLimit, Value};

use crate::config::config;
use crate::report;

pub use commands::{Command, command_names, register_command};

/// Applies `spec` to `instance`, returning the new value.
///
/// Failures of the walk itself (`Update`, `LimitExceeded`) go through the
/// failure hook but always raise: no fallback value can stand in for a
/// malformed spec. Validation failures from re-validating a rebuilt record
/// follow the record constructor and honour fallbacks.
///
/// # Errors
///
/// Fails with `Update` for a malformed spec, an unknown command, or a
/// command applied to the wrong kind of container; with `LimitExceeded` if
/// the spec nests deeper than the configured limit; or with whatever a
/// rebuilt record's type reports.
pub fn update(instance: &Value, spec: &Value) -> Result<Value> {
    let limit = config().max_update_depth;
    walk(instance, spec, 0, limit)
}

fn walk(current: &Value, spec: &Value, depth: usize, limit: usize) -> Result<Value> {
    if depth >= limit {
        return Err(report::raise(Error::limit_exceeded(
            SemanticLimit::MaxUpdateDepth { limit },
        )));
    }
    let Some(entries) = spec.as_map() else {
        return Err(report::raise(Error::update(format!(
            "spec must be a map, got {}",
            spec.kind_name()
        ))));
    };

    let mut ops: Vec<(&str, &Value)> = Vec::new();
    let mut children: Vec<(&Value, &Value)> = Vec::new();
    for (key, nested) in entries.iter() {
        match key.as_str() {
            Some(name) if name.starts_with('$') => ops.push((name, nested)),
            _ => children.push((key, nested)),
        }
    }
    ops.sort_by(|a, b| a.0.cmp(b.0));

    let mut next = current.clone();
    for (key, nested) in children {
        let child = child_of(&next, key)?;
        let rebuilt = walk(&child, nested, depth + 1, limit)?;
        next = with_child(&next, key, rebuilt)?;
    }
    for (name, arg) in ops {
        let handler = commands::lookup(name)
            .ok_or_else(|| report::raise(Error::update(format!("unknown command {name}"))))?;
        next = handler(&next, arg)?;
    }
    Ok(next)
}

fn position(key: &Value) -> Option<usize> {
    match key {
        Value::Int(n) => usize::try_from(*n).ok(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn child_of(current: &Value, key: &Value) -> Result<Value> {
    let found = match current {
        Value::Record(record) => key.as_str().and_then(|name| record.get(name)).cloned(),
        Value::Map(map) => Some(map.get(key).cloned().unwrap_or(Value::Nil)),
        Value::Vec(items) => position(key).and_then(|i| items.get(i)).cloned(),
        _ => None,
    };
    found.ok_or_else(|| {
        report::raise(Error::update(format!(
            "cannot address {key} in {}",
            current.kind_name()
        )))
    })
}

fn with_child(current: &Value, key: &Value, child: Value) -> Result<Value> {
    let rebuilt = match current {
        Value::Record(record) => {
            let fields = Value::Map(record.to_map().insert(key.clone(), child));
            return record.shape().construct(&fields);
        }
        Value::Map(map) => Some(Value::Map(map.insert(key.clone(), child))),
        Value::Vec(items) => position(key)
            .and_then(|i| items.update(i, child))
            .map(Value::Vec),
        _ => None,
    };
    rebuilt.ok_or_else(|| {
        report::raise(Error::update(format!(
            "cannot replace {key} in {}",
            current.kind_name()
        )))
    })
}
