//! The update-command table.
//!
//! Maps command names (`$set`, `$push`, ...) to handlers. The table is
//! process-wide, seeded with the built-in commands, and extendable with
//! [`register_command`] until [`freeze`](crate::freeze) is called.

use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use typeweave_foundation::{Error, LtMap, LtVec, Result, Value};

use crate::registry::ensure_mutable;
use crate::report;

/// A command handler: receives the current value and the command argument
/// and returns the replacement value.
pub type Command = Arc<dyn Fn(&Value, &Value) -> Result<Value> + Send + Sync>;

static COMMANDS: Lazy<RwLock<HashMap<String, Command>>> =
    Lazy::new(|| RwLock::new(builtin_commands()));

fn builtin_commands() -> HashMap<String, Command> {
    let mut table: HashMap<String, Command> = HashMap::new();
    table.insert("$set".to_string(), Arc::new(set));
    table.insert("$apply".to_string(), Arc::new(apply));
    table.insert("$push".to_string(), Arc::new(push));
    table.insert("$unshift".to_string(), Arc::new(unshift));
    table.insert("$splice".to_string(), Arc::new(splice));
    table.insert("$swap".to_string(), Arc::new(swap));
    table.insert("$merge".to_string(), Arc::new(merge));
    table.insert("$remove".to_string(), Arc::new(remove));
    table
}

/// Registers `handler` under `name`, replacing any existing command.
///
/// # Errors
///
/// Fails with `Update` if `name` does not start with `$`, or with
/// `RegistryFrozen` after [`freeze`](crate::freeze).
pub fn register_command<F>(name: &str, handler: F) -> Result<()>
where
    F: Fn(&Value, &Value) -> Result<Value> + Send + Sync + 'static,
{
    ensure_mutable("update commands")?;
    if !name.starts_with('$') || name.len() < 2 {
        return Err(Error::update(format!(
            "command name {name:?} must start with '$'"
        )));
    }
    let replaced = COMMANDS
        .write()
        .insert(name.to_string(), Arc::new(handler))
        .is_some();
    if replaced {
        info!("replaced update command {name}");
    } else {
        info!("registered update command {name}");
    }
    Ok(())
}

/// Returns the registered command names, sorted.
#[must_use]
pub fn command_names() -> Vec<String> {
    let mut names: Vec<String> = COMMANDS.read().keys().cloned().collect();
    names.sort();
    names
}

pub(crate) fn lookup(name: &str) -> Option<Command> {
    COMMANDS.read().get(name).cloned()
}

fn mismatch(command: &str, expected: &str, actual: &Value) -> Error {
    report::raise(Error::update(format!(
        "{command} expects {expected}, got {}",
        actual.kind_name()
    )))
}

fn sequence<'a>(command: &str, value: &'a Value) -> Result<&'a LtVec<Value>> {
    value
        .as_vec()
        .ok_or_else(|| mismatch(command, "a sequence", value))
}

fn entries(command: &str, value: &Value) -> Result<LtMap<Value, Value>> {
    match value {
        Value::Nil => Ok(LtMap::new()),
        Value::Map(m) => Ok(m.clone()),
        Value::Record(r) => Ok(r.to_map()),
        other => Err(mismatch(command, "a key-value container", other)),
    }
}

fn index(command: &str, value: Option<&Value>) -> Result<usize> {
    value
        .and_then(Value::as_int)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| mismatch(command, "a non-negative index", value.unwrap_or(&Value::Nil)))
}

fn set(_: &Value, value: &Value) -> Result<Value> {
    Ok(value.clone())
}

fn apply(current: &Value, f: &Value) -> Result<Value> {
    let f = f.as_fn().ok_or_else(|| mismatch("$apply", "a function", f))?;
    f.call(std::slice::from_ref(current))
}

fn push(current: &Value, items: &Value) -> Result<Value> {
    let target = sequence("$push", current)?;
    let items = sequence("$push", items)?;
    Ok(Value::Vec(target.append_all(items.iter().cloned())))
}

fn unshift(current: &Value, items: &Value) -> Result<Value> {
    let target = sequence("$unshift", current)?;
    let items = sequence("$unshift", items)?;
    Ok(Value::Vec(target.prepend_all(items.iter().cloned())))
}

/// Applies `[start, deleteCount, items...]` operations in order.
///
/// A negative start counts from the end; a missing delete count removes
/// everything after start.
fn splice(current: &Value, ops: &Value) -> Result<Value> {
    let mut target = sequence("$splice", current)?.clone();
    for op in sequence("$splice", ops)? {
        let op = sequence("$splice", op)?;
        let len = i64::try_from(target.len()).unwrap_or(i64::MAX);
        let start = op
            .get(0)
            .and_then(Value::as_int)
            .ok_or_else(|| mismatch("$splice", "an integer start", op.get(0).unwrap_or(&Value::Nil)))?;
        let start = if start < 0 { (len + start).max(0) } else { start.min(len) };
        let delete = match op.get(1) {
            None => len - start,
            Some(Value::Int(n)) => (*n).max(0),
            Some(other) => return Err(mismatch("$splice", "an integer delete count", other)),
        };
        let start = usize::try_from(start).unwrap_or(0);
        let delete = usize::try_from(delete).unwrap_or(usize::MAX);
        target = target.splice(start, delete, op.iter().skip(2).cloned());
    }
    Ok(Value::Vec(target))
}

fn swap(current: &Value, arg: &Value) -> Result<Value> {
    let target = sequence("$swap", current)?;
    let arg = arg
        .as_map()
        .ok_or_else(|| mismatch("$swap", "{from, to}", arg))?;
    let from = index("$swap", arg.get(&Value::from("from")))?;
    let to = index("$swap", arg.get(&Value::from("to")))?;
    target.swap(from, to).map(Value::Vec).ok_or_else(|| {
        report::raise(Error::update(format!(
            "$swap indices {from} and {to} out of bounds for length {}",
            target.len()
        )))
    })
}

/// Rebuilds `current` from `fields`: a record goes back through its own
/// type, anything else becomes a plain map.
fn rebuild(current: &Value, fields: LtMap<Value, Value>) -> Result<Value> {
    match current {
        Value::Record(r) => r.shape().construct(&Value::Map(fields)),
        _ => Ok(Value::Map(fields)),
    }
}

fn merge(current: &Value, partial: &Value) -> Result<Value> {
    let target = entries("$merge", current)?;
    let partial = entries("$merge", partial)?;
    rebuild(current, target.merge(&partial))
}

fn remove(current: &Value, keys: &Value) -> Result<Value> {
    let target = entries("$remove", current)?;
    let keys = sequence("$remove", keys)?;
    rebuild(current, keys.iter().fold(target, |map, key| map.remove(key)))
}
