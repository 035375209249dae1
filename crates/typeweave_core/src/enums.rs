//! Enumerations: a closed set of atomic values.

use typeweave_foundation::{Error, Result, Value};

use crate::meta::Meta;
use crate::report;
use crate::ty::{Path, Type, reject};

/// Creates an enumeration from key/label pairs.
///
/// Keys are the accepted values; labels are kept for introspection only.
pub fn enums<K, L>(map: impl IntoIterator<Item = (K, L)>, name: Option<&str>) -> Type
where
    K: Into<Value>,
    L: Into<Value>,
{
    let mut entries: Vec<(Value, Value)> = Vec::new();
    for (key, label) in map {
        let key = key.into();
        let label = label.into();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = label,
            None => entries.push((key, label)),
        }
    }
    Type::new(Meta::Enums { map: entries }, name)
}

/// Creates an enumeration whose labels equal its keys.
///
/// `keys` is either a sequence of values or a whitespace-separated string.
///
/// # Errors
///
/// Fails with `Validation` if `keys` is neither a string nor a sequence.
pub fn enums_of(keys: impl Into<Value>, name: Option<&str>) -> Result<Type> {
    let keys: Vec<Value> = match keys.into() {
        Value::String(s) => s.split_whitespace().map(Value::from).collect(),
        Value::Vec(items) => items.iter().cloned().collect(),
        other => {
            return Err(report::raise(Error::validation(
                "Str | Arr",
                other,
                vec!["enums".to_string()],
            )));
        }
    };
    Ok(enums(keys.into_iter().map(|k| (k.clone(), k)), name))
}

pub(crate) fn contains(map: &[(Value, Value)], value: &Value) -> bool {
    map.iter().any(|(k, _)| k == value)
}

pub(crate) fn create(
    ty: &Type,
    map: &[(Value, Value)],
    value: &Value,
    path: &Path<'_>,
) -> Result<Value> {
    if contains(map, value) {
        Ok(value.clone())
    } else {
        reject(ty, value, path)
    }
}
