//! Key-typed maps.

use typeweave_foundation::{LtMap, Result, Value};

use crate::meta::Meta;
use crate::ty::{Path, Segment, Type, reject};

/// Creates a map type whose keys satisfy `domain` and values `codomain`.
pub fn dict(domain: Type, codomain: Type, name: Option<&str>) -> Type {
    Type::new(Meta::Dict { domain, codomain }, name)
}

pub(crate) fn is(domain: &Type, codomain: &Type, value: &Value) -> bool {
    value
        .as_map()
        .is_some_and(|map| map.iter().all(|(k, v)| domain.is(k) && codomain.is(v)))
}

pub(crate) fn create(
    ty: &Type,
    domain: &Type,
    codomain: &Type,
    value: &Value,
    path: &Path<'_>,
) -> Result<Value> {
    if is(domain, codomain, value) {
        return Ok(value.clone());
    }
    let Some(map) = value.as_map() else {
        return reject(ty, value, path);
    };
    let mut out = LtMap::new();
    for (k, v) in map.iter() {
        let at = path.child(Segment::Key(k));
        let key = domain.create(k, &at)?;
        let value = codomain.create(v, &at)?;
        out = out.insert(key, value);
    }
    Ok(Value::Map(out))
}
