//! Homogeneous sequences.

use typeweave_foundation::{LtVec, Result, Value};

use crate::meta::Meta;
use crate::ty::{Path, Segment, Type, reject};

/// Creates a list type whose elements all satisfy `item`.
pub fn list(item: Type, name: Option<&str>) -> Type {
    Type::new(Meta::List { item }, name)
}

pub(crate) fn is(item: &Type, value: &Value) -> bool {
    value
        .as_vec()
        .is_some_and(|items| items.iter().all(|x| item.is(x)))
}

pub(crate) fn create(ty: &Type, item: &Type, value: &Value, path: &Path<'_>) -> Result<Value> {
    if is(item, value) {
        return Ok(value.clone());
    }
    let Some(items) = value.as_vec() else {
        return reject(ty, value, path);
    };
    let items = items
        .iter()
        .enumerate()
        .map(|(i, x)| item.create(x, &path.child(Segment::Index(i))))
        .collect::<Result<LtVec<Value>>>()?;
    Ok(Value::Vec(items))
}
