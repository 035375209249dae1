//! Fixed-arity sequences.

use typeweave_foundation::{Error, LtVec, Result, Value};

use crate::meta::Meta;
use crate::report;
use crate::ty::{Path, Segment, Type, reject};
use crate::util::get_type_name;

/// Creates a tuple type with one element type per position.
pub fn tuple(types: impl IntoIterator<Item = Type>, name: Option<&str>) -> Type {
    Type::new(
        Meta::Tuple {
            types: types.into_iter().collect(),
        },
        name,
    )
}

pub(crate) fn is(types: &[Type], value: &Value) -> bool {
    value.as_vec().is_some_and(|items| {
        items.len() == types.len() && items.iter().zip(types).all(|(item, ty)| ty.is(item))
    })
}

pub(crate) fn create(ty: &Type, types: &[Type], value: &Value, path: &Path<'_>) -> Result<Value> {
    if is(types, value) {
        return Ok(value.clone());
    }
    let Some(items) = value.as_vec() else {
        return reject(ty, value, path);
    };
    if items.len() != types.len() {
        return report::fail(Error::arity(get_type_name(ty), types.len(), items.len()));
    }
    let items = items
        .iter()
        .zip(types)
        .enumerate()
        .map(|(i, (item, ty))| ty.create(item, &path.child(Segment::Index(i))))
        .collect::<Result<LtVec<Value>>>()?;
    Ok(Value::Vec(items))
}
