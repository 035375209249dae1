//! Optional types: `nil` or the wrapped type.

use typeweave_foundation::{Result, Value};

use crate::meta::Meta;
use crate::ty::{Path, Type};

/// Accepts `nil` or anything `inner` accepts.
pub fn maybe(inner: Type, name: Option<&str>) -> Type {
    Type::new(Meta::Maybe { inner }, name)
}

pub(crate) fn create(inner: &Type, value: &Value, path: &Path<'_>) -> Result<Value> {
    if value.is_nil() {
        return Ok(Value::Nil);
    }
    inner.create(value, path)
}
