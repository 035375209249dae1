//! Irreducible types: leaves defined only by a predicate.

use std::sync::Arc;

use typeweave_foundation::{Result, Value};

use crate::meta::{Meta, Predicate};
use crate::ty::{Path, Type, reject};

/// Creates a leaf type whose constructor checks `predicate`.
///
/// Construction never transforms the value: on success the input is
/// returned unchanged.
pub fn irreducible<F>(name: &str, predicate: F) -> Type
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Type::new(
        Meta::Irreducible {
            predicate: Arc::new(predicate),
        },
        Some(name),
    )
}

pub(crate) fn create(
    ty: &Type,
    predicate: &Predicate,
    value: &Value,
    path: &Path<'_>,
) -> Result<Value> {
    if predicate(value) {
        Ok(value.clone())
    } else {
        reject(ty, value, path)
    }
}
