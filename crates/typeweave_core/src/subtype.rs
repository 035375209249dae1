//! Refinement: an existing type narrowed by an extra predicate.

use std::sync::Arc;

use typeweave_foundation::{Result, Value};

use crate::meta::{Meta, Predicate};
use crate::ty::{Path, Type, reject};

/// Narrows `base` by `predicate`.
///
/// The base constructor runs first and its failures propagate; the
/// predicate then sees the base's output.
pub fn subtype<F>(base: Type, predicate: F, name: Option<&str>) -> Type
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Type::new(
        Meta::Subtype {
            base,
            predicate: Arc::new(predicate),
        },
        name,
    )
}

pub(crate) fn create(
    ty: &Type,
    base: &Type,
    predicate: &Predicate,
    value: &Value,
    path: &Path<'_>,
) -> Result<Value> {
    let inner = base.create(value, path)?;
    if predicate(&inner) {
        Ok(inner)
    } else {
        reject(ty, &inner, path)
    }
}
