//! Tagged unions with assignable dispatch.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use log::debug;
use typeweave_foundation::{Error, Result, Value};

use crate::meta::Meta;
use crate::report;
use crate::ty::{Path, Type};
use crate::util::get_type_name;

/// Picks the member type that constructs a value.
pub type Dispatch = Arc<dyn Fn(&Value) -> Option<Type> + Send + Sync>;

/// A union type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UnionType(pub(crate) Type);

/// Creates a union of `types`.
///
/// Until a dispatch function is assigned, construction uses the first
/// member whose `is` accepts the value.
pub fn union(types: impl IntoIterator<Item = Type>, name: Option<&str>) -> UnionType {
    UnionType(Type::new(
        Meta::Union {
            types: types.into_iter().collect(),
        },
        name,
    ))
}

fn first_match(types: &[Type], value: &Value) -> Option<Type> {
    types.iter().find(|t| t.is(value)).cloned()
}

impl UnionType {
    /// Returns the member types, in dispatch order.
    #[must_use]
    pub fn members(&self) -> &[Type] {
        match self.0.meta() {
            Meta::Union { types } => types,
            _ => &[],
        }
    }

    /// Returns the underlying type.
    #[must_use]
    pub fn as_type(&self) -> &Type {
        &self.0
    }

    /// Replaces the default dispatch.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyAssigned` if dispatch was already assigned or the
    /// union has already constructed a value.
    pub fn set_dispatch<F>(&self, dispatch: F) -> Result<()>
    where
        F: Fn(&Value) -> Option<Type> + Send + Sync + 'static,
    {
        self.0
            .0
            .dispatch
            .set(Arc::new(dispatch))
            .map_err(|_| report::raise(Error::already_assigned("dispatch", get_type_name(&self.0))))?;
        debug!("assigned dispatch to {}", self.0);
        Ok(())
    }

    /// Returns the member that would construct `value`, if any.
    ///
    /// Does not seal the dispatch slot.
    #[must_use]
    pub fn dispatch(&self, value: &Value) -> Option<Type> {
        match self.0.0.dispatch.get() {
            Some(dispatch) => dispatch(value),
            None => first_match(self.members(), value),
        }
    }
}

impl Deref for UnionType {
    type Target = Type;

    fn deref(&self) -> &Type {
        &self.0
    }
}

impl From<UnionType> for Type {
    fn from(union: UnionType) -> Self {
        union.0
    }
}

impl fmt::Debug for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

pub(crate) fn create(ty: &Type, types: &[Type], value: &Value, path: &Path<'_>) -> Result<Value> {
    let dispatch = ty.0.dispatch.get_or_init(|| {
        let members = types.to_vec();
        let dispatch: Dispatch = Arc::new(move |value: &Value| first_match(&members, value));
        dispatch
    });
    match dispatch(value) {
        Some(member) => member.create(value, path),
        // Existing member instances pass even when dispatch routes on raw input.
        None if types.iter().any(|t| t.is(value)) => Ok(value.clone()),
        None => report::fail(Error::dispatch(get_type_name(ty), value.clone())),
    }
}
