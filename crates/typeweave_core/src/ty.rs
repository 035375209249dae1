//! The uniform type representation.
//!
//! A [`Type`] is a validating constructor plus a membership predicate plus a
//! [`Meta`] descriptor. Types are cheap to clone (one `Arc`) and immutable
//! once built, apart from two write-once slots: a union's dispatch function
//! and a record's attached behavior. Both seal on first construction.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use log::debug;
use once_cell::sync::OnceCell;
use typeweave_foundation::{Error, Result, Shape, TypeId, Value};

use crate::meta::{Kind, Meta};
use crate::record::{Behavior, RecordType};
use crate::report;
use crate::union::{Dispatch, UnionType};
use crate::util::get_type_name;
use crate::{dict, enums, func, irreducible, list, maybe, record, subtype, tuple, union};

/// A runtime type: validating constructor, predicate, and descriptor.
///
/// Equality and hashing use the type's identity, never its structure: two
/// types built from identical descriptors are different types.
#[derive(Clone)]
pub struct Type(pub(crate) Arc<TypeInner>);

pub(crate) struct TypeInner {
    id: TypeId,
    name: Option<Arc<str>>,
    meta: Meta,
    me: Weak<TypeInner>,
    pub(crate) dispatch: OnceCell<Dispatch>,
    pub(crate) behavior: OnceCell<Behavior>,
}

impl Type {
    pub(crate) fn new(meta: Meta, name: Option<&str>) -> Self {
        let ty = Self(Arc::new_cyclic(|me| TypeInner {
            id: TypeId::fresh(),
            name: name.map(Arc::from),
            meta,
            me: me.clone(),
            dispatch: OnceCell::new(),
            behavior: OnceCell::new(),
        }));
        debug!("created {} type {} ({})", ty.kind(), ty, ty.id());
        ty
    }

    /// Returns the type's identity.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.0.id
    }

    /// Returns the declared name, if one was given.
    ///
    /// See [`get_type_name`] for the name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Returns the descriptor.
    #[must_use]
    pub fn meta(&self) -> &Meta {
        &self.0.meta
    }

    /// Returns the descriptor's tag.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.0.meta.kind()
    }

    /// Tests membership. Never fails.
    #[must_use]
    pub fn is(&self, value: &Value) -> bool {
        match &self.0.meta {
            Meta::Irreducible { predicate } => predicate(value),
            Meta::Subtype { base, predicate } => base.is(value) && predicate(value),
            Meta::Enums { map } => enums::contains(map, value),
            Meta::Record { .. } => record::is(self, value),
            Meta::Tuple { types } => tuple::is(types, value),
            Meta::List { item } => list::is(item, value),
            Meta::Dict { domain, codomain } => dict::is(domain, codomain, value),
            Meta::Union { types } => types.iter().any(|t| t.is(value)),
            Meta::Maybe { inner } => value.is_nil() || inner.is(value),
            Meta::Func { domain, codomain } => func::is(domain, codomain, value),
        }
    }

    /// Validates `value`, hydrating nested plain values into instances.
    ///
    /// Passing an existing instance back in returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first validation, arity or dispatch failure found, after
    /// it has been routed through the failure hook.
    pub fn construct(&self, value: &Value) -> Result<Value> {
        self.create(value, &Path::root(self))
    }

    pub(crate) fn create(&self, value: &Value, path: &Path<'_>) -> Result<Value> {
        match &self.0.meta {
            Meta::Irreducible { predicate } => irreducible::create(self, predicate, value, path),
            Meta::Subtype { base, predicate } => {
                subtype::create(self, base, predicate, value, path)
            }
            Meta::Enums { map } => enums::create(self, map, value, path),
            Meta::Record { props, .. } => record::create(self, props, value, path),
            Meta::Tuple { types } => tuple::create(self, types, value, path),
            Meta::List { item } => list::create(self, item, value, path),
            Meta::Dict { domain, codomain } => dict::create(self, domain, codomain, value, path),
            Meta::Union { types } => union::create(self, types, value, path),
            Meta::Maybe { inner } => maybe::create(inner, value, path),
            Meta::Func { domain, codomain } => func::create(self, domain, codomain, value, path),
        }
    }

    /// Applies an update spec to `instance` and validates the result
    /// against this type.
    ///
    /// # Errors
    ///
    /// Fails if the spec is malformed, names an unknown command, or produces
    /// a value this type rejects.
    pub fn update(&self, instance: &Value, spec: &Value) -> Result<Value> {
        let next = crate::update::update(instance, spec)?;
        self.construct(&next)
    }

    /// Views this type as a record type.
    #[must_use]
    pub fn as_record(&self) -> Option<RecordType> {
        matches!(self.kind(), Kind::Record).then(|| RecordType(self.clone()))
    }

    /// Views this type as a union type.
    #[must_use]
    pub fn as_union(&self) -> Option<UnionType> {
        matches!(self.kind(), Kind::Union).then(|| UnionType(self.clone()))
    }

    /// Views this type as a function type.
    #[must_use]
    pub fn as_func(&self) -> Option<func::FuncType> {
        matches!(self.kind(), Kind::Func).then(|| func::FuncType(self.clone()))
    }

    pub(crate) fn shape(&self) -> Arc<dyn Shape> {
        self.0.clone()
    }
}

impl Shape for TypeInner {
    fn id(&self) -> TypeId {
        self.id
    }

    fn name(&self) -> String {
        match self.me.upgrade() {
            Some(inner) => get_type_name(&Type(inner)),
            None => self.name.as_deref().unwrap_or("struct").to_string(),
        }
    }

    fn construct(&self, value: &Value) -> Result<Value> {
        let ty = self
            .me
            .upgrade()
            .map(Type)
            .ok_or_else(|| Error::internal("type dropped while constructing"))?;
        ty.construct(value)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", self.kind(), get_type_name(self))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&get_type_name(self))
    }
}

// =============================================================================
// Paths
// =============================================================================

/// One step from a constructor down to a nested value.
#[derive(Clone, Copy)]
pub(crate) enum Segment<'a> {
    Type(&'a Type),
    Field(&'a str),
    Index(usize),
    Key(&'a Value),
    Label(&'static str),
}

/// Borrowed path used to locate failures without allocating on success.
pub(crate) struct Path<'a> {
    parent: Option<&'a Path<'a>>,
    segment: Segment<'a>,
}

impl<'a> Path<'a> {
    pub(crate) fn root(ty: &'a Type) -> Self {
        Self {
            parent: None,
            segment: Segment::Type(ty),
        }
    }

    pub(crate) fn child<'b>(&'b self, segment: Segment<'b>) -> Path<'b> {
        Path {
            parent: Some(self),
            segment,
        }
    }

    /// Renders the segments, outermost first.
    pub(crate) fn to_vec(&self) -> Vec<String> {
        let mut segments = Vec::new();
        let mut cursor = Some(self);
        while let Some(path) = cursor {
            segments.push(match path.segment {
                Segment::Type(ty) => get_type_name(ty),
                Segment::Field(name) => name.to_string(),
                Segment::Index(i) => i.to_string(),
                Segment::Key(key) => key.to_string(),
                Segment::Label(label) => label.to_string(),
            });
            cursor = path.parent;
        }
        segments.reverse();
        segments
    }
}

/// Reports that `ty` rejected `value` at `path`.
pub(crate) fn reject(ty: &Type, value: &Value, path: &Path<'_>) -> Result<Value> {
    report::fail(Error::validation(
        get_type_name(ty),
        value.clone(),
        path.to_vec(),
    ))
}
