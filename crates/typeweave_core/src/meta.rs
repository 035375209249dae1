//! Meta descriptors: how each type was built.
//!
//! Every [`Type`] carries exactly one [`Meta`] for its whole lifetime. The
//! tag decides which operations are legal on the type and tells the update
//! interpreter and the name renderer how to look inside it.

use std::fmt;
use std::sync::Arc;

use typeweave_foundation::Value;

use crate::record::Mixin;
use crate::ty::Type;

/// A predicate over host values.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A named, typed record field.
#[derive(Clone, Debug)]
pub struct Field {
    /// Field name.
    pub name: Arc<str>,
    /// Field type.
    pub ty: Type,
}

impl Field {
    /// Creates a field.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Introspectable descriptor of a type.
#[derive(Clone)]
pub enum Meta {
    /// Leaf type defined only by a predicate.
    Irreducible {
        /// Membership test.
        predicate: Predicate,
    },
    /// An existing type narrowed by an extra predicate.
    Subtype {
        /// The refined type.
        base: Type,
        /// Extra membership test applied after `base`.
        predicate: Predicate,
    },
    /// Closed set of atomic values.
    Enums {
        /// Accepted keys with their labels, in declaration order.
        map: Vec<(Value, Value)>,
    },
    /// Fixed-shape record with named fields.
    Record {
        /// Declared fields, in declaration order.
        props: Vec<Field>,
        /// Sources this record was extended from, in extension order.
        path: Vec<Mixin>,
    },
    /// Fixed-arity sequence.
    Tuple {
        /// Positional element types.
        types: Vec<Type>,
    },
    /// Homogeneous sequence.
    List {
        /// Element type.
        item: Type,
    },
    /// Key-typed map.
    Dict {
        /// Key type.
        domain: Type,
        /// Value type.
        codomain: Type,
    },
    /// Closed choice among member types.
    Union {
        /// Member types, in dispatch order.
        types: Vec<Type>,
    },
    /// Absent or the wrapped type.
    Maybe {
        /// The wrapped type.
        inner: Type,
    },
    /// Checked function.
    Func {
        /// Parameter types, in order.
        domain: Vec<Type>,
        /// Return type.
        codomain: Type,
    },
}

/// The tag of a [`Meta`] descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// See [`Meta::Irreducible`].
    Irreducible,
    /// See [`Meta::Subtype`].
    Subtype,
    /// See [`Meta::Enums`].
    Enums,
    /// See [`Meta::Record`].
    Record,
    /// See [`Meta::Tuple`].
    Tuple,
    /// See [`Meta::List`].
    List,
    /// See [`Meta::Dict`].
    Dict,
    /// See [`Meta::Union`].
    Union,
    /// See [`Meta::Maybe`].
    Maybe,
    /// See [`Meta::Func`].
    Func,
}

impl Meta {
    /// Returns the descriptor's tag.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Irreducible { .. } => Kind::Irreducible,
            Self::Subtype { .. } => Kind::Subtype,
            Self::Enums { .. } => Kind::Enums,
            Self::Record { .. } => Kind::Record,
            Self::Tuple { .. } => Kind::Tuple,
            Self::List { .. } => Kind::List,
            Self::Dict { .. } => Kind::Dict,
            Self::Union { .. } => Kind::Union,
            Self::Maybe { .. } => Kind::Maybe,
            Self::Func { .. } => Kind::Func,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Irreducible => "irreducible",
            Self::Subtype => "subtype",
            Self::Enums => "enums",
            Self::Record => "struct",
            Self::Tuple => "tuple",
            Self::List => "list",
            Self::Dict => "dict",
            Self::Union => "union",
            Self::Maybe => "maybe",
            Self::Func => "func",
        };
        f.write_str(tag)
    }
}

impl fmt::Debug for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Irreducible { .. } => f.debug_struct("Irreducible").finish_non_exhaustive(),
            Self::Subtype { base, .. } => f
                .debug_struct("Subtype")
                .field("base", base)
                .finish_non_exhaustive(),
            Self::Enums { map } => f.debug_struct("Enums").field("map", map).finish(),
            Self::Record { props, path } => f
                .debug_struct("Record")
                .field("props", props)
                .field("path", &path.len())
                .finish(),
            Self::Tuple { types } => f.debug_struct("Tuple").field("types", types).finish(),
            Self::List { item } => f.debug_struct("List").field("item", item).finish(),
            Self::Dict { domain, codomain } => f
                .debug_struct("Dict")
                .field("domain", domain)
                .field("codomain", codomain)
                .finish(),
            Self::Union { types } => f.debug_struct("Union").field("types", types).finish(),
            Self::Maybe { inner } => f.debug_struct("Maybe").field("inner", inner).finish(),
            Self::Func { domain, codomain } => f
                .debug_struct("Func")
                .field("domain", domain)
                .field("codomain", codomain)
                .finish(),
        }
    }
}
