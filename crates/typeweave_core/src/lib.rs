//! Type combinators, runtime validation, and immutable updates for typeweave.
//!
//! This crate provides:
//! - [`Type`] - A validating constructor, membership predicate, and [`Meta`] descriptor
//! - Combinators: [`irreducible`], [`subtype`], [`enums`], [`record`], [`tuple`],
//!   [`list`], [`dict`], [`union`], [`maybe`], [`func`]
//! - [`RecordType::extend`] - Conflict-checked structural extension with method lookup
//! - [`update()`] - The immutable update interpreter with a pluggable command table
//! - Utilities: [`get_type_name`], [`mixin`], [`assert`], the failure hook
//! - [`EngineConfig`] - Process-wide engine settings
//!
//! # Example
//!
//! ```
//! use typeweave_core::{builtins, record, update::patch};
//! use typeweave_foundation::Value;
//!
//! let point = record(
//!     [("x", builtins::number()), ("y", builtins::number())],
//!     Some("Point"),
//! )
//! .unwrap();
//! let p = point.construct(&Value::from_pairs([("x", 1), ("y", 2)])).unwrap();
//! assert!(point.is(&p));
//!
//! let moved = point.update(&p, &patch::at("x", patch::set(3))).unwrap();
//! assert_eq!(moved.as_record().unwrap().get("x"), Some(&Value::Int(3)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builtins;
pub mod config;
pub mod dict;
pub mod enums;
pub mod func;
pub mod irreducible;
pub mod list;
pub mod maybe;
pub mod meta;
pub mod record;
pub mod registry;
pub mod report;
pub mod subtype;
pub mod tuple;
pub mod ty;
pub mod union;
pub mod update;
pub mod util;

pub use config::{EngineConfig, config, configure};
pub use dict::dict;
pub use enums::{enums, enums_of};
pub use func::{FuncType, func};
pub use irreducible::irreducible;
pub use list::list;
pub use maybe::maybe;
pub use meta::{Field, Kind, Meta, Predicate};
pub use record::{Behavior, ExtendOptions, Method, Mixin, RecordType, record};
pub use registry::{freeze, is_frozen};
pub use report::{FailureHook, Recovery, reset_failure_hook, set_failure_hook};
pub use subtype::subtype;
pub use tuple::tuple;
pub use ty::Type;
pub use union::{Dispatch, UnionType, union};
pub use update::{Command, command_names, register_command, update};
pub use util::{assert, get_type_name, mixin};

pub use typeweave_foundation::{Error, ErrorKind, Result, Value};
