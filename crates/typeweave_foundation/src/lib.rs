//! Host value model, persistent collections, and errors for typeweave.
//!
//! This crate provides:
//! - [`Value`] - The dynamically-typed value every type validates
//! - [`Record`] and [`LtFn`] - Values that remember the type that built them
//! - [`TypeId`] - Process-unique type identities
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`LtVec`], [`LtMap`], [`LtOrdMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod id;
pub mod value;

pub use collections::{LtMap, LtOrdMap, LtVec};
pub use error::{Error, ErrorKind, SemanticLimit};
pub use id::TypeId;
pub use value::{Callable, LtFn, Record, Shape, Signature, Value};

/// Result type alias using typeweave's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
