//! Typeweave - Runtime structural types
//!
//! This crate re-exports all layers of the Typeweave system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: typeweave_core       — Combinators, validation, update interpreter
//! Layer 0: typeweave_foundation — Core types (Value, Record, TypeId, Error)
//! ```

pub use typeweave_core as engine;
pub use typeweave_foundation as foundation;
