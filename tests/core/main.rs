//! Integration tests for Layer 1: Core
//!
//! Tests for the combinators, record extension, union dispatch, and
//! checked functions.

mod combinators;
mod functions;
mod unions;
