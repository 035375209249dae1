//! Integration tests for the update interpreter
//!
//! Tests the built-in commands, record rebuilding, immutability, and
//! custom commands.

mod commands;
mod records;
