//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod ports;
pub mod sqlite;
