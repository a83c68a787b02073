//! Deterministic, pure logic of the trim walk.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! object graphs and return deterministic outputs suitable for tests.

pub mod adapters;
pub mod documents;
pub mod kind;
pub mod mutator;
pub mod node;
pub mod record;
pub mod visited;
