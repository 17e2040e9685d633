//! SQL query implementations.

pub mod directory;
