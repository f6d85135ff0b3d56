//! CLI command implementations.

pub mod common;
pub mod nodes;
pub mod racks;
pub mod version;
