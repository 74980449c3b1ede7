//! Shared leaf crate for the Inkstone data layer.
//!
//! Zero internal dependencies so both the repository layer and any future
//! CLI or worker tooling can use it.

pub mod config;
pub mod error;
pub mod limits;
pub mod order;
pub mod pagination;
pub mod quota;
pub mod text;
pub mod types;
