//! Todo collection persistence.
//!
//! This crate provides a storage abstraction for a single named collection
//! of todo items, persisted as one JSON record under a string key. It
//! supports a file-per-key backend for durability and an in-memory backend
//! for tests.

mod backend;
mod error;
mod file;
mod item;
mod memory;
mod store;

pub use backend::*;
pub use error::*;
pub use file::*;
pub use item::*;
pub use memory::*;
pub use store::*;
