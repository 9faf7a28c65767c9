//! Storage layer
//!
//! SQLite (embedded) for the employee records.
//! DashMap (in-memory) for caching lookups.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryCache;
