//! Employee Types - Pure type definitions
//!
//! Plain data shared by the core library and the HTTP server, with no
//! async runtime or storage dependencies.

pub mod employee;

pub use employee::*;
