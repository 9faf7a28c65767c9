//! HTTP handlers

pub mod employees;
pub mod error;
pub mod health;

pub use health::health;
