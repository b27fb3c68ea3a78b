//! Integration test utilities for the blog server
//!
//! Provides a `TestApp` backed by an in-memory SQLite store and a temporary
//! upload directory, plus helpers for registering users and seeding content.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
