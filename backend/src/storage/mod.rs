//! # Storage Module
//!
//! Persistence layer for the store system. The domain layer only ever talks
//! to the [`traits::KeyValueStorage`] abstraction; the concrete backend here
//! is a directory of JSON blob files.

pub mod kv;
pub mod traits;

pub use kv::{KvConnection, KvRepository};
pub use traits::KeyValueStorage;
