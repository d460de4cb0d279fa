//! # File-backed Key-Value Storage
//!
//! This module provides the file-based implementation of
//! [`crate::storage::KeyValueStorage`]. Each key becomes one JSON blob file
//! under the data directory.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── items.json           ← canonical item collection (JSON array)
//! ├── items_backup.json    ← periodic copy of items.json
//! └── language.json        ← persisted language code
//! ```
//!
//! ## Features
//!
//! - One file per key, named `{key}.json`
//! - Atomic writes via temp file + rename
//! - Missing files read back as `None`, never as an error

pub mod connection;
pub mod kv_repository;

pub use connection::KvConnection;
pub use kv_repository::KvRepository;
