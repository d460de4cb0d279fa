//! # Domain Layer
//!
//! Business logic of the store system: the canonical item collection and
//! every operation over it. All services are storage-agnostic and talk to
//! persistence only through [`crate::storage::KeyValueStorage`].

pub mod commands;
pub mod errors;
pub mod export_service;
pub mod id_allocator;
pub mod item_service;
pub mod language_service;
pub mod query_service;
pub mod selection_service;
pub mod stock_service;

pub use errors::DomainError;
pub use export_service::ExportService;
pub use item_service::ItemService;
pub use language_service::LanguageService;
pub use selection_service::SelectionService;
pub use stock_service::StockService;
