//! # Store System Backend
//!
//! Core of the store system inventory tracker. This crate owns the item
//! collection, its derived views, quantity transactions, selection for bulk
//! delete, import/export, and persistence — everything except rendering.
//! A frontend drives it through the [`Backend`] struct and the per-session
//! [`domain::SelectionService`].

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use storage::{KvConnection, KvRepository};

/// Main backend struct that orchestrates all services.
pub struct Backend {
    pub item_service: domain::ItemService,
    pub stock_service: domain::StockService,
    pub export_service: domain::ExportService,
    pub language_service: domain::LanguageService,
}

impl Backend {
    /// Create a backend over the given data directory and load the persisted
    /// collection. A corrupted collection blob loads as empty (and is
    /// repaired on disk); only an outright storage failure errors here.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let connection = KvConnection::new(data_dir)?;
        let kv: Arc<dyn storage::KeyValueStorage> = Arc::new(KvRepository::new(connection));

        let item_service = domain::ItemService::new(Arc::clone(&kv));
        item_service.load()?;

        let stock_service = domain::StockService::new(item_service.clone());
        let export_service = domain::ExportService::new();
        let language_service = domain::LanguageService::new(kv);

        Ok(Backend {
            item_service,
            stock_service,
            export_service,
            language_service,
        })
    }

    /// Spawn the periodic backup loop on the current tokio runtime. Abort
    /// the returned handle to stop it.
    pub fn start_backup_task(&self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.item_service.clone().run_backup_task())
    }
}
