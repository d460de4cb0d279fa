//! Import/export codec for the item collection.
//!
//! Export wraps the full collection in a versioned envelope; import accepts
//! that envelope or a bare item array, validates every record, and replaces
//! the collection wholesale. The UI owns the actual file writing, sharing,
//! and document picking — this service only produces and consumes the JSON.

use chrono::Utc;
use log::{info, warn};
use serde_json::Value;
use std::collections::HashMap;

use shared::{ExportDataResponse, ExportEnvelope, ImportResult, Item, APP_NAME, EXPORT_FORMAT_VERSION};

use crate::domain::errors::DomainError;
use crate::domain::item_service::ItemService;

/// Handles serialization to and from the export envelope.
#[derive(Clone, Default)]
pub struct ExportService {}

impl ExportService {
    pub fn new() -> Self {
        Self {}
    }

    /// Serialize the current collection into the export envelope.
    ///
    /// An empty collection is reported as [`DomainError::NothingToExport`]
    /// rather than producing an empty file.
    pub fn export_items(&self, item_service: &ItemService) -> Result<ExportDataResponse, DomainError> {
        let items = item_service.items();
        if items.is_empty() {
            return Err(DomainError::NothingToExport);
        }

        let now = Utc::now();
        let item_count = items.len();
        let envelope = ExportEnvelope {
            items,
            exported_at: now.to_rfc3339(),
            version: EXPORT_FORMAT_VERSION.to_string(),
            app: APP_NAME.to_string(),
        };

        let json_content =
            serde_json::to_string(&envelope).expect("envelope serialization cannot fail");
        let filename = format!("store-system-backup-{}.json", now.format("%Y-%m-%d"));

        info!(
            "📄 EXPORT: exported {} items ({} bytes) as {}",
            item_count,
            json_content.len(),
            filename
        );

        Ok(ExportDataResponse {
            json_content,
            filename,
            item_count,
        })
    }

    /// Parse an import payload and replace the collection with its valid
    /// records.
    ///
    /// Accepts the envelope shape or a bare array; anything else is a
    /// [`DomainError::Format`]. Records missing a non-empty `itemId`, a
    /// non-empty `itemName`, or a non-negative integer `numberOfItems` are
    /// dropped and
    /// counted, as are records displaced by a later duplicate id
    /// (last-write-wins). If nothing valid remains the existing collection
    /// is left untouched.
    pub fn import_items(
        &self,
        item_service: &ItemService,
        json: &str,
    ) -> Result<ImportResult, DomainError> {
        // Step 1: parse the payload at all
        let parsed: Value = serde_json::from_str(json).map_err(|_| DomainError::Format)?;

        // Step 2: locate the candidate records
        let candidates = match &parsed {
            Value::Object(map) => match map.get("items") {
                Some(Value::Array(records)) => records.clone(),
                _ => return Err(DomainError::Format),
            },
            Value::Array(records) => records.clone(),
            _ => return Err(DomainError::Format),
        };
        let total = candidates.len();

        // Step 3: validate each record individually
        let mut dropped = 0usize;
        let mut valid: Vec<Item> = Vec::with_capacity(total);
        let mut position_by_id: HashMap<String, usize> = HashMap::new();

        for record in candidates {
            if !is_valid_record(&record) {
                dropped += 1;
                continue;
            }
            let item: Item = match serde_json::from_value(record) {
                Ok(item) => item,
                Err(_) => {
                    dropped += 1;
                    continue;
                }
            };

            // Duplicate ids resolve last-write-wins: the later record takes
            // the earlier one's slot and the earlier one counts as dropped.
            match position_by_id.get(&item.item_id).copied() {
                Some(position) => {
                    valid[position] = item;
                    dropped += 1;
                }
                None => {
                    position_by_id.insert(item.item_id.clone(), valid.len());
                    valid.push(item);
                }
            }
        }

        if valid.is_empty() {
            warn!("📥 IMPORT: no valid records among {}", total);
            return Err(DomainError::NoValidItems);
        }

        // Step 4: replace the collection and persist immediately
        let replaced = item_service.replace_all(valid);
        let imported = replaced.accepted;
        dropped += replaced.dropped;

        if dropped > 0 {
            warn!(
                "📥 IMPORT: imported {} of {} records ({} dropped)",
                imported, total, dropped
            );
        } else {
            info!("📥 IMPORT: imported {} records", imported);
        }

        Ok(ImportResult { imported, dropped })
    }
}

/// The acceptance bar for one import record: non-empty `itemId`, non-empty
/// `itemName`, and a non-negative integer `numberOfItems`. Stock quantities
/// are never negative anywhere else in the system, so a negative quantity is
/// rejected here rather than let an import seed one.
fn is_valid_record(record: &Value) -> bool {
    let has_id = record
        .get("itemId")
        .and_then(Value::as_str)
        .is_some_and(|id| !id.trim().is_empty());
    let has_name = record
        .get("itemName")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    let has_quantity = record
        .get("numberOfItems")
        .and_then(Value::as_i64)
        .is_some_and(|quantity| quantity >= 0);
    has_id && has_name && has_quantity
}
