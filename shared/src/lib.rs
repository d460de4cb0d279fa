use serde::{Deserialize, Serialize};
use std::fmt;

/// Application name stamped into the export envelope.
pub const APP_NAME: &str = "Store System";

/// Version string written to the export envelope.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Canonical item types offered by the UI. The core treats `item_type` as an
/// opaque string; this list exists for the type dropdown and the type filter.
pub const ITEM_TYPES: [&str; 5] = ["FA & HN", "UI", "Training", "Game", "Others"];

/// A tracked inventory item.
///
/// This is the wire shape: it is persisted verbatim under the `items` key and
/// carried unchanged through export/import, so the field names stay camelCase
/// on the JSON side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique key, assigned once at creation. Zero-padded 4-digit decimal by
    /// convention but treated as opaque.
    pub item_id: String,
    /// Display name; required, non-empty.
    pub item_name: String,
    /// Current quantity on hand; never negative.
    pub number_of_items: i64,
    /// One of [`ITEM_TYPES`] in practice; not re-validated by the core.
    #[serde(default = "default_item_type")]
    pub item_type: String,
    /// "yes" when the quantity was originally entered as packages ×
    /// items-per-package. Informational after creation.
    #[serde(default = "default_is_package")]
    pub is_package: String,
    /// Package count at creation time; only present for packaged entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_packages: Option<i64>,
    /// Items per package at creation time; only present for packaged entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_package: Option<i64>,
}

fn default_item_type() -> String {
    "Others".to_string()
}

fn default_is_package() -> String {
    "no".to_string()
}

impl Item {
    /// Whether this item was entered as a package at creation time.
    pub fn is_packaged(&self) -> bool {
        self.is_package == "yes"
    }

    /// Whether any stock is on hand.
    pub fn in_stock(&self) -> bool {
        self.number_of_items > 0
    }
}

/// UI language for labels and messages. Persisted under the `language` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// English
    En,
    /// Traditional Chinese (Hong Kong)
    ZhHk,
    /// Simplified Chinese
    ZhCn,
}

impl Language {
    /// The persisted language code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::ZhHk => "zh-HK",
            Language::ZhCn => "zh-CN",
        }
    }

    /// Parse a persisted language code. Unknown codes yield `None`; the
    /// language service resets those to the default.
    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en" => Some(Language::En),
            "zh-HK" => Some(Language::ZhHk),
            "zh-CN" => Some(Language::ZhCn),
            _ => None,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Stock-status filter for the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StockFilter {
    /// Every item matches.
    #[default]
    All,
    /// Quantity on hand is greater than zero.
    InStock,
    /// Quantity on hand is zero (or below, defensively).
    OutOfStock,
}

/// Type filter for the item list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypeFilter {
    /// Every item matches.
    #[default]
    All,
    /// Only items whose `item_type` equals this value exactly.
    Only(String),
}

/// Ephemeral filter state for the visible item list. Not persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Case-insensitive substring matched against item name or id.
    pub search: String,
    pub item_type: TypeFilter,
    pub stock: StockFilter,
}

/// Versioned wrapper written on export and accepted on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub items: Vec<Item>,
    /// RFC 3339 timestamp of the export.
    pub exported_at: String,
    pub version: String,
    pub app: String,
}

impl ExportEnvelope {
    /// Parse the `exportedAt` stamp, if it is a well-formed RFC 3339
    /// timestamp. Imports never require it, so this is best-effort.
    pub fn exported_at(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        chrono::DateTime::parse_from_rfc3339(&self.exported_at).ok()
    }
}

/// Result of a successful export: the serialized envelope plus a suggested
/// filename. Writing the file and sharing it are UI concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub json_content: String,
    pub filename: String,
    pub item_count: usize,
}

/// Result of an import. `dropped > 0` is a degraded success, not a failure;
/// the UI surfaces it as a partial-import warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Records accepted into the collection.
    pub imported: usize,
    /// Records rejected by validation or displaced by a duplicate id.
    pub dropped: usize,
}
