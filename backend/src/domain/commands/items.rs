//! Commands and results for item mutations.
//!
//! Amount fields are raw form strings on purpose: the parsing rules (empty
//! and non-numeric are invalid, not zero) are domain logic and live in the
//! stock service, not in the UI layer.

/// How a quantity was entered on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountEntry {
    /// A single direct amount.
    Direct(String),
    /// Packages × items-per-package.
    Packaged {
        packages: String,
        per_package: String,
    },
}

impl AmountEntry {
    /// Whether this entry came from the packaged form.
    pub fn is_packaged(&self) -> bool {
        matches!(self, AmountEntry::Packaged { .. })
    }
}

/// Direction of a stock adjustment in the modify flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModifyAction {
    /// Add stock.
    #[default]
    Increase,
    /// Take stock.
    Decrease,
}

/// Create a new item.
#[derive(Debug, Clone)]
pub struct AddItemCommand {
    /// Required, non-empty.
    pub item_name: String,
    pub item_type: String,
    pub amount: AmountEntry,
}

/// Adjust the quantity (and possibly the type) of an existing item.
#[derive(Debug, Clone)]
pub struct AdjustItemCommand {
    /// Id of the item to adjust.
    pub item_id: String,
    pub action: ModifyAction,
    pub amount: AmountEntry,
    /// Type to record on the item; may be unchanged.
    pub item_type: String,
}

/// Result of a wholesale collection replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceAllResult {
    /// Records accepted into the collection.
    pub accepted: usize,
    /// Records dropped by validation.
    pub dropped: usize,
}

impl ReplaceAllResult {
    /// True when some records were dropped but others were accepted.
    pub fn is_partial(&self) -> bool {
        self.dropped > 0 && self.accepted > 0
    }
}
