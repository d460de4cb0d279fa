//! Multi-select state for bulk delete.
//!
//! Selection is keyed by item id and lives only for the session; it is never
//! persisted. The confirmation dialog before a bulk delete is a UI concern —
//! callers invoke [`SelectionService::delete_selected`] only after the user
//! confirms.

use log::info;
use std::collections::HashSet;

use crate::domain::item_service::ItemService;

/// Tracks the selected item ids and whether select mode is active.
#[derive(Debug, Clone, Default)]
pub struct SelectionService {
    selected: HashSet<String>,
    select_mode: bool,
}

impl SelectionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_select_mode(&self) -> bool {
        self.select_mode
    }

    pub fn is_selected(&self, item_id: &str) -> bool {
        self.selected.contains(item_id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Enter select mode via long-press, selecting the pressed item.
    pub fn begin_with(&mut self, item_id: &str) {
        self.select_mode = true;
        self.toggle(item_id);
    }

    /// Toggle one id in and out of the selection. When the selection becomes
    /// empty, select mode exits automatically.
    pub fn toggle(&mut self, item_id: &str) {
        if !self.selected.remove(item_id) {
            self.selected.insert(item_id.to_string());
        }
        if self.selected.is_empty() {
            self.select_mode = false;
        }
    }

    /// Toggle-all semantics over the currently visible ids: if the selection
    /// already equals the visible set exactly, clear it (exiting select
    /// mode); otherwise select exactly the visible set.
    pub fn select_all(&mut self, visible_ids: &[String]) {
        let visible: HashSet<String> = visible_ids.iter().cloned().collect();
        if !visible.is_empty() && self.selected == visible {
            self.selected.clear();
        } else {
            self.selected = visible;
        }
        if self.selected.is_empty() {
            self.select_mode = false;
        }
    }

    /// Leave select mode, discarding the selection.
    pub fn exit(&mut self) {
        self.selected.clear();
        self.select_mode = false;
    }

    /// Delete every selected item from the collection in one atomic
    /// mutation, then clear the selection and exit select mode. Selected ids
    /// that are no longer in the collection are simply skipped. Returns the
    /// number of items actually removed.
    pub fn delete_selected(&mut self, item_service: &ItemService) -> usize {
        if self.selected.is_empty() {
            return 0;
        }

        let selected = std::mem::take(&mut self.selected);
        let removed = item_service.mutate(|items| {
            let before = items.len();
            items.retain(|item| !selected.contains(&item.item_id));
            before - items.len()
        });
        self.select_mode = false;

        info!("🗑️ SELECT: deleted {} selected items", removed);
        removed
    }
}
