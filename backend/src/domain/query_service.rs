//! Derived views over the item collection.
//!
//! The visible list is recomputed from scratch on every refresh: a pure
//! function of the canonical collection and the filter state. No caching —
//! the collections involved are far too small for it to matter.

use shared::{Item, ItemFilter, StockFilter, TypeFilter};

/// Filter the collection down to the visible list.
///
/// All three predicates are ANDed; relative order is preserved. An empty
/// search string matches everything.
pub fn view(items: &[Item], filter: &ItemFilter) -> Vec<Item> {
    items
        .iter()
        .filter(|item| {
            matches_search(item, &filter.search)
                && matches_type(item, &filter.item_type)
                && matches_stock(item, filter.stock)
        })
        .cloned()
        .collect()
}

/// Ids of the items currently visible, in display order. Used by the
/// selection manager's select-all.
pub fn visible_ids(items: &[Item], filter: &ItemFilter) -> Vec<String> {
    view(items, filter)
        .into_iter()
        .map(|item| item.item_id)
        .collect()
}

fn matches_search(item: &Item, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    item.item_name.to_lowercase().contains(&needle)
        || item.item_id.to_lowercase().contains(&needle)
}

fn matches_type(item: &Item, filter: &TypeFilter) -> bool {
    match filter {
        TypeFilter::All => true,
        TypeFilter::Only(item_type) => item.item_type == *item_type,
    }
}

fn matches_stock(item: &Item, filter: StockFilter) -> bool {
    match filter {
        StockFilter::All => true,
        StockFilter::InStock => item.number_of_items > 0,
        StockFilter::OutOfStock => item.number_of_items <= 0,
    }
}
