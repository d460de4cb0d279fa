//! Item id allocation.
//!
//! Ids are sequential decimal numbers rendered with a minimum width of four
//! digits (`0001`, `0002`, …). Allocation is a pure function of the current
//! collection, so it must run inside the same mutation turn that commits the
//! new item; there is no reservation.

use shared::Item;

/// Minimum rendered width of an item id.
const ID_PAD_WIDTH: usize = 4;

/// Derive the next unique item id from the current collection.
///
/// Non-numeric existing ids count as 0. Values of 10000 and above render at
/// natural width; the padding is a display convention, not a cap.
pub fn next_id(items: &[Item]) -> String {
    let max_id = items
        .iter()
        .map(|item| item.item_id.parse::<u64>().unwrap_or(0))
        .max()
        .unwrap_or(0);
    format!("{:0width$}", max_id + 1, width = ID_PAD_WIDTH)
}
