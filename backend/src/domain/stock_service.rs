//! Stock transactions: adding items and adjusting quantities.
//!
//! This service owns the numeric rules of the modify flow. Amounts arrive as
//! raw form strings; for validation an empty or non-numeric value is
//! *invalid*, never zero. Only the display-side preview treats an unparsed
//! field as zero.

use log::info;
use shared::Item;

use crate::domain::commands::items::{
    AddItemCommand, AdjustItemCommand, AmountEntry, ModifyAction,
};
use crate::domain::errors::DomainError;
use crate::domain::id_allocator;
use crate::domain::item_service::ItemService;

/// Steps of the modify flow, forward-only with explicit back transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModifyStep {
    /// Choose increase or decrease.
    #[default]
    Action,
    /// Enter the amount (direct or packaged).
    Amount,
    /// Confirm or change the item type, then submit.
    Type,
}

/// State of one pass through the modify flow. Dropped on submit or cancel;
/// cancelling performs no mutation because the flow holds no committed
/// state.
#[derive(Debug, Clone, Default)]
pub struct ModifyFlow {
    step: ModifyStep,
    pub action: ModifyAction,
}

impl ModifyFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> ModifyStep {
        self.step
    }

    /// Action → Amount. No validation; the action always has a value.
    pub fn next_from_action(&mut self, action: ModifyAction) {
        if self.step == ModifyStep::Action {
            self.action = action;
            self.step = ModifyStep::Amount;
        }
    }

    /// Amount → Type, gated on the amount entry validating. On failure the
    /// flow stays on the amount step.
    pub fn next_from_amount(&mut self, entry: &AmountEntry) -> Result<(), DomainError> {
        if self.step == ModifyStep::Amount {
            parse_amount(entry)?;
            self.step = ModifyStep::Type;
        }
        Ok(())
    }

    /// Explicit back transition; a no-op on the first step.
    pub fn back(&mut self) {
        self.step = match self.step {
            ModifyStep::Action => ModifyStep::Action,
            ModifyStep::Amount => ModifyStep::Action,
            ModifyStep::Type => ModifyStep::Amount,
        };
    }
}

/// Parse an amount entry for validation: a strictly positive integer, or for
/// packaged entry two strictly positive integers multiplied together.
pub fn parse_amount(entry: &AmountEntry) -> Result<i64, DomainError> {
    match entry {
        AmountEntry::Direct(raw) => parse_positive(raw),
        AmountEntry::Packaged {
            packages,
            per_package,
        } => {
            let packages = parse_positive(packages)?;
            let per_package = parse_positive(per_package)?;
            // The product must still fit in i64
            packages
                .checked_mul(per_package)
                .ok_or(DomainError::InvalidAmount)
        }
    }
}

fn parse_positive(raw: &str) -> Result<i64, DomainError> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(DomainError::InvalidAmount),
    }
}

/// Display-side preview of a packaged total. Unparsed fields count as zero
/// here and only here; submitting still goes through [`parse_amount`].
pub fn preview_total(entry: &AmountEntry) -> i64 {
    match entry {
        AmountEntry::Direct(raw) => raw.trim().parse().unwrap_or(0),
        AmountEntry::Packaged {
            packages,
            per_package,
        } => {
            let packages: i64 = packages.trim().parse().unwrap_or(0);
            let per_package: i64 = per_package.trim().parse().unwrap_or(0);
            packages.saturating_mul(per_package)
        }
    }
}

/// Applies add and increase/decrease operations to the item store.
#[derive(Clone)]
pub struct StockService {
    item_service: ItemService,
}

impl StockService {
    pub fn new(item_service: ItemService) -> Self {
        Self { item_service }
    }

    /// Create a new item and append it to the collection.
    ///
    /// The id comes from the allocator inside the same mutation turn as the
    /// commit, so it cannot collide. Direct entry accepts a non-negative
    /// quantity (an empty field counts as zero stock); packaged entry
    /// requires both fields as positive integers.
    pub fn add_item(&self, cmd: AddItemCommand) -> Result<Item, DomainError> {
        if cmd.item_name.trim().is_empty() {
            return Err(DomainError::Validation);
        }

        let (quantity, is_package, number_of_packages, items_per_package) = match &cmd.amount {
            AmountEntry::Direct(raw) => {
                let quantity = parse_non_negative(raw)?;
                (quantity, "no".to_string(), None, None)
            }
            AmountEntry::Packaged {
                packages,
                per_package,
            } => {
                let packages =
                    parse_positive(packages).map_err(|_| DomainError::Validation)?;
                let per_package =
                    parse_positive(per_package).map_err(|_| DomainError::Validation)?;
                let quantity = packages
                    .checked_mul(per_package)
                    .ok_or(DomainError::InvalidAmount)?;
                (
                    quantity,
                    "yes".to_string(),
                    Some(packages),
                    Some(per_package),
                )
            }
        };

        let created = self.item_service.mutate(|items| {
            let item_id = id_allocator::next_id(items);
            let new_item = Item {
                item_id,
                item_name: cmd.item_name.clone(),
                number_of_items: quantity,
                item_type: cmd.item_type.clone(),
                is_package: is_package.clone(),
                number_of_packages,
                items_per_package,
            };
            items.push(new_item.clone());
            new_item
        });

        info!(
            "🧾 STOCK: added item {} ({}) with quantity {}",
            created.item_id, created.item_name, created.number_of_items
        );
        Ok(created)
    }

    /// Increase or decrease the quantity of an existing item, possibly
    /// changing its type.
    ///
    /// A decrease below zero fails with [`DomainError::InsufficientStock`]
    /// and leaves the item untouched. On success every other field and the
    /// item's position in the collection are preserved.
    pub fn adjust_item(&self, cmd: AdjustItemCommand) -> Result<Item, DomainError> {
        let delta = parse_amount(&cmd.amount)?;
        let signed_delta = match cmd.action {
            ModifyAction::Increase => delta,
            ModifyAction::Decrease => -delta,
        };

        let updated = self.item_service.try_mutate(|items| {
            let target = items
                .iter_mut()
                .find(|item| item.item_id == cmd.item_id)
                .ok_or_else(|| DomainError::ItemNotFound(cmd.item_id.clone()))?;

            let new_total = target
                .number_of_items
                .checked_add(signed_delta)
                .ok_or(DomainError::InvalidAmount)?;
            if new_total < 0 {
                return Err(DomainError::InsufficientStock {
                    available: target.number_of_items,
                    requested: delta,
                });
            }

            target.number_of_items = new_total;
            target.item_type = cmd.item_type.clone();
            Ok(target.clone())
        })?;

        info!(
            "🧾 STOCK: adjusted item {} by {} to {}",
            updated.item_id, signed_delta, updated.number_of_items
        );
        Ok(updated)
    }
}

/// Direct add-entry parsing: empty counts as zero stock (the original form
/// allows creating an out-of-stock item), anything else must be a
/// non-negative integer.
fn parse_non_negative(raw: &str) -> Result<i64, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(DomainError::InvalidAmount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KvConnection, KvRepository};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_service() -> (StockService, ItemService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = KvConnection::new(temp_dir.path()).expect("Failed to create connection");
        let item_service = ItemService::new(Arc::new(KvRepository::new(connection)));
        (StockService::new(item_service.clone()), item_service, temp_dir)
    }

    fn direct(raw: &str) -> AmountEntry {
        AmountEntry::Direct(raw.to_string())
    }

    fn packaged(packages: &str, per_package: &str) -> AmountEntry {
        AmountEntry::Packaged {
            packages: packages.to_string(),
            per_package: per_package.to_string(),
        }
    }

    fn add(name: &str, amount: AmountEntry) -> AddItemCommand {
        AddItemCommand {
            item_name: name.to_string(),
            item_type: "FA & HN".to_string(),
            amount,
        }
    }

    #[test]
    fn test_first_add_gets_id_0001() {
        let (stock, items, _temp_dir) = create_test_service();
        let created = stock.add_item(add("Rope", direct("50"))).unwrap();

        assert_eq!(created.item_id, "0001");
        assert_eq!(created.number_of_items, 50);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_add_with_empty_name_fails_validation() {
        let (stock, items, _temp_dir) = create_test_service();
        assert_eq!(
            stock.add_item(add("  ", direct("5"))),
            Err(DomainError::Validation)
        );
        assert!(items.is_empty());
    }

    #[test]
    fn test_packaged_add_computes_total() {
        let (stock, _items, _temp_dir) = create_test_service();
        let created = stock.add_item(add("Bandage", packaged("3", "5"))).unwrap();

        assert_eq!(created.number_of_items, 15);
        assert_eq!(created.is_package, "yes");
        assert_eq!(created.number_of_packages, Some(3));
        assert_eq!(created.items_per_package, Some(5));
    }

    #[test]
    fn test_packaged_add_requires_both_positive_fields() {
        let (stock, _items, _temp_dir) = create_test_service();
        assert_eq!(
            stock.add_item(add("Bandage", packaged("3", ""))),
            Err(DomainError::Validation)
        );
        assert_eq!(
            stock.add_item(add("Bandage", packaged("0", "5"))),
            Err(DomainError::Validation)
        );
        assert_eq!(
            stock.add_item(add("Bandage", packaged("three", "5"))),
            Err(DomainError::Validation)
        );
    }

    #[test]
    fn test_packaged_add_rejects_product_too_large_to_represent() {
        let (stock, items, _temp_dir) = create_test_service();
        assert_eq!(
            stock.add_item(add("Bulk", packaged("4000000000", "4000000000"))),
            Err(DomainError::InvalidAmount)
        );
        assert!(items.is_empty());
    }

    #[test]
    fn test_direct_add_with_empty_amount_creates_out_of_stock_item() {
        let (stock, _items, _temp_dir) = create_test_service();
        let created = stock.add_item(add("Whistle", direct(""))).unwrap();
        assert_eq!(created.number_of_items, 0);
        assert!(!created.in_stock());
    }

    #[test]
    fn test_direct_add_rejects_garbage_amounts() {
        let (stock, _items, _temp_dir) = create_test_service();
        assert_eq!(
            stock.add_item(add("Whistle", direct("lots"))),
            Err(DomainError::InvalidAmount)
        );
        assert_eq!(
            stock.add_item(add("Whistle", direct("-3"))),
            Err(DomainError::InvalidAmount)
        );
    }

    #[test]
    fn test_ids_stay_unique_across_adds() {
        let (stock, _items, _temp_dir) = create_test_service();
        let a = stock.add_item(add("Rope", direct("1"))).unwrap();
        let b = stock.add_item(add("Tape", direct("2"))).unwrap();
        let c = stock.add_item(add("Glue", direct("3"))).unwrap();
        assert_eq!(
            vec![a.item_id, b.item_id, c.item_id],
            vec!["0001", "0002", "0003"]
        );
    }

    fn adjust(id: &str, action: ModifyAction, amount: AmountEntry) -> AdjustItemCommand {
        AdjustItemCommand {
            item_id: id.to_string(),
            action,
            amount,
            item_type: "FA & HN".to_string(),
        }
    }

    #[test]
    fn test_increase_adds_delta() {
        let (stock, _items, _temp_dir) = create_test_service();
        stock.add_item(add("Rope", direct("10"))).unwrap();

        let updated = stock
            .adjust_item(adjust("0001", ModifyAction::Increase, direct("5")))
            .unwrap();
        assert_eq!(updated.number_of_items, 15);
    }

    #[test]
    fn test_increase_past_i64_max_fails_and_leaves_item_unchanged() {
        let (stock, items, _temp_dir) = create_test_service();
        stock.add_item(add("Rope", direct("10"))).unwrap();

        let max = i64::MAX.to_string();
        assert_eq!(
            stock.adjust_item(adjust("0001", ModifyAction::Increase, direct(&max))),
            Err(DomainError::InvalidAmount)
        );
        assert_eq!(items.items()[0].number_of_items, 10);
    }

    #[test]
    fn test_decrease_below_zero_fails_and_leaves_item_unchanged() {
        let (stock, items, _temp_dir) = create_test_service();
        stock.add_item(add("Rope", direct("10"))).unwrap();

        let result = stock.adjust_item(adjust("0001", ModifyAction::Decrease, direct("15")));
        assert_eq!(
            result,
            Err(DomainError::InsufficientStock {
                available: 10,
                requested: 15
            })
        );
        assert_eq!(items.items()[0].number_of_items, 10);
    }

    #[test]
    fn test_decrease_to_exactly_zero_is_allowed() {
        let (stock, _items, _temp_dir) = create_test_service();
        stock.add_item(add("Rope", direct("10"))).unwrap();

        let updated = stock
            .adjust_item(adjust("0001", ModifyAction::Decrease, direct("10")))
            .unwrap();
        assert_eq!(updated.number_of_items, 0);
    }

    #[test]
    fn test_adjust_uses_packaged_delta() {
        let (stock, _items, _temp_dir) = create_test_service();
        stock.add_item(add("Rope", direct("1"))).unwrap();

        let updated = stock
            .adjust_item(adjust("0001", ModifyAction::Increase, packaged("3", "5")))
            .unwrap();
        assert_eq!(updated.number_of_items, 16);
    }

    #[test]
    fn test_adjust_updates_type_and_preserves_everything_else() {
        let (stock, items, _temp_dir) = create_test_service();
        stock.add_item(add("Bandage", packaged("3", "5"))).unwrap();
        stock.add_item(add("Rope", direct("2"))).unwrap();

        let mut cmd = adjust("0001", ModifyAction::Increase, direct("1"));
        cmd.item_type = "Training".to_string();
        let updated = stock.adjust_item(cmd).unwrap();

        assert_eq!(updated.item_type, "Training");
        assert_eq!(updated.item_name, "Bandage");
        assert_eq!(updated.is_package, "yes");
        assert_eq!(updated.number_of_packages, Some(3));

        // Position preserved
        let all = items.items();
        assert_eq!(all[0].item_id, "0001");
        assert_eq!(all[1].item_id, "0002");
    }

    #[test]
    fn test_adjust_unknown_id_fails() {
        let (stock, _items, _temp_dir) = create_test_service();
        assert_eq!(
            stock.adjust_item(adjust("9999", ModifyAction::Increase, direct("1"))),
            Err(DomainError::ItemNotFound("9999".to_string()))
        );
    }

    #[test]
    fn test_adjust_with_invalid_amount_fails_before_lookup() {
        let (stock, _items, _temp_dir) = create_test_service();
        stock.add_item(add("Rope", direct("10"))).unwrap();
        assert_eq!(
            stock.adjust_item(adjust("0001", ModifyAction::Decrease, direct("0"))),
            Err(DomainError::InvalidAmount)
        );
        assert_eq!(
            stock.adjust_item(adjust("0001", ModifyAction::Decrease, direct(""))),
            Err(DomainError::InvalidAmount)
        );
    }

    #[test]
    fn test_parse_amount_rules() {
        assert_eq!(parse_amount(&direct("12")), Ok(12));
        assert_eq!(parse_amount(&direct(" 7 ")), Ok(7));
        assert_eq!(parse_amount(&direct("0")), Err(DomainError::InvalidAmount));
        assert_eq!(parse_amount(&direct("-2")), Err(DomainError::InvalidAmount));
        assert_eq!(parse_amount(&direct("abc")), Err(DomainError::InvalidAmount));
        assert_eq!(parse_amount(&packaged("3", "5")), Ok(15));
        assert_eq!(
            parse_amount(&packaged("", "5")),
            Err(DomainError::InvalidAmount)
        );
        assert_eq!(
            parse_amount(&packaged("4000000000", "4000000000")),
            Err(DomainError::InvalidAmount)
        );
    }

    #[test]
    fn test_preview_total_treats_unparsed_as_zero() {
        assert_eq!(preview_total(&packaged("3", "")), 0);
        assert_eq!(preview_total(&packaged("3", "4")), 12);
        assert_eq!(preview_total(&direct("oops")), 0);
        // An absurd product saturates instead of wrapping
        assert_eq!(
            preview_total(&packaged("4000000000", "4000000000")),
            i64::MAX
        );
    }

    #[test]
    fn test_modify_flow_walks_forward_and_back() {
        let mut flow = ModifyFlow::new();
        assert_eq!(flow.step(), ModifyStep::Action);

        flow.next_from_action(ModifyAction::Decrease);
        assert_eq!(flow.step(), ModifyStep::Amount);
        assert_eq!(flow.action, ModifyAction::Decrease);

        // Invalid amount keeps the flow on the amount step
        assert_eq!(
            flow.next_from_amount(&direct("zero")),
            Err(DomainError::InvalidAmount)
        );
        assert_eq!(flow.step(), ModifyStep::Amount);

        flow.next_from_amount(&direct("4")).unwrap();
        assert_eq!(flow.step(), ModifyStep::Type);

        flow.back();
        assert_eq!(flow.step(), ModifyStep::Amount);
        flow.back();
        assert_eq!(flow.step(), ModifyStep::Action);
        flow.back();
        assert_eq!(flow.step(), ModifyStep::Action);
    }
}
