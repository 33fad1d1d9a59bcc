//! Food order summaries

use crate::types::{format_number, FoodOrder};

/// Separator between items in a summary line
const ITEM_SEPARATOR: &str = "  ";

/// Render the ordered items of a food order as `Label: quantity` pairs
///
/// Items with a quantity of zero or less are left out. Returns an empty
/// string when nothing was ordered.
pub fn food_summary(order: &FoodOrder) -> String {
    order
        .iter()
        .filter(|(_, quantity)| **quantity > 0.0)
        .map(|(key, quantity)| format!("{}: {}", food_label(key), format_number(*quantity)))
        .collect::<Vec<_>>()
        .join(ITEM_SEPARATOR)
}

/// Turn a camelCase item key into a label: `hotChips` → `Hot Chips`
pub fn food_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
            continue;
        }
        if ch.is_uppercase() {
            label.push(' ');
        }
        label.push(ch);
    }
    label
}
