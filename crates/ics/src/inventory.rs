//! Inventory aggregation for server ordering.
//!
//! The provider reports stock as individual batches. This module filters those
//! batches and folds them into one row per `(location, SKU)` pair so users can
//! compare what is actually purchasable.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::api::models::InventoryUnit;

/// Filters applied before grouping.
///
/// Empty strings and absent bounds disable the corresponding filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryFilter {
    /// Location code, matched case-insensitively.
    pub location: String,
    /// SKU name, matched case-insensitively.
    pub sku: String,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl InventoryFilter {
    /// Whether a unit passes every active filter.
    ///
    /// A unit whose price is not a decimal number is never excluded by the
    /// price bounds.
    #[must_use]
    pub fn matches(&self, unit: &InventoryUnit) -> bool {
        if !self.location.is_empty() && !unit.location_code.eq_ignore_ascii_case(&self.location) {
            return false;
        }
        if !self.sku.is_empty() && !unit.sku_name.eq_ignore_ascii_case(&self.sku) {
            return false;
        }

        let Some(price) = parse_price(&unit.price) else {
            return true;
        };
        if active_bound(self.min_price).is_some_and(|min| price < min) {
            return false;
        }
        if active_bound(self.max_price).is_some_and(|max| price > max) {
            return false;
        }
        true
    }
}

/// A bound of zero or below means "unset".
fn active_bound(bound: Option<f64>) -> Option<f64> {
    bound.filter(|b| *b > 0.0)
}

/// Parse a unit price sent as a decimal string.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

/// Stock for one `(location, SKU)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryGroup {
    pub location_code: String,
    pub sku_name: String,
    /// Price of the last unit folded into this group.
    pub price: String,
    /// Sum of the quantities of every unit in this group.
    pub total_quantity: i64,
}

/// Units that pass `filter`, in input order.
#[must_use]
pub fn filter_units<'a>(units: &'a [InventoryUnit], filter: &InventoryFilter) -> Vec<&'a InventoryUnit> {
    units.iter().filter(|u| filter.matches(u)).collect()
}

/// Fold units into groups sorted by location, then SKU.
///
/// Later units overwrite the group's representative price.
#[must_use]
pub fn group_units<'a, I>(units: I) -> Vec<InventoryGroup>
where
    I: IntoIterator<Item = &'a InventoryUnit>,
{
    let mut groups: BTreeMap<(&str, &str), InventoryGroup> = BTreeMap::new();

    for unit in units {
        groups
            .entry((unit.location_code.as_str(), unit.sku_name.as_str()))
            .and_modify(|group| {
                group.total_quantity += unit.quantity;
                group.price.clone_from(&unit.price);
            })
            .or_insert_with(|| InventoryGroup {
                location_code: unit.location_code.clone(),
                sku_name: unit.sku_name.clone(),
                price: unit.price.clone(),
                total_quantity: unit.quantity,
            });
    }

    groups.into_values().collect()
}

/// Filter then group raw inventory.
#[must_use]
pub fn aggregate(units: &[InventoryUnit], filter: &InventoryFilter) -> Vec<InventoryGroup> {
    let filtered = filter_units(units, filter);
    let groups = group_units(filtered.iter().copied());

    debug!(
        units = units.len(),
        matched = filtered.len(),
        groups = groups.len(),
        "Aggregated inventory"
    );

    groups
}
