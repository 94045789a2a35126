use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::order::Order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    CustomerName,
    CustomerEmail,
    Status,
    Total,
    OrderDate,
    ItemCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    /// Newest orders first.
    fn default() -> Self {
        Self {
            key: SortKey::OrderDate,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Column-header click: reselecting the ascending key flips it to
    /// descending, anything else sorts ascending by `key`.
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self { key, direction }
    }
}

/// Strings compare lexicographically (status by its lowercase name), amounts
/// and counts numerically, dates by instant.
pub fn compare(a: &Order, b: &Order, key: SortKey, direction: SortDirection) -> Ordering {
    let ordering = match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::CustomerName => a.customer.name.cmp(&b.customer.name),
        SortKey::CustomerEmail => a.customer.email.cmp(&b.customer.email),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        SortKey::Total => a.total.cmp(&b.total),
        SortKey::OrderDate => a.order_date.cmp(&b.order_date),
        SortKey::ItemCount => a.item_count().cmp(&b.item_count()),
    };
    direction.apply(ordering)
}
