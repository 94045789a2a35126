use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Delivered and cancelled orders are never touched by the simulated feed.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown order status '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub quantity: i32,
    /// Unit price.
    pub price: BigDecimal,
    pub image: String,
}

impl OrderItem {
    pub fn line_total(&self) -> BigDecimal {
        self.price.clone() * BigDecimal::from(self.quantity)
    }
}

/// A purchase record. The store owns the canonical copy; everything else
/// refers to orders by `id` or borrows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer: Customer,
    pub status: OrderStatus,
    /// Sum of `price * quantity` over `items`, fixed at creation.
    pub total: BigDecimal,
    pub order_date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Order {
    /// Create a new `pending` order, computing its total from `items`.
    ///
    /// Fails when `items` is empty, a quantity is below 1 or a price is negative.
    pub fn new(
        id: impl Into<String>,
        customer: Customer,
        items: Vec<OrderItem>,
        shipping_address: ShippingAddress,
        order_date: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        if items.is_empty() {
            return Err(DomainError::InvalidInput(format!(
                "order {} must contain at least one item",
                id
            )));
        }

        let zero = BigDecimal::from(0);
        for item in &items {
            if item.quantity < 1 {
                return Err(DomainError::InvalidInput(format!(
                    "item {} of order {} has quantity {}",
                    item.id, id, item.quantity
                )));
            }
            if item.price < zero {
                return Err(DomainError::InvalidInput(format!(
                    "item {} of order {} has negative price {}",
                    item.id, id, item.price
                )));
            }
        }

        let total = items
            .iter()
            .map(OrderItem::line_total)
            .fold(zero, |acc, line| acc + line);

        Ok(Self {
            id,
            customer,
            status: OrderStatus::Pending,
            total,
            order_date,
            items,
            shipping_address,
            tracking_number: None,
            notes: None,
        })
    }

    /// Restate the status of a historical record (seed data only).
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_tracking_number(mut self, tracking_number: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking_number.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
