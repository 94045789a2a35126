//! Order fixtures shared by the unit tests.

use bigdecimal::BigDecimal;
use chrono::{DateTime, TimeZone, Utc};

use super::order::{Customer, Order, OrderItem, OrderStatus, ShippingAddress};

pub(crate) fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid fixture date")
}

pub(crate) fn customer(name: &str, email: &str) -> Customer {
    Customer {
        id: "1".to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: "+1-555-0101".to_string(),
    }
}

pub(crate) fn address() -> ShippingAddress {
    ShippingAddress {
        street: "123 Main St".to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        zip_code: "10001".to_string(),
        country: "USA".to_string(),
    }
}

/// A single-item order whose total is `total_cents / 100`.
pub(crate) fn order(id: &str, status: OrderStatus, total_cents: i64) -> Order {
    let item = OrderItem {
        id: format!("item-{}", id),
        name: "USB-C Hub 7-in-1".to_string(),
        quantity: 1,
        price: BigDecimal::new(total_cents.into(), 2),
        image: "/placeholder.svg".to_string(),
    };
    Order::new(
        id,
        customer("Alice Johnson", "alice.johnson@email.com"),
        vec![item],
        address(),
        date(2024, 5, 1),
    )
    .expect("valid fixture order")
    .with_status(status)
}

pub(crate) fn order_by(
    id: &str,
    name: &str,
    email: &str,
    status: OrderStatus,
    total_cents: i64,
    order_date: DateTime<Utc>,
) -> Order {
    let mut order = order(id, status, total_cents);
    order.customer = customer(name, email);
    order.order_date = order_date;
    order
}
