use bigdecimal::RoundingMode;
use chrono::{DateTime, Utc};

use crate::domain::order::Order;

pub const CSV_HEADER: [&str; 5] = ["Order ID", "Customer", "Status", "Total", "Date"];

/// Serialize `orders` as CSV: one header line, then one line per order with
/// the total at two decimals and the date as `YYYY-MM-DD` (UTC). Lines are
/// joined with `\n`, without a trailing newline. Fields are not quoted.
pub fn export_csv(orders: &[&Order]) -> String {
    let mut lines = Vec::with_capacity(orders.len() + 1);
    lines.push(CSV_HEADER.join(","));
    lines.extend(orders.iter().map(|order| csv_row(order)));
    lines.join("\n")
}

fn csv_row(order: &Order) -> String {
    [
        order.id.clone(),
        order.customer.name.clone(),
        order.status.to_string(),
        order
            .total
            .with_scale_round(2, RoundingMode::HalfUp)
            .to_string(),
        order.order_date.format("%Y-%m-%d").to_string(),
    ]
    .join(",")
}

/// `orders-YYYY-MM-DD.csv`
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("orders-{}.csv", now.format("%Y-%m-%d"))
}
