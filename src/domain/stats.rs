use bigdecimal::{BigDecimal, RoundingMode};
use serde::Serialize;

use super::order::{Order, OrderStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub processing: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn get(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Processing => self.processing,
            OrderStatus::Shipped => self.shipped,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Cancelled => self.cancelled,
        }
    }

    fn increment(&mut self, status: OrderStatus) {
        let slot = match status {
            OrderStatus::Pending => &mut self.pending,
            OrderStatus::Processing => &mut self.processing,
            OrderStatus::Shipped => &mut self.shipped,
            OrderStatus::Delivered => &mut self.delivered,
            OrderStatus::Cancelled => &mut self.cancelled,
        };
        *slot += 1;
    }
}

/// Summary figures over a derived view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: usize,
    pub total_revenue: BigDecimal,
    /// Rounded to cents; zero for an empty view.
    pub average_order_value: BigDecimal,
    pub by_status: StatusCounts,
}

impl OrderStats {
    pub fn from_orders(orders: &[&Order]) -> Self {
        let mut by_status = StatusCounts::default();
        let mut total_revenue = BigDecimal::from(0);
        for order in orders {
            by_status.increment(order.status);
            total_revenue += &order.total;
        }

        let average_order_value = if orders.is_empty() {
            BigDecimal::from(0)
        } else {
            (total_revenue.clone() / BigDecimal::from(orders.len() as u64))
                .with_scale_round(2, RoundingMode::HalfUp)
        };

        Self {
            total_orders: orders.len(),
            total_revenue,
            average_order_value,
            by_status,
        }
    }
}
