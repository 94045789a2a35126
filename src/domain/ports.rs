use std::collections::HashSet;

use super::errors::DomainError;
use super::events::DashboardEvent;
use super::order::{Order, OrderStatus};

/// The authoritative collection of orders. Exactly one owner mutates it.
pub trait OrderRepository: Send + 'static {
    /// All orders, newest arrivals first.
    fn all(&self) -> &[Order];
    fn get(&self, id: &str) -> Option<&Order>;
    /// Insert `order` at the front. Rejects ids already present.
    fn prepend(&mut self, order: Order) -> Result<(), DomainError>;
    /// Returns the previous status.
    fn set_status(&mut self, id: &str, status: OrderStatus) -> Result<OrderStatus, DomainError>;
    /// Returns the number of orders patched.
    fn set_status_many(&mut self, ids: &HashSet<String>, status: OrderStatus) -> usize;

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

/// Supplies orders and statuses in place of a real backend.
pub trait OrderSource: Send + Sync + 'static {
    fn initial_orders(&self, count: usize) -> Result<Vec<Order>, DomainError>;
    /// A fresh `pending` order stamped with the current time.
    fn new_order(&self) -> Result<Order, DomainError>;
    fn random_status(&self) -> OrderStatus;
}

/// Receives the events a presentation layer would render as toasts.
pub trait NotificationSink: Send + 'static {
    fn notify(&self, event: &DashboardEvent);
}
