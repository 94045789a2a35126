use std::collections::HashSet;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::OrderRepository;

// ── Repository ────────────────────────────────────────────────────────────────

/// Orders held in memory, newest arrivals first.
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Vec<Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store. Fails on the first repeated id.
    pub fn with_orders(orders: Vec<Order>) -> Result<Self, DomainError> {
        {
            let mut seen = HashSet::with_capacity(orders.len());
            for order in &orders {
                if !seen.insert(order.id.as_str()) {
                    return Err(DomainError::DuplicateOrder(order.id.clone()));
                }
            }
        }
        Ok(Self { orders })
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.orders.iter().position(|order| order.id == id)
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn all(&self) -> &[Order] {
        &self.orders
    }

    fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    fn prepend(&mut self, order: Order) -> Result<(), DomainError> {
        if self.position(&order.id).is_some() {
            return Err(DomainError::DuplicateOrder(order.id));
        }
        self.orders.insert(0, order);
        Ok(())
    }

    fn set_status(&mut self, id: &str, status: OrderStatus) -> Result<OrderStatus, DomainError> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        Ok(std::mem::replace(&mut order.status, status))
    }

    fn set_status_many(&mut self, ids: &HashSet<String>, status: OrderStatus) -> usize {
        let mut updated = 0;
        for order in self.orders.iter_mut().filter(|order| ids.contains(&order.id)) {
            order.status = status;
            updated += 1;
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::order;

    fn seeded() -> InMemoryOrderRepository {
        InMemoryOrderRepository::with_orders(vec![
            order("ORD-1001", OrderStatus::Pending, 5_000),
            order("ORD-1002", OrderStatus::Delivered, 20_000),
        ])
        .expect("unique ids")
    }

    #[test]
    fn with_orders_rejects_duplicate_ids() {
        let result = InMemoryOrderRepository::with_orders(vec![
            order("ORD-1001", OrderStatus::Pending, 100),
            order("ORD-1001", OrderStatus::Shipped, 200),
        ]);
        assert_eq!(
            result.unwrap_err(),
            DomainError::DuplicateOrder("ORD-1001".to_string())
        );
    }

    #[test]
    fn prepend_puts_new_order_first() {
        let mut repo = seeded();
        repo.prepend(order("ORD-2000", OrderStatus::Pending, 100))
            .expect("prepend failed");

        assert_eq!(repo.len(), 3);
        assert_eq!(repo.all()[0].id, "ORD-2000");
    }

    #[test]
    fn prepend_rejects_existing_id() {
        let mut repo = seeded();
        let err = repo
            .prepend(order("ORD-1002", OrderStatus::Pending, 100))
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateOrder(_)));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn set_status_returns_previous_status() {
        let mut repo = seeded();
        let previous = repo
            .set_status("ORD-1001", OrderStatus::Shipped)
            .expect("order exists");

        assert_eq!(previous, OrderStatus::Pending);
        assert_eq!(repo.get("ORD-1001").unwrap().status, OrderStatus::Shipped);
    }

    #[test]
    fn set_status_unknown_id_is_not_found() {
        let mut repo = seeded();
        let err = repo.set_status("ORD-9999", OrderStatus::Shipped).unwrap_err();
        assert_eq!(err, DomainError::NotFound("ORD-9999".to_string()));
    }

    #[test]
    fn set_status_many_patches_only_listed_ids() {
        let mut repo = seeded();
        let ids: HashSet<String> = ["ORD-1002".to_string(), "ORD-7777".to_string()].into();

        let updated = repo.set_status_many(&ids, OrderStatus::Processing);

        assert_eq!(updated, 1);
        assert_eq!(repo.get("ORD-1001").unwrap().status, OrderStatus::Pending);
        assert_eq!(repo.get("ORD-1002").unwrap().status, OrderStatus::Processing);
    }

    #[test]
    fn empty_repository() {
        let repo = InMemoryOrderRepository::new();
        assert!(repo.is_empty());
        assert!(repo.get("ORD-1000").is_none());
    }
}
