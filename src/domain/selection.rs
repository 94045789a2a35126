use std::collections::HashSet;

use serde::Serialize;

use super::errors::DomainError;
use super::order::{Order, OrderStatus};
use super::ports::OrderRepository;

/// Checkbox state of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSelection {
    None,
    Some,
    All,
}

/// Order ids picked for a bulk action. Ids stay selected when filters hide
/// them; only `clear`, a toggle or a bulk update removes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Deselect the page when every order on it is selected, otherwise
    /// select all of it.
    pub fn select_all_on_page(&mut self, page_items: &[&Order]) {
        if self.page_state(page_items) == PageSelection::All {
            for order in page_items {
                self.ids.remove(&order.id);
            }
        } else {
            self.ids
                .extend(page_items.iter().map(|order| order.id.clone()));
        }
    }

    pub fn page_state(&self, page_items: &[&Order]) -> PageSelection {
        let selected = page_items
            .iter()
            .filter(|order| self.ids.contains(&order.id))
            .count();
        match selected {
            0 => PageSelection::None,
            n if n == page_items.len() => PageSelection::All,
            _ => PageSelection::Some,
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Set every selected order to `status`, terminal ones included, then
    /// empty the selection. Returns the number of orders updated.
    pub fn bulk_apply<R>(
        &mut self,
        store: &mut R,
        status: OrderStatus,
    ) -> Result<usize, DomainError>
    where
        R: OrderRepository + ?Sized,
    {
        if self.ids.is_empty() {
            return Err(DomainError::EmptySelection);
        }
        let updated = store.set_status_many(&self.ids, status);
        self.ids.clear();
        Ok(updated)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }
}
