use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::events::DashboardEvent;
use crate::domain::filters::OrderFilters;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::pagination::{
    clamp_page, page_window, paginate, total_pages, PageInfo, VISIBLE_PAGE_BUTTONS,
};
use crate::domain::ports::{NotificationSink, OrderRepository};
use crate::domain::query::{count_matching, derive_view};
use crate::domain::selection::{PageSelection, SelectionSet};
use crate::domain::sort::{SortConfig, SortKey};
use crate::domain::stats::OrderStats;
use crate::infrastructure::csv_export::export_csv;

/// Owned, read-only picture of the dashboard for a presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub orders: Vec<Order>,
    pub page: PageInfo,
    pub page_window: Vec<usize>,
    pub selected_ids: Vec<String>,
    pub page_selection: PageSelection,
    pub stats: OrderStats,
    pub filters: OrderFilters,
    pub sort: SortConfig,
}

/// The single owner of the order store and of all view state.
///
/// Every mutation goes through `&mut self`, so feed events and user
/// commands are applied one at a time in arrival order. The stored page
/// number is clamped after every change that can shrink the view.
pub struct Dashboard<R> {
    store: R,
    filters: OrderFilters,
    sort: SortConfig,
    page_size: usize,
    page_number: usize,
    selection: SelectionSet,
    notifier: Box<dyn NotificationSink>,
}

impl<R: OrderRepository> Dashboard<R> {
    pub fn new(store: R, page_size: usize, notifier: Box<dyn NotificationSink>) -> Self {
        Self {
            store,
            filters: OrderFilters::default(),
            sort: SortConfig::default(),
            page_size: page_size.max(1),
            page_number: 1,
            selection: SelectionSet::new(),
            notifier,
        }
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn filters(&self) -> &OrderFilters {
        &self.filters
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.store.get(id)
    }

    /// The filtered and sorted view, recomputed from the store.
    pub fn view(&self) -> Vec<&Order> {
        derive_view(self.store.all(), &self.filters, &self.sort)
    }

    pub fn current_page(&self) -> (Vec<&Order>, PageInfo) {
        let view = self.view();
        let page = paginate(&view, self.page_size, self.page_number);
        (page.items.to_vec(), page.info)
    }

    pub fn stats(&self) -> OrderStats {
        OrderStats::from_orders(&self.view())
    }

    // ── View state ───────────────────────────────────────────────────────────

    pub fn set_filters(&mut self, filters: OrderFilters) {
        self.filters = filters;
        self.clamp_page();
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(OrderFilters::default());
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggle(key);
    }

    pub fn go_to_page(&mut self, page_number: usize) {
        self.page_number = page_number;
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page_number.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.page_number.saturating_sub(1));
    }

    // ── Selection ────────────────────────────────────────────────────────────

    pub fn toggle_selection(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    pub fn select_all_on_page(&mut self) {
        let view = derive_view(self.store.all(), &self.filters, &self.sort);
        let page = paginate(&view, self.page_size, self.page_number);
        self.selection.select_all_on_page(page.items);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Mutations ────────────────────────────────────────────────────────────

    /// Apply `status` to every selected order and clear the selection.
    ///
    /// Terminal orders are overridden too. An empty selection is reported
    /// and leaves the store untouched.
    pub fn bulk_update_status(&mut self, status: OrderStatus) -> Result<usize, DomainError> {
        match self.selection.bulk_apply(&mut self.store, status) {
            Ok(count) => {
                self.notifier
                    .notify(&DashboardEvent::BulkUpdated { count, status });
                self.clamp_page();
                Ok(count)
            }
            Err(e) => {
                if e == DomainError::EmptySelection {
                    self.notifier.notify(&DashboardEvent::NoSelection);
                }
                Err(e)
            }
        }
    }

    /// Set one order's status and return its previous one. Setting the
    /// status it already has changes nothing and emits no event.
    pub fn update_single_status(
        &mut self,
        id: &str,
        status: OrderStatus,
    ) -> Result<OrderStatus, DomainError> {
        let previous = self.store.set_status(id, status)?;
        if previous != status {
            self.notifier.notify(&DashboardEvent::StatusChanged {
                id: id.to_string(),
                from: previous,
                to: status,
            });
            self.clamp_page();
        }
        Ok(previous)
    }

    /// Put a newly arrived order at the front of the store.
    pub fn receive_order(&mut self, order: Order) -> Result<(), DomainError> {
        let id = order.id.clone();
        self.store.prepend(order)?;
        self.notifier.notify(&DashboardEvent::OrderArrived { id });
        self.clamp_page();
        Ok(())
    }

    /// Move one non-terminal order, chosen by `pick` in `[0, 1)`, to `status`.
    ///
    /// The new status may equal the old one. Returns the id of the order
    /// touched, or `None` when every order is terminal.
    pub fn progress_random_order(&mut self, pick: f64, status: OrderStatus) -> Option<String> {
        let eligible: Vec<&str> = self
            .store
            .all()
            .iter()
            .filter(|order| !order.status.is_terminal())
            .map(|order| order.id.as_str())
            .collect();
        if eligible.is_empty() {
            return None;
        }

        let last = eligible.len() - 1;
        let index = ((pick.clamp(0.0, 1.0) * eligible.len() as f64) as usize).min(last);
        let id = eligible[index].to_string();
        match self.store.set_status(&id, status) {
            Ok(previous) => {
                self.notifier.notify(&DashboardEvent::StatusChanged {
                    id: id.clone(),
                    from: previous,
                    to: status,
                });
                self.clamp_page();
                Some(id)
            }
            Err(e) => {
                log::warn!("Feed progression skipped: {}", e);
                None
            }
        }
    }

    // ── Read models ──────────────────────────────────────────────────────────

    pub fn export_csv(&self) -> String {
        let view = self.view();
        let csv = export_csv(&view);
        self.notifier
            .notify(&DashboardEvent::Exported { rows: view.len() });
        csv
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let view = self.view();
        let page = paginate(&view, self.page_size, self.page_number);
        DashboardSnapshot {
            orders: page.items.iter().map(|order| (*order).clone()).collect(),
            page: page.info,
            page_window: page_window(
                page.info.page_number,
                page.info.total_pages,
                VISIBLE_PAGE_BUTTONS,
            ),
            selected_ids: self.selection.ids(),
            page_selection: self.selection.page_state(page.items),
            stats: OrderStats::from_orders(&view),
            filters: self.filters.clone(),
            sort: self.sort,
        }
    }

    fn clamp_page(&mut self) {
        let len = count_matching(self.store.all(), &self.filters);
        self.page_number = clamp_page(self.page_number, total_pages(len, self.page_size));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::filters::{AmountRange, StatusFilter};
    use crate::domain::sort::SortDirection;
    use crate::domain::test_support::order;
    use crate::infrastructure::order_repo::InMemoryOrderRepository;

    #[derive(Clone, Default)]
    struct RecordingNotifier(Arc<Mutex<Vec<DashboardEvent>>>);

    impl NotificationSink for RecordingNotifier {
        fn notify(&self, event: &DashboardEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    impl RecordingNotifier {
        fn events(&self) -> Vec<DashboardEvent> {
            self.0.lock().unwrap().clone()
        }
    }

    fn dashboard(
        orders: Vec<Order>,
        page_size: usize,
    ) -> (Dashboard<InMemoryOrderRepository>, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let store = InMemoryOrderRepository::with_orders(orders).unwrap();
        (Dashboard::new(store, page_size, Box::new(notifier.clone())), notifier)
    }

    fn numbered(count: usize) -> Vec<Order> {
        (0..count)
            .map(|i| order(&format!("ORD-{}", 1000 + i), OrderStatus::Pending, 1_000))
            .collect()
    }

    #[test]
    fn example_store_filters_to_pending() {
        let (mut dash, _) = dashboard(
            vec![
                order("ORD-1001", OrderStatus::Pending, 5_000),
                order("ORD-1002", OrderStatus::Delivered, 20_000),
            ],
            20,
        );
        dash.set_filters(OrderFilters {
            status: StatusFilter::Only(OrderStatus::Pending),
            ..OrderFilters::default()
        });
        let ids: Vec<_> = dash.view().iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids, vec!["ORD-1001"]);
    }

    #[test]
    fn bulk_update_changes_selected_orders_only() {
        let (mut dash, notifier) = dashboard(numbered(3), 20);
        dash.toggle_selection("ORD-1000");
        dash.toggle_selection("ORD-1002");

        let count = dash.bulk_update_status(OrderStatus::Shipped).unwrap();

        assert_eq!(count, 2);
        assert!(dash.selection().is_empty());
        assert_eq!(dash.order("ORD-1000").unwrap().status, OrderStatus::Shipped);
        assert_eq!(dash.order("ORD-1001").unwrap().status, OrderStatus::Pending);
        assert_eq!(dash.order("ORD-1002").unwrap().status, OrderStatus::Shipped);
        assert_eq!(
            notifier.events(),
            vec![DashboardEvent::BulkUpdated {
                count: 2,
                status: OrderStatus::Shipped
            }]
        );
    }

    #[test]
    fn bulk_update_without_selection_reports_and_keeps_store() {
        let (mut dash, notifier) = dashboard(numbered(2), 20);
        let before = dash.store().all().to_vec();

        let err = dash.bulk_update_status(OrderStatus::Cancelled).unwrap_err();

        assert_eq!(err, DomainError::EmptySelection);
        assert_eq!(dash.store().all(), before.as_slice());
        assert_eq!(notifier.events(), vec![DashboardEvent::NoSelection]);
    }

    #[test]
    fn selection_survives_filters_that_hide_it() {
        let (mut dash, _) = dashboard(numbered(2), 20);
        dash.toggle_selection("ORD-1001");
        dash.set_filters(OrderFilters {
            search: "ORD-1000".to_string(),
            ..OrderFilters::default()
        });
        assert!(dash.selection().contains("ORD-1001"));

        dash.bulk_update_status(OrderStatus::Processing).unwrap();
        assert_eq!(dash.order("ORD-1001").unwrap().status, OrderStatus::Processing);
    }

    #[test]
    fn page_number_is_clamped_when_the_view_shrinks() {
        let (mut dash, _) = dashboard(numbered(45), 20);
        dash.go_to_page(3);
        assert_eq!(dash.page_number(), 3);

        dash.set_filters(OrderFilters {
            search: "ORD-100".to_string(),
            ..OrderFilters::default()
        });
        assert_eq!(dash.page_number(), 1);
        assert_eq!(dash.current_page().0.len(), 10);
    }

    #[test]
    fn page_number_is_clamped_when_a_status_change_empties_the_page() {
        let (mut dash, _) = dashboard(numbered(21), 20);
        dash.set_filters(OrderFilters {
            status: StatusFilter::Only(OrderStatus::Pending),
            ..OrderFilters::default()
        });
        dash.go_to_page(2);
        assert_eq!(dash.page_number(), 2);

        let last_on_page_two = dash.current_page().0[0].id.clone();
        dash.update_single_status(&last_on_page_two, OrderStatus::Shipped)
            .unwrap();
        assert_eq!(dash.page_number(), 1);
    }

    #[test]
    fn page_navigation_clamps_at_both_ends() {
        let (mut dash, _) = dashboard(numbered(30), 20);
        dash.prev_page();
        assert_eq!(dash.page_number(), 1);
        dash.next_page();
        dash.next_page();
        assert_eq!(dash.page_number(), 2);
        dash.go_to_page(0);
        assert_eq!(dash.page_number(), 1);
    }

    #[test]
    fn select_all_on_page_only_touches_the_visible_page() {
        let (mut dash, _) = dashboard(numbered(25), 20);
        dash.set_sort(SortKey::Id);
        dash.go_to_page(2);
        dash.select_all_on_page();

        assert_eq!(dash.selection().len(), 5);
        assert!(dash.selection().contains("ORD-1024"));
        assert!(!dash.selection().contains("ORD-1000"));

        dash.select_all_on_page();
        assert!(dash.selection().is_empty());
    }

    #[test]
    fn set_sort_toggles_direction_for_the_same_key() {
        let (mut dash, _) = dashboard(numbered(1), 20);
        dash.set_sort(SortKey::Total);
        assert_eq!(dash.sort(), SortConfig::new(SortKey::Total, SortDirection::Asc));
        dash.set_sort(SortKey::Total);
        assert_eq!(dash.sort(), SortConfig::new(SortKey::Total, SortDirection::Desc));
        dash.set_sort(SortKey::Id);
        assert_eq!(dash.sort(), SortConfig::new(SortKey::Id, SortDirection::Asc));
    }

    #[test]
    fn update_single_status_reports_changes_only() {
        let (mut dash, notifier) = dashboard(numbered(1), 20);

        let previous = dash
            .update_single_status("ORD-1000", OrderStatus::Pending)
            .unwrap();
        assert_eq!(previous, OrderStatus::Pending);
        assert!(notifier.events().is_empty());

        dash.update_single_status("ORD-1000", OrderStatus::Delivered)
            .unwrap();
        assert_eq!(
            notifier.events(),
            vec![DashboardEvent::StatusChanged {
                id: "ORD-1000".to_string(),
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            }]
        );

        let err = dash
            .update_single_status("ORD-4242", OrderStatus::Shipped)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn received_order_goes_first_and_is_announced() {
        let (mut dash, notifier) = dashboard(numbered(2), 20);
        dash.receive_order(order("ORD-5000", OrderStatus::Pending, 100))
            .unwrap();

        assert_eq!(dash.store().len(), 3);
        assert_eq!(dash.store().all()[0].id, "ORD-5000");
        assert_eq!(
            notifier.events(),
            vec![DashboardEvent::OrderArrived {
                id: "ORD-5000".to_string()
            }]
        );
        assert!(dash.receive_order(order("ORD-5000", OrderStatus::Pending, 100)).is_err());
    }

    #[test]
    fn progression_skips_terminal_orders() {
        let (mut dash, _) = dashboard(
            vec![
                order("ORD-1", OrderStatus::Delivered, 100),
                order("ORD-2", OrderStatus::Processing, 100),
                order("ORD-3", OrderStatus::Cancelled, 100),
            ],
            20,
        );
        for pick in [0.0, 0.5, 0.999] {
            let touched = dash.progress_random_order(pick, OrderStatus::Processing);
            assert_eq!(touched.as_deref(), Some("ORD-2"));
        }
        assert_eq!(dash.order("ORD-1").unwrap().status, OrderStatus::Delivered);
        assert_eq!(dash.order("ORD-3").unwrap().status, OrderStatus::Cancelled);
    }

    #[test]
    fn progression_without_eligible_orders_is_a_no_op() {
        let (mut dash, notifier) = dashboard(
            vec![order("ORD-1", OrderStatus::Delivered, 100)],
            20,
        );
        assert!(dash.progress_random_order(0.3, OrderStatus::Pending).is_none());
        assert_eq!(dash.order("ORD-1").unwrap().status, OrderStatus::Delivered);
        assert!(notifier.events().is_empty());
    }

    #[test]
    fn progression_allows_same_status_transitions() {
        let (mut dash, notifier) = dashboard(numbered(1), 20);
        let touched = dash.progress_random_order(0.0, OrderStatus::Pending);
        assert_eq!(touched.as_deref(), Some("ORD-1000"));
        assert_eq!(notifier.events().len(), 1);
    }

    #[test]
    fn stats_follow_the_filtered_view() {
        let (mut dash, _) = dashboard(
            vec![
                order("ORD-1", OrderStatus::Pending, 10_000),
                order("ORD-2", OrderStatus::Shipped, 30_000),
            ],
            20,
        );
        dash.set_filters(OrderFilters {
            amount_range: AmountRange::new(BigDecimal::from(200), BigDecimal::from(1000)),
            ..OrderFilters::default()
        });
        let stats = dash.stats();
        assert_eq!(stats.total_orders, 1);
        assert_eq!(stats.by_status.shipped, 1);
    }

    #[test]
    fn snapshot_describes_the_current_page() {
        let (mut dash, _) = dashboard(numbered(45), 20);
        dash.set_sort(SortKey::Id);
        dash.go_to_page(3);
        dash.select_all_on_page();

        let snapshot = dash.snapshot();

        assert_eq!(snapshot.orders.len(), 5);
        assert_eq!(snapshot.page.page_number, 3);
        assert_eq!(snapshot.page.total_pages, 3);
        assert_eq!(snapshot.page_window, vec![1, 2, 3]);
        assert_eq!(snapshot.page_selection, PageSelection::All);
        assert_eq!(snapshot.selected_ids.len(), 5);
        assert_eq!(snapshot.stats.total_orders, 45);
    }

    #[test]
    fn export_uses_the_current_view() {
        let (mut dash, notifier) = dashboard(numbered(3), 20);
        dash.set_filters(OrderFilters {
            search: "ORD-1001".to_string(),
            ..OrderFilters::default()
        });
        let csv = dash.export_csv();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.ends_with("ORD-1001,Alice Johnson,pending,10.00,2024-05-01"));
        assert_eq!(notifier.events(), vec![DashboardEvent::Exported { rows: 1 }]);
    }
}
