use super::filters::{matches, OrderFilters};
use super::order::Order;
use super::sort::{compare, SortConfig};

/// Filter `orders`, then sort the survivors.
///
/// The sort is stable, so orders with equal keys keep their store order
/// (newest arrivals first). The store itself is never touched.
pub fn derive_view<'a>(
    orders: &'a [Order],
    filters: &OrderFilters,
    sort: &SortConfig,
) -> Vec<&'a Order> {
    let mut view: Vec<&Order> = orders
        .iter()
        .filter(|order| matches(order, filters))
        .collect();
    view.sort_by(|a, b| compare(a, b, sort.key, sort.direction));
    view
}

/// Length of the view without sorting it.
pub fn count_matching(orders: &[Order], filters: &OrderFilters) -> usize {
    orders.iter().filter(|order| matches(order, filters)).count()
}
