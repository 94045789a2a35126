use std::fmt;

use serde::Serialize;

use super::order::OrderStatus;

/// Something the dashboard wants a human to notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DashboardEvent {
    OrderArrived {
        id: String,
    },
    StatusChanged {
        id: String,
        from: OrderStatus,
        to: OrderStatus,
    },
    BulkUpdated {
        count: usize,
        status: OrderStatus,
    },
    #[serde(rename = "no-selection-error")]
    NoSelection,
    Exported {
        rows: usize,
    },
}

impl DashboardEvent {
    pub fn is_error(&self) -> bool {
        matches!(self, DashboardEvent::NoSelection)
    }
}

impl fmt::Display for DashboardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardEvent::OrderArrived { id } => write!(f, "New order received: {}", id),
            DashboardEvent::StatusChanged { id, to, .. } => {
                write!(f, "Order {} status updated to {}", id, to)
            }
            DashboardEvent::BulkUpdated { count, status } => {
                write!(f, "Updated {} orders to {}", count, status)
            }
            DashboardEvent::NoSelection => f.write_str("No orders selected"),
            DashboardEvent::Exported { rows } => write!(f, "Exported {} orders to CSV", rows),
        }
    }
}
