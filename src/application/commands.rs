use std::ops::ControlFlow;

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::DomainError;
use crate::domain::filters::OrderFilters;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::OrderRepository;
use crate::domain::sort::SortKey;

use super::dashboard::{Dashboard, DashboardSnapshot};

/// Something the simulated feed observed.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    Arrival(Order),
    /// `pick` in `[0, 1)` selects among the non-terminal orders.
    Progression { pick: f64, status: OrderStatus },
}

/// Every way the dashboard state can be read or changed.
#[derive(Debug)]
pub enum DashboardCommand {
    SetFilters(OrderFilters),
    ClearFilters,
    SetSort(SortKey),
    GoToPage(usize),
    NextPage,
    PrevPage,
    ToggleSelection(String),
    SelectAllOnPage,
    ClearSelection,
    BulkUpdateStatus {
        status: OrderStatus,
        reply: oneshot::Sender<Result<usize, DomainError>>,
    },
    UpdateStatus {
        id: String,
        status: OrderStatus,
        reply: oneshot::Sender<Result<OrderStatus, DomainError>>,
    },
    /// `feed` is the token of the feed that produced `event`; once it is
    /// cancelled the event is discarded.
    Feed {
        event: FeedEvent,
        feed: CancellationToken,
    },
    Snapshot(oneshot::Sender<DashboardSnapshot>),
    ExportCsv(oneshot::Sender<String>),
    Shutdown,
}

impl<R: OrderRepository> Dashboard<R> {
    /// Apply one command. Breaks on `Shutdown`.
    pub fn apply(&mut self, command: DashboardCommand) -> ControlFlow<()> {
        match command {
            DashboardCommand::SetFilters(filters) => self.set_filters(filters),
            DashboardCommand::ClearFilters => self.clear_filters(),
            DashboardCommand::SetSort(key) => self.set_sort(key),
            DashboardCommand::GoToPage(page) => self.go_to_page(page),
            DashboardCommand::NextPage => self.next_page(),
            DashboardCommand::PrevPage => self.prev_page(),
            DashboardCommand::ToggleSelection(id) => self.toggle_selection(&id),
            DashboardCommand::SelectAllOnPage => self.select_all_on_page(),
            DashboardCommand::ClearSelection => self.clear_selection(),
            DashboardCommand::BulkUpdateStatus { status, reply } => {
                // The caller may have stopped waiting; the update stands regardless.
                let _ = reply.send(self.bulk_update_status(status));
            }
            DashboardCommand::UpdateStatus { id, status, reply } => {
                let _ = reply.send(self.update_single_status(&id, status));
            }
            DashboardCommand::Feed { feed, .. } if feed.is_cancelled() => {
                log::warn!("Discarding feed event received after the feed was stopped");
            }
            DashboardCommand::Feed { event, .. } => self.apply_feed_event(event),
            DashboardCommand::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            DashboardCommand::ExportCsv(reply) => {
                let _ = reply.send(self.export_csv());
            }
            DashboardCommand::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn apply_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Arrival(order) => {
                if let Err(e) = self.receive_order(order) {
                    log::warn!("Dropped arriving order: {}", e);
                }
            }
            FeedEvent::Progression { pick, status } => {
                if self.progress_random_order(pick, status).is_none() {
                    log::debug!("No open orders to progress");
                }
            }
        }
    }
}
