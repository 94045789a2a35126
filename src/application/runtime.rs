use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::filters::OrderFilters;
use crate::domain::order::OrderStatus;
use crate::domain::ports::{OrderRepository, OrderSource};
use crate::domain::sort::SortKey;
use crate::errors::AppError;

use super::commands::DashboardCommand;
use super::dashboard::{Dashboard, DashboardSnapshot};
use super::feed::{FeedConfig, FeedGuard, SimulatedFeed};

const COMMAND_QUEUE_CAPACITY: usize = 256;

/// Runs a `Dashboard` on its own task. Timers and callers talk to it only
/// through the command queue, so mutations apply in the order they were sent.
pub struct DashboardRuntime;

impl DashboardRuntime {
    pub fn spawn<R: OrderRepository>(dashboard: Dashboard<R>) -> DashboardHandle<R> {
        let (commands, receiver) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let applier = tokio::spawn(run_applier(dashboard, receiver));

        DashboardHandle {
            commands,
            feed: None,
            applier,
        }
    }
}

async fn run_applier<R: OrderRepository>(
    mut dashboard: Dashboard<R>,
    mut receiver: mpsc::Receiver<DashboardCommand>,
) -> Dashboard<R> {
    log::info!("Dashboard applier started with {} orders", dashboard.store().len());

    while let Some(command) = receiver.recv().await {
        if dashboard.apply(command).is_break() {
            break;
        }
    }

    log::info!("Dashboard applier stopped");
    dashboard
}

/// Async front door to a running dashboard.
pub struct DashboardHandle<R> {
    commands: mpsc::Sender<DashboardCommand>,
    feed: Option<FeedGuard>,
    applier: JoinHandle<Dashboard<R>>,
}

impl<R: OrderRepository> DashboardHandle<R> {
    /// Start the simulated feed. A feed already running is left alone; a
    /// stopped one can be started again.
    pub fn start_feed(&mut self, config: FeedConfig, source: Arc<dyn OrderSource>) {
        if self.is_feed_running() {
            log::warn!("Simulated feed already running");
            return;
        }
        self.feed = Some(SimulatedFeed::start(
            config,
            source,
            self.commands.clone(),
            CancellationToken::new(),
        ));
    }

    pub fn is_feed_running(&self) -> bool {
        self.feed.as_ref().is_some_and(|feed| !feed.is_stopped())
    }

    /// Stop the feed and wait for its timers. Its events still queued are
    /// discarded when they reach the dashboard.
    pub async fn stop_feed(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.shutdown().await;
        }
    }

    pub async fn send(&self, command: DashboardCommand) -> Result<(), AppError> {
        self.commands.send(command).await?;
        Ok(())
    }

    pub async fn set_filters(&self, filters: OrderFilters) -> Result<(), AppError> {
        self.send(DashboardCommand::SetFilters(filters)).await
    }

    pub async fn clear_filters(&self) -> Result<(), AppError> {
        self.send(DashboardCommand::ClearFilters).await
    }

    pub async fn set_sort(&self, key: SortKey) -> Result<(), AppError> {
        self.send(DashboardCommand::SetSort(key)).await
    }

    pub async fn go_to_page(&self, page: usize) -> Result<(), AppError> {
        self.send(DashboardCommand::GoToPage(page)).await
    }

    pub async fn next_page(&self) -> Result<(), AppError> {
        self.send(DashboardCommand::NextPage).await
    }

    pub async fn prev_page(&self) -> Result<(), AppError> {
        self.send(DashboardCommand::PrevPage).await
    }

    pub async fn toggle_selection(&self, id: impl Into<String>) -> Result<(), AppError> {
        self.send(DashboardCommand::ToggleSelection(id.into())).await
    }

    pub async fn select_all_on_page(&self) -> Result<(), AppError> {
        self.send(DashboardCommand::SelectAllOnPage).await
    }

    pub async fn clear_selection(&self) -> Result<(), AppError> {
        self.send(DashboardCommand::ClearSelection).await
    }

    pub async fn bulk_update_status(&self, status: OrderStatus) -> Result<usize, AppError> {
        let (reply, response) = oneshot::channel();
        self.send(DashboardCommand::BulkUpdateStatus { status, reply })
            .await?;
        Ok(response.await??)
    }

    pub async fn update_status(
        &self,
        id: impl Into<String>,
        status: OrderStatus,
    ) -> Result<OrderStatus, AppError> {
        let (reply, response) = oneshot::channel();
        self.send(DashboardCommand::UpdateStatus {
            id: id.into(),
            status,
            reply,
        })
        .await?;
        Ok(response.await??)
    }

    pub async fn snapshot(&self) -> Result<DashboardSnapshot, AppError> {
        let (reply, response) = oneshot::channel();
        self.send(DashboardCommand::Snapshot(reply)).await?;
        Ok(response.await?)
    }

    pub async fn export_csv(&self) -> Result<String, AppError> {
        let (reply, response) = oneshot::channel();
        self.send(DashboardCommand::ExportCsv(reply)).await?;
        Ok(response.await?)
    }

    /// Tear down: the feed stops first, then the applier drains what was
    /// already queued and hands the dashboard back.
    pub async fn shutdown(mut self) -> Result<Dashboard<R>, AppError> {
        self.stop_feed().await;
        self.send(DashboardCommand::Shutdown).await?;
        self.applier
            .await
            .map_err(|e| AppError::Internal(format!("dashboard applier failed: {}", e)))
    }
}
