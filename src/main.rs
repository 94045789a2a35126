use std::path::{Path, PathBuf};
use std::sync::Arc;

use bigdecimal::RoundingMode;
use chrono::Utc;
use dotenvy::dotenv;
use tokio::time::{interval_at, Instant};

use order_dashboard::domain::ports::{OrderRepository, OrderSource};
use order_dashboard::infrastructure::csv_export::export_file_name;
use order_dashboard::infrastructure::mock_data::MockOrderSource;
use order_dashboard::infrastructure::notifier::LogNotifier;
use order_dashboard::infrastructure::order_repo::InMemoryOrderRepository;
use order_dashboard::{AppError, Dashboard, DashboardConfig, DashboardHandle, DashboardRuntime};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = DashboardConfig::from_env()?;

    let source = Arc::new(match config.feed.seed {
        Some(seed) => MockOrderSource::seeded(seed),
        None => MockOrderSource::new(),
    });
    let orders = source.initial_orders(config.initial_orders)?;
    let store = InMemoryOrderRepository::with_orders(orders)?;
    log::info!("Seeded {} mock orders", store.len());

    let dashboard = Dashboard::new(store, config.page_size, Box::new(LogNotifier));
    let mut handle = DashboardRuntime::spawn(dashboard);
    handle.start_feed(config.feed.clone(), source);

    let mut ticker = interval_at(
        Instant::now() + config.snapshot_interval,
        config.snapshot_interval,
    );
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal?;
                log::info!("Shutdown requested");
                break;
            }
            _ = ticker.tick() => log_snapshot(&handle).await?,
        }
    }

    let csv = match &config.export_path {
        Some(_) => Some(handle.export_csv().await?),
        None => None,
    };
    let dashboard = handle.shutdown().await?;
    log::info!(
        "Dashboard stopped with {} orders in the store",
        dashboard.store().len()
    );

    if let (Some(path), Some(csv)) = (&config.export_path, csv) {
        let path = export_target(path);
        std::fs::write(&path, csv)?;
        log::info!("Exported current view to {}", path.display());
    }
    Ok(())
}

async fn log_snapshot(handle: &DashboardHandle<InMemoryOrderRepository>) -> Result<(), AppError> {
    let snapshot = handle.snapshot().await?;
    log::info!(
        "{} orders in view, revenue {}, {} pending, page {}/{}, {} selected",
        snapshot.stats.total_orders,
        snapshot.stats.total_revenue.with_scale_round(2, RoundingMode::HalfUp),
        snapshot.stats.by_status.pending,
        snapshot.page.page_number,
        snapshot.page.total_pages,
        snapshot.selected_ids.len()
    );
    log::debug!("Snapshot: {}", serde_json::to_string(&snapshot)?);
    Ok(())
}

/// A directory gets a dated file name inside it.
fn export_target(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(export_file_name(Utc::now()))
    } else {
        path.to_path_buf()
    }
}
