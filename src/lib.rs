pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infrastructure;

pub use application::dashboard::{Dashboard, DashboardSnapshot};
pub use application::feed::{FeedConfig, FeedGuard, SimulatedFeed};
pub use application::runtime::{DashboardHandle, DashboardRuntime};
pub use config::{ConfigError, DashboardConfig};
pub use errors::AppError;
