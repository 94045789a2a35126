use crate::domain::events::DashboardEvent;
use crate::domain::ports::NotificationSink;

/// Renders dashboard events as log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, event: &DashboardEvent) {
        if event.is_error() {
            log::warn!("{}", event);
        } else {
            log::info!("{}", event);
        }
    }
}
