//! Notification sink that writes user-facing notices to tracing output.

use gestorq_application::{Notice, NoticeLevel, NotificationSink};
use tracing::{info, warn};

/// Notification sink for headless deployments; notices end up in the log.
#[derive(Clone, Debug)]
pub struct TracingNotificationSink;

impl TracingNotificationSink {
    /// Creates a new tracing notification sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(notice = %notice.message, "user notice"),
            NoticeLevel::Error => warn!(notice = %notice.message, "user notice"),
        }
    }
}
