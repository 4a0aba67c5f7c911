//! Notification seam for user-facing outcomes.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Fire-and-forget sink. Implementations must not block or panic; there is
/// no way to report a delivery failure back to the workflow.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, level: NotifyLevel);
}

/// Routes notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        match level {
            NotifyLevel::Success | NotifyLevel::Info => {
                tracing::info!(target: "revu::notify", ?level, "{message}");
            }
            NotifyLevel::Warning => tracing::warn!(target: "revu::notify", "{message}"),
            NotifyLevel::Error => tracing::error!(target: "revu::notify", "{message}"),
        }
    }
}
