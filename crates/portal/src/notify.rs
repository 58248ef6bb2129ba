//! User notifications (toasts).

use tracing::{info, warn};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Sink for transient success and error messages shown to the user.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);
}

/// Notifier that writes every message to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "portal::toast", "{}", message);
    }

    fn error(&self, message: &str) {
        warn!(target: "portal::toast", "{}", message);
    }
}
