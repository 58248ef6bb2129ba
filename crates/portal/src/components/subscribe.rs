//! Newsletter subscription controller.

use std::sync::Arc;

use tracing::debug;

use domain::validation::is_valid_email;

use crate::notify::Notifier;

pub const SUBSCRIBE_SUCCESS_MESSAGE: &str = "User subscribe successful";
pub const INVALID_EMAIL_MESSAGE: &str = "Email is not valid.";

pub struct SubscribeComponent {
    notifier: Arc<dyn Notifier>,
}

impl SubscribeComponent {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Check the address and notify. Returns whether it was accepted.
    pub fn on_submit(&self, email: &str) -> bool {
        if is_valid_email(email) {
            debug!(email, "Subscription accepted");
            self.notifier.success(SUBSCRIBE_SUCCESS_MESSAGE);
            true
        } else {
            self.notifier.error(INVALID_EMAIL_MESSAGE);
            false
        }
    }
}
