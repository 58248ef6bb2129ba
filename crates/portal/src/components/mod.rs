//! Form controllers behind the sign-up, sign-in and subscribe screens.
//!
//! Each controller owns its form tree and is driven by explicit events
//! (`input`, `blur`, `submit`). Services arrive through the constructor.

mod sign_in;
mod sign_up;
mod subscribe;

pub use sign_in::{SignInComponent, SIGN_IN_FAILED_MESSAGE, SIGN_IN_SUCCESS_MESSAGE};
pub use sign_up::{SignUpComponent, REGISTRATION_FAILED_MESSAGE, REGISTRATION_SUCCESS_MESSAGE};
pub use subscribe::{SubscribeComponent, INVALID_EMAIL_MESSAGE, SUBSCRIBE_SUCCESS_MESSAGE};

/// Browser-style submit event. Controllers always cancel the default
/// action.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Form was invalid; all fields were marked touched and nothing was sent
    Invalid,
    /// The backend accepted the request
    Succeeded,
    /// The backend answered but refused; carries the message shown
    Rejected(String),
    /// The request did not complete; carries the message shown
    Failed(String),
}
