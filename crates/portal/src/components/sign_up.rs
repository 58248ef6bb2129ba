//! Sign-up controller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use common::AppResult;
use domain::{sign_up_form, FormGroup, FormStatus, UserRegistrationData};

use super::{SubmitEvent, SubmitOutcome};
use crate::clients::UserService;
use crate::notify::Notifier;

pub const REGISTRATION_SUCCESS_MESSAGE: &str = "User registration successful";

/// Shown when the backend refuses without giving a reason.
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

/// Owns the sign-up form and submits it to the user service.
pub struct SignUpComponent {
    form: FormGroup,
    user_data: Option<UserRegistrationData>,
    user_service: Arc<dyn UserService>,
    notifier: Arc<dyn Notifier>,
}

impl SignUpComponent {
    pub fn new(user_service: Arc<dyn UserService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            form: sign_up_form(),
            user_data: None,
            user_service,
            notifier,
        }
    }

    pub fn form(&self) -> &FormGroup {
        &self.form
    }

    /// Last submitted snapshot. Dropped as soon as the form turns invalid.
    pub fn user_data(&self) -> Option<&UserRegistrationData> {
        self.user_data.as_ref()
    }

    /// User typed into the control at `path`.
    pub fn input(&mut self, path: &str, value: impl Into<String>) -> AppResult<()> {
        self.form.set_value(path, value)?;
        self.on_status_change();
        Ok(())
    }

    /// Control at `path` lost focus.
    pub fn blur(&mut self, path: &str) -> AppResult<()> {
        self.form.mark_touched(path)?;
        self.on_status_change();
        Ok(())
    }

    /// Handle a submit event.
    ///
    /// An invalid form is marked touched so every error becomes visible,
    /// and nothing is sent. A valid form is snapshotted and registered
    /// exactly once.
    pub async fn submit(&mut self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();

        if self.form.is_invalid() {
            self.form.mark_all_as_touched();
            debug!(errors = ?self.form.error_map(), "Sign-up form invalid");
            return SubmitOutcome::Invalid;
        }

        let data = match UserRegistrationData::from_form(&self.form) {
            Ok(data) => data,
            Err(e) => {
                warn!("Could not snapshot sign-up form: {}", e);
                return SubmitOutcome::Invalid;
            }
        };
        self.user_data = Some(data.clone());

        match self.user_service.register_user(&data).await {
            Ok(response) if response.succeeded => {
                info!(user_name = %data.user_name, "User registered");
                self.notifier.success(REGISTRATION_SUCCESS_MESSAGE);
                SubmitOutcome::Succeeded
            }
            Ok(response) => {
                let message = response
                    .first_error()
                    .unwrap_or(REGISTRATION_FAILED_MESSAGE)
                    .to_string();
                info!(reason = %message, "Registration refused");
                self.notifier.error(&message);
                SubmitOutcome::Rejected(message)
            }
            Err(e) => {
                warn!(code = e.code(), "Registration request failed: {}", e);
                let message = e.user_message();
                self.notifier.error(&message);
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn on_status_change(&mut self) {
        if self.user_data.is_some() && self.form.status() == FormStatus::Invalid {
            debug!("Sign-up form became invalid, dropping snapshot");
            self.user_data = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockUserService;
    use crate::notify::MockNotifier;
    use common::AppError;
    use domain::{RegistrationResponse, ERROR_CUSTOM, ERROR_REQUIRED};
    use mockall::predicate::eq;

    fn component(service: MockUserService, notifier: MockNotifier) -> SignUpComponent {
        SignUpComponent::new(Arc::new(service), Arc::new(notifier))
    }

    fn fill(c: &mut SignUpComponent) {
        c.input("userName", "john_doe").unwrap();
        c.input("passwords.password", "secret1").unwrap();
        c.input("passwords.passwordConfirm", "secret1").unwrap();
        c.input("email", "john@example.com").unwrap();
        c.input("firstName", "John").unwrap();
        c.input("lastName", "Doe").unwrap();
    }

    fn expected_data() -> UserRegistrationData {
        UserRegistrationData {
            user_name: "john_doe".to_string(),
            password: "secret1".to_string(),
            password_confirm: "secret1".to_string(),
            email: "john@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
        }
    }

    #[tokio::test]
    async fn test_invalid_submit_marks_touched_and_skips_registration() {
        let mut service = MockUserService::new();
        service.expect_register_user().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_success().never();
        notifier.expect_error().never();

        let mut c = component(service, notifier);
        c.input("userName", "x").unwrap();

        let mut event = SubmitEvent::new();
        let outcome = c.submit(&mut event).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(event.default_prevented());
        assert!(c.form().is_touched());
        for path in ["userName", "passwords", "passwords.password", "email", "lastName"] {
            assert!(c.form().get(path).unwrap().is_touched(), "{path} not touched");
        }

        let errors = c.form().error_map();
        assert!(errors["userName"].contains(ERROR_CUSTOM));
        assert!(errors["email"].contains(ERROR_REQUIRED));
    }

    #[tokio::test]
    async fn test_valid_submit_registers_once_with_snapshot() {
        let mut service = MockUserService::new();
        service
            .expect_register_user()
            .with(eq(expected_data()))
            .times(1)
            .returning(|_| Ok(RegistrationResponse::success()));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_success()
            .with(eq(REGISTRATION_SUCCESS_MESSAGE))
            .times(1)
            .return_const(());
        notifier.expect_error().never();

        let mut c = component(service, notifier);
        fill(&mut c);

        let outcome = c.submit(&mut SubmitEvent::new()).await;
        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(c.user_data(), Some(&expected_data()));
    }

    #[tokio::test]
    async fn test_server_rejection_shows_first_error() {
        let mut service = MockUserService::new();
        service
            .expect_register_user()
            .times(1)
            .returning(|_| Ok(RegistrationResponse::failure(["X", "Y"])));
        let mut notifier = MockNotifier::new();
        notifier.expect_error().with(eq("X")).times(1).return_const(());
        notifier.expect_success().never();

        let mut c = component(service, notifier);
        fill(&mut c);

        let outcome = c.submit(&mut SubmitEvent::new()).await;
        assert_eq!(outcome, SubmitOutcome::Rejected("X".to_string()));
    }

    #[tokio::test]
    async fn test_rejection_without_errors_uses_fallback() {
        let mut service = MockUserService::new();
        service
            .expect_register_user()
            .returning(|_| Ok(RegistrationResponse::failure(Vec::<String>::new())));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .with(eq(REGISTRATION_FAILED_MESSAGE))
            .times(1)
            .return_const(());

        let mut c = component(service, notifier);
        fill(&mut c);

        let outcome = c.submit(&mut SubmitEvent::new()).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(REGISTRATION_FAILED_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let mut service = MockUserService::new();
        service
            .expect_register_user()
            .times(1)
            .returning(|_| Err(AppError::ServiceUnavailable("502".to_string())));
        let mut notifier = MockNotifier::new();
        notifier.expect_error().times(1).return_const(());

        let mut c = component(service, notifier);
        fill(&mut c);

        let outcome = c.submit(&mut SubmitEvent::new()).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_snapshot_dropped_when_form_turns_invalid() {
        let mut service = MockUserService::new();
        service
            .expect_register_user()
            .returning(|_| Ok(RegistrationResponse::success()));
        let mut notifier = MockNotifier::new();
        notifier.expect_success().return_const(());

        let mut c = component(service, notifier);
        fill(&mut c);
        c.submit(&mut SubmitEvent::new()).await;
        assert!(c.user_data().is_some());

        c.input("passwords.passwordConfirm", "other12").unwrap();
        assert!(c.user_data().is_none());
    }

    #[test]
    fn test_unknown_path_is_an_error() {
        let mut c = component(MockUserService::new(), MockNotifier::new());
        assert!(c.input("nickname", "x").is_err());
        assert!(c.blur("passwords").is_err());
    }

    #[test]
    fn test_mismatch_hidden_until_interaction() {
        let mut c = component(MockUserService::new(), MockNotifier::new());
        assert!(!c.form().error_map().contains_key("passwords"));

        c.input("passwords.password", "secret1").unwrap();
        assert!(c.form().error_map()["passwords"].contains(ERROR_CUSTOM));

        c.input("passwords.passwordConfirm", "secret1").unwrap();
        assert!(!c.form().error_map().contains_key("passwords"));
    }
}
