//! Sign-in controller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use common::{AppError, AppResult};
use domain::validation::required;
use domain::{FormControl, FormGroup, FIELD_PASSWORD, FIELD_USER_NAME};

use super::{SubmitEvent, SubmitOutcome};
use crate::auth::AuthState;
use crate::clients::UserService;
use crate::notify::Notifier;

pub const SIGN_IN_SUCCESS_MESSAGE: &str = "Signed in successfully";
pub const SIGN_IN_FAILED_MESSAGE: &str = "Incorrect username or password";

fn sign_in_form() -> FormGroup {
    FormGroup::new()
        .control(
            FIELD_USER_NAME,
            FormControl::new("").with_validators([required()]),
        )
        .control(
            FIELD_PASSWORD,
            FormControl::new("").with_validators([required()]),
        )
}

/// Owns the sign-in form and stores the token on success.
pub struct SignInComponent {
    form: FormGroup,
    auth: Arc<AuthState>,
    user_service: Arc<dyn UserService>,
    notifier: Arc<dyn Notifier>,
}

impl SignInComponent {
    pub fn new(
        auth: Arc<AuthState>,
        user_service: Arc<dyn UserService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            form: sign_in_form(),
            auth,
            user_service,
            notifier,
        }
    }

    pub fn form(&self) -> &FormGroup {
        &self.form
    }

    pub fn input(&mut self, path: &str, value: impl Into<String>) -> AppResult<()> {
        Ok(self.form.set_value(path, value)?)
    }

    pub fn blur(&mut self, path: &str) -> AppResult<()> {
        Ok(self.form.mark_touched(path)?)
    }

    pub async fn submit(&mut self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();

        if self.form.is_invalid() {
            self.form.mark_all_as_touched();
            debug!(errors = ?self.form.error_map(), "Sign-in form invalid");
            return SubmitOutcome::Invalid;
        }

        let user_name = self.value(FIELD_USER_NAME);
        let password = self.value(FIELD_PASSWORD);

        match self.user_service.authenticate(&user_name, &password).await {
            Ok(token) => {
                self.auth.set_token(token.access_token);
                info!(user_name = %user_name, "Signed in");
                self.notifier.success(SIGN_IN_SUCCESS_MESSAGE);
                SubmitOutcome::Succeeded
            }
            Err(AppError::Unauthorized) | Err(AppError::Api { status: 400, .. }) => {
                info!(user_name = %user_name, "Credentials rejected");
                self.notifier.error(SIGN_IN_FAILED_MESSAGE);
                SubmitOutcome::Rejected(SIGN_IN_FAILED_MESSAGE.to_string())
            }
            Err(e) => {
                warn!(code = e.code(), "Sign-in request failed: {}", e);
                let message = e.user_message();
                self.notifier.error(&message);
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Forget the current token.
    pub fn sign_out(&self) {
        self.auth.clear();
        info!("Signed out");
    }

    fn value(&self, path: &str) -> String {
        self.form
            .control_at(path)
            .map(|control| control.value().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{MockUserService, TokenResponse};
    use crate::notify::MockNotifier;
    use mockall::predicate::eq;

    fn token() -> TokenResponse {
        TokenResponse {
            access_token: "jwt-token".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 86399,
        }
    }

    #[tokio::test]
    async fn test_success_stores_token() {
        let auth = Arc::new(AuthState::new());
        let mut service = MockUserService::new();
        service
            .expect_authenticate()
            .with(eq("john_doe"), eq("secret1"))
            .times(1)
            .returning(|_, _| Ok(token()));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_success()
            .with(eq(SIGN_IN_SUCCESS_MESSAGE))
            .times(1)
            .return_const(());

        let mut c = SignInComponent::new(auth.clone(), Arc::new(service), Arc::new(notifier));
        c.input("userName", "john_doe").unwrap();
        c.input("password", "secret1").unwrap();

        assert_eq!(c.submit(&mut SubmitEvent::new()).await, SubmitOutcome::Succeeded);
        assert_eq!(auth.bearer().as_deref(), Some("Bearer jwt-token"));

        c.sign_out();
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let auth = Arc::new(AuthState::new());
        let mut service = MockUserService::new();
        service.expect_authenticate().returning(|_, _| {
            Err(AppError::Api {
                status: 400,
                message: "invalid_grant".to_string(),
            })
        });
        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .with(eq(SIGN_IN_FAILED_MESSAGE))
            .times(1)
            .return_const(());

        let mut c = SignInComponent::new(auth.clone(), Arc::new(service), Arc::new(notifier));
        c.input("userName", "john_doe").unwrap();
        c.input("password", "wrong").unwrap();

        assert_eq!(
            c.submit(&mut SubmitEvent::new()).await,
            SubmitOutcome::Rejected(SIGN_IN_FAILED_MESSAGE.to_string())
        );
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_empty_form_is_not_sent() {
        let mut service = MockUserService::new();
        service.expect_authenticate().never();

        let mut c = SignInComponent::new(
            Arc::new(AuthState::new()),
            Arc::new(service),
            Arc::new(MockNotifier::new()),
        );

        assert_eq!(c.submit(&mut SubmitEvent::new()).await, SubmitOutcome::Invalid);
        assert!(c.form().control_at("password").unwrap().is_touched());
    }
}
