//! Registration payload and the sign-up form layout.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{
    FIELD_EMAIL, FIELD_FIRST_NAME, FIELD_LAST_NAME, FIELD_PASSWORD, FIELD_PASSWORDS,
    FIELD_PASSWORD_CONFIRM, FIELD_USER_NAME, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
    PASSWORDS_MISMATCH_MESSAGE, USER_NAME_MESSAGE,
};
use crate::error::{DomainError, DomainResult};
use crate::form::{FormControl, FormGroup};
use crate::validation::{
    email, is_valid_email, is_valid_user_name, max_length, min_length, passwords_are_equal,
    required, user_name, ValidatorFn,
};

/// Snapshot of a valid sign-up form, sent to the registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistrationData {
    #[validate(length(min = 1, message = "User name is required"))]
    pub user_name: String,
    #[validate(length(min = 6, max = 20, message = "Password must be 6 to 20 characters"))]
    pub password: String,
    #[validate(length(min = 6, max = 20, message = "Password must be 6 to 20 characters"))]
    pub password_confirm: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Payload fields carrying length rules, in form order.
const CHECKED_FIELDS: [&str; 5] = [
    "user_name",
    "password",
    "password_confirm",
    "email",
    "first_name",
];

impl UserRegistrationData {
    /// Take a snapshot of a sign-up form. Fails unless the form is valid.
    pub fn from_form(form: &FormGroup) -> DomainResult<Self> {
        if form.is_invalid() {
            return Err(DomainError::InvalidForm);
        }

        let field = |path: &str| -> DomainResult<String> {
            Ok(form.control_at(path)?.value().to_string())
        };
        let nested = |name: &str| format!("{}.{}", FIELD_PASSWORDS, name);

        Ok(Self {
            user_name: field(FIELD_USER_NAME)?,
            password: field(&nested(FIELD_PASSWORD))?,
            password_confirm: field(&nested(FIELD_PASSWORD_CONFIRM))?,
            email: field(FIELD_EMAIL)?,
            first_name: field(FIELD_FIRST_NAME)?,
            last_name: field(FIELD_LAST_NAME)?,
        })
    }

    /// Check the payload against every sign-up rule, independent of any
    /// form state. Returns the first failure in form field order.
    pub fn check(&self) -> DomainResult<()> {
        self.validate().map_err(|e| {
            let fields = e.field_errors();
            let message = CHECKED_FIELDS
                .iter()
                .filter_map(|field| {
                    fields.iter().find_map(|(key, errors)| {
                        let key: &str = key.as_ref();
                        (key == *field).then_some(*errors)
                    })
                })
                .flat_map(|errors| errors.iter())
                .find_map(|error| error.message.as_ref())
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| "Validation failed".to_string());
            DomainError::validation(message)
        })?;

        if !is_valid_user_name(&self.user_name) {
            return Err(DomainError::validation(USER_NAME_MESSAGE));
        }
        if !is_valid_email(&self.email) {
            return Err(DomainError::validation("Email is not valid."));
        }
        if self.password != self.password_confirm {
            return Err(DomainError::validation(PASSWORDS_MISMATCH_MESSAGE));
        }
        Ok(())
    }
}

/// Build the sign-up form.
///
/// `passwords` is a nested group so the equality rule can see both fields.
pub fn sign_up_form() -> FormGroup {
    let password_rules = || -> Vec<ValidatorFn> {
        vec![
            required(),
            min_length(MIN_PASSWORD_LENGTH),
            max_length(MAX_PASSWORD_LENGTH),
        ]
    };

    FormGroup::new()
        .control(
            FIELD_USER_NAME,
            FormControl::new("").with_validators([required(), user_name()]),
        )
        .group(
            FIELD_PASSWORDS,
            FormGroup::new()
                .control(
                    FIELD_PASSWORD,
                    FormControl::new("").with_validators(password_rules()),
                )
                .control(
                    FIELD_PASSWORD_CONFIRM,
                    FormControl::new("").with_validators(password_rules()),
                )
                .with_validators([passwords_are_equal()]),
        )
        .control(
            FIELD_EMAIL,
            FormControl::new("").with_validators([required(), email()]),
        )
        .control(
            FIELD_FIRST_NAME,
            FormControl::new("").with_validators([required()]),
        )
        .control(FIELD_LAST_NAME, FormControl::new(""))
}

/// Registration endpoint response. Field casing follows the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    #[serde(rename = "Succeeded")]
    pub succeeded: bool,
    #[serde(rename = "Errors", default)]
    pub errors: Vec<String>,
}

impl RegistrationResponse {
    pub fn success() -> Self {
        Self {
            succeeded: true,
            errors: Vec::new(),
        }
    }

    pub fn failure(errors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            succeeded: false,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    /// First server-reported error, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}
