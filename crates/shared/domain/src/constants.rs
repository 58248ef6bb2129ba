//! Domain-level constants.
//!
//! These constants define the form layout and validation rules.

// =============================================================================
// Form Fields
// =============================================================================

pub const FIELD_USER_NAME: &str = "userName";
pub const FIELD_PASSWORDS: &str = "passwords";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_PASSWORD_CONFIRM: &str = "passwordConfirm";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";

/// Separator for nested control paths (`passwords.password`)
pub const PATH_SEPARATOR: char = '.';

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length requirement
pub const MAX_PASSWORD_LENGTH: usize = 20;

/// User name: 5 to 30 word characters or `.$@*!`
pub const USER_NAME_PATTERN: &str = r"^[A-Za-z0-9_.$@*!]{5,30}$";

/// Phone: optional `+`, optional parenthesised area code, optional separators
pub const PHONE_PATTERN: &str = r"^\+?\(?[0-9]{3}\)?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$";

/// Email address, shared by sign-up and subscription forms
pub const EMAIL_PATTERN: &str = r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#;

// =============================================================================
// Authentication
// =============================================================================

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

// =============================================================================
// Error Keys
// =============================================================================

pub const ERROR_REQUIRED: &str = "required";
pub const ERROR_MIN_LENGTH: &str = "minlength";
pub const ERROR_MAX_LENGTH: &str = "maxlength";
pub const ERROR_PATTERN: &str = "pattern";
pub const ERROR_CUSTOM: &str = "custom";

// =============================================================================
// Messages
// =============================================================================

pub const USER_NAME_MESSAGE: &str = "Min length:5, can't contain whitespaces & special symbols.";
pub const PHONE_MESSAGE: &str = "Invalid phone number";
pub const PASSWORDS_MISMATCH_MESSAGE: &str = "Passwords are not equal";
