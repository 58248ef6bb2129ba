//! Domain layer - Form model, validation rules and registration types.
//!
//! This crate contains pure logic with no I/O. The portal crate drives it
//! from user events and network responses.

pub mod constants;
pub mod error;
pub mod form;
pub mod registration;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use form::{FormControl, FormGroup, FormNode, FormStatus, NodeRef};
pub use registration::{sign_up_form, RegistrationResponse, UserRegistrationData};
pub use validation::{ErrorDetail, ValidationErrors, ValidationResult, ValidatorFn};
