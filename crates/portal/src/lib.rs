//! Portal client library.
//!
//! Drives the sign-up, sign-in and subscribe forms, and gates routes and
//! outgoing requests on the current access token.

pub mod auth;
pub mod clients;
pub mod components;
pub mod notify;
pub mod state;

pub use auth::{AuthGuard, AuthInterceptor, AuthState, CanActivate, HttpInterceptor};
pub use clients::{HttpClient, TokenResponse, UserClient, UserService};
pub use components::{
    SignInComponent, SignUpComponent, SubmitEvent, SubmitOutcome, SubscribeComponent,
};
pub use notify::{Notifier, TracingNotifier};
pub use state::AppState;
