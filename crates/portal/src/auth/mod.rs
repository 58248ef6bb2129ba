//! Authentication: token state, route guard and request interceptor.

mod guard;
mod interceptor;
mod state;

pub use guard::{can_activate_all, AuthGuard, CanActivate};
pub use interceptor::{AuthInterceptor, HttpInterceptor, NO_AUTH_HEADER, NO_AUTH_VALUE};
pub use state::AuthState;
