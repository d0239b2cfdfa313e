//! Auth gate over an external identity provider

pub mod gate;
pub mod provider;

pub use gate::{AuthGate, AuthState, Route, SessionEvent, SignUpOutcome};
pub use provider::{AuthError, GoTrueClient, IdentityProvider, Session, SessionUser};
