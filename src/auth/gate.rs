use std::sync::Arc;

use crate::auth::provider::{AuthError, GoTrueClient, IdentityProvider, Session};
use crate::board::BoardStore;
use crate::config::Config;
use crate::constants::MSG_SIGN_UP_CONFIRM_EMAIL;
use crate::models::ProfileUpdate;

/// Where the gate stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    /// No identity provider configured; protected content is open
    Bypassed,
    Authenticated(Session),
    Unauthenticated,
}

/// Session change notified by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
}

/// View the gate sends the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Loading,
    Login,
    Protected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn,
    /// Account created; the provider wants the email confirmed first
    ConfirmationPending(&'static str),
}

/// Route guard driven by identity provider sessions
pub struct AuthGate {
    provider: Option<Arc<dyn IdentityProvider>>,
    state: AuthState,
}

impl AuthGate {
    pub fn new(provider: Option<Arc<dyn IdentityProvider>>) -> Self {
        Self {
            provider,
            state: AuthState::Loading,
        }
    }

    /// Gate over the configured provider, if any
    pub fn from_config(config: &Config) -> Self {
        let provider = config
            .identity_provider
            .as_ref()
            .map(|c| Arc::new(GoTrueClient::new(c)) as Arc<dyn IdentityProvider>);
        Self::new(provider)
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn route(&self) -> Route {
        match self.state {
            AuthState::Loading => Route::Loading,
            AuthState::Unauthenticated => Route::Login,
            AuthState::Bypassed | AuthState::Authenticated(_) => Route::Protected,
        }
    }

    /// Leave `Loading` based on the provider's current session
    pub async fn initialize(&mut self, store: &mut BoardStore) {
        let Some(provider) = self.provider.clone() else {
            tracing::info!("No identity provider configured; auth gate bypassed");
            self.state = AuthState::Bypassed;
            return;
        };

        match provider.current_session().await {
            Ok(Some(session)) => self.authenticate(session, store),
            Ok(None) => self.state = AuthState::Unauthenticated,
            Err(e) => {
                tracing::warn!("Identity provider session lookup failed: {}", e);
                self.state = AuthState::Unauthenticated;
            }
        }
    }

    /// Apply a session change pushed by the provider
    pub fn handle_event(&mut self, event: SessionEvent, store: &mut BoardStore) {
        if !self.is_configured() {
            tracing::debug!("Ignoring session event while bypassed");
            return;
        }

        match event {
            SessionEvent::SignedIn(session) => self.authenticate(session, store),
            SessionEvent::SignedOut => {
                tracing::info!("Session ended");
                self.state = AuthState::Unauthenticated;
            }
        }
    }

    pub async fn sign_in(
        &mut self,
        email: &str,
        password: &str,
        store: &mut BoardStore,
    ) -> Result<(), AuthError> {
        let provider = self.provider.clone().ok_or(AuthError::NotConfigured)?;
        let session = provider.sign_in(email, password).await?;
        self.handle_event(SessionEvent::SignedIn(session), store);
        Ok(())
    }

    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        store: &mut BoardStore,
    ) -> Result<SignUpOutcome, AuthError> {
        let provider = self.provider.clone().ok_or(AuthError::NotConfigured)?;
        match provider.sign_up(email, password).await? {
            Some(session) => {
                self.handle_event(SessionEvent::SignedIn(session), store);
                Ok(SignUpOutcome::SignedIn)
            }
            None => Ok(SignUpOutcome::ConfirmationPending(MSG_SIGN_UP_CONFIRM_EMAIL)),
        }
    }

    /// End the session and wipe the local board
    ///
    /// Provider errors are logged and ignored; the store is cleared either way.
    pub async fn sign_out(&mut self, store: &mut BoardStore) {
        if let Some(provider) = self.provider.clone() {
            if let Err(e) = provider.sign_out().await {
                tracing::warn!("Provider sign out failed, clearing local state anyway: {}", e);
            }
            self.state = AuthState::Unauthenticated;
        }

        store.clear();
    }

    fn authenticate(&mut self, session: Session, store: &mut BoardStore) {
        tracing::info!("Authenticated as user {}", session.user.id);

        if let Some(email) = session.user.email.clone() {
            store.update_profile(&ProfileUpdate {
                email: Some(email),
                ..ProfileUpdate::default()
            });
        }
        self.state = AuthState::Authenticated(session);
    }
}
