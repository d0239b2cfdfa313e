use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::IdentityProviderConfig;
use crate::constants::{ERR_AUTH_GENERIC, ERR_AUTH_NOT_CONFIGURED};

/// Identity attached to a session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: SessionUser,
}

/// Identity provider failures
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Identity provider is not configured")]
    NotConfigured,

    #[error("Identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Identity provider error ({status}): {message}")]
    Provider { status: u16, message: String },
}

impl AuthError {
    /// Message shown on the login view
    pub fn user_message(&self) -> String {
        match self {
            AuthError::NotConfigured => ERR_AUTH_NOT_CONFIGURED.to_string(),
            AuthError::Http(_) => ERR_AUTH_GENERIC.to_string(),
            AuthError::Provider { message, .. } if !message.is_empty() => message.clone(),
            AuthError::Provider { .. } => ERR_AUTH_GENERIC.to_string(),
        }
    }
}

/// External session-based identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Session currently held, if any
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Register; `None` means the account awaits email confirmation
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for a GoTrue-compatible auth REST API
pub struct GoTrueClient {
    base_url: String,
    anon_key: String,
    client: reqwest::Client,
    session: Mutex<Option<Session>>,
}

impl GoTrueClient {
    pub fn new(config: &IdentityProviderConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            client: reqwest::Client::new(),
            session: Mutex::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    fn store_session(&self, session: Option<Session>) {
        *self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session;
    }

    fn held_session(&self) -> Option<Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Send a request and return the JSON body of a successful response
    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<Value, AuthError> {
        let response = req.header("apikey", &self.anon_key).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if !status.is_success() {
            return Err(AuthError::Provider {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(body)
    }
}

/// GoTrue reports errors under several field names depending on endpoint
fn error_message(body: &Value) -> String {
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|field| body.get(field).and_then(Value::as_str))
        .or_else(|| body.as_str())
        .unwrap_or_default()
        .to_string()
}

fn parse_session(body: Value) -> Result<Session, AuthError> {
    serde_json::from_value(body).map_err(|e| AuthError::Provider {
        status: 200,
        message: format!("Malformed session response: {}", e),
    })
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.held_session())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let req = self
            .client
            .post(self.url("/token"))
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password });

        let session = parse_session(self.execute(req).await?)?;
        self.store_session(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AuthError> {
        let req = self
            .client
            .post(self.url("/signup"))
            .json(&Credentials { email, password });

        let body = self.execute(req).await?;
        if body.get("access_token").is_none() {
            return Ok(None);
        }

        let session = parse_session(body)?;
        self.store_session(Some(session.clone()));
        Ok(Some(session))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.held_session() else {
            return Ok(());
        };
        self.store_session(None);

        let req = self
            .client
            .post(self.url("/logout"))
            .bearer_auth(&session.access_token);
        self.execute(req).await?;
        Ok(())
    }
}
