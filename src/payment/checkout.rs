//! Client side of the payment flow
//!
//! Requests an order from the local backend, prepares the checkout widget
//! options and records the widget's success callback. The success callback
//! grants Pro locally with no server-side confirmation that the payment
//! actually settled.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::board::BoardStore;
use crate::config::Config;
use crate::constants::{CHECKOUT_MERCHANT_NAME, CHECKOUT_THEME_COLOR, ERR_BACKEND_UNREACHABLE};
use crate::models::{CreateOrderRequest, CreateOrderResponse, OrderErrorBody, Profile, ProfileUpdate};
use crate::payment::plans::find_plan;

/// Checkout failures surfaced to the user
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Could not reach order backend: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("Order creation failed: {error}")]
    Order {
        error: String,
        details: Option<Value>,
    },

    #[error("Unexpected response from order backend: {0}")]
    InvalidResponse(String),

    #[error("Unknown plan: {0}")]
    UnknownPlan(String),
}

impl CheckoutError {
    /// Text for the blocking alert shown to the user
    pub fn alert_message(&self) -> String {
        match self {
            CheckoutError::Unreachable(_) => ERR_BACKEND_UNREACHABLE.to_string(),
            CheckoutError::Order { error, details } => {
                let details = match details {
                    Some(details) => details.to_string(),
                    None => "\"No additional details provided.\"".to_string(),
                };
                format!(
                    "Failed to create Razorpay Order.\n\nError: {}\nDetails: {}",
                    error, details
                )
            }
            CheckoutError::InvalidResponse(msg) => format!("Failed to create Razorpay Order.\n\n{}", msg),
            CheckoutError::UnknownPlan(name) => format!("Unknown plan: {}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutTheme {
    pub color: String,
}

/// Parameters handed to the gateway's checkout widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutOptions {
    pub key: String,
    pub amount: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: Prefill,
    pub theme: CheckoutTheme,
}

impl CheckoutOptions {
    pub fn new(order: &CreateOrderResponse, plan_name: &str, profile: &Profile) -> Self {
        let name = if profile.name.trim().is_empty() {
            "TaskFlow User".to_string()
        } else {
            profile.name.clone()
        };
        let email = profile
            .email
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "user@example.com".to_string());

        Self {
            key: order.key_id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: CHECKOUT_MERCHANT_NAME.to_string(),
            description: format!("Subscription: {}", plan_name),
            order_id: order.order_id.clone(),
            prefill: Prefill { name, email },
            theme: CheckoutTheme {
                color: CHECKOUT_THEME_COLOR.to_string(),
            },
        }
    }
}

/// What starting a checkout produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStart {
    /// Profile is already Pro; no order was requested
    AlreadyPro,
    Ready(CheckoutOptions),
}

/// Payload of the widget's success callback
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentSuccess {
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

/// Payload of the widget's failure callback
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentFailure {
    pub description: String,
}

impl PaymentFailure {
    pub fn alert_message(&self) -> String {
        format!("Payment Failed: {}", self.description)
    }
}

/// HTTP client for the local order backend
pub struct CheckoutClient {
    backend_url: String,
    client: reqwest::Client,
}

impl CheckoutClient {
    pub fn new(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Client for the order backend named in `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.backend_url)
    }

    /// POST `{amount, planName}` to `/api/create-order`
    pub async fn create_order(
        &self,
        amount: f64,
        plan_name: &str,
    ) -> Result<CreateOrderResponse, CheckoutError> {
        let url = format!("{}/api/create-order", self.backend_url);
        let response = self
            .client
            .post(&url)
            .json(&CreateOrderRequest::new(amount, plan_name))
            .send()
            .await
            .map_err(CheckoutError::Unreachable)?;

        // A reply that is not JSON counts as a backend that is not there
        let body: Value = response.json().await.map_err(CheckoutError::Unreachable)?;

        // An order id decides success, whatever the status code says
        if body.get("order_id").is_some() {
            return serde_json::from_value(body)
                .map_err(|e| CheckoutError::InvalidResponse(e.to_string()));
        }

        match serde_json::from_value::<OrderErrorBody>(body) {
            Ok(err) => Err(CheckoutError::Order {
                error: err.error,
                details: err.details,
            }),
            Err(e) => Err(CheckoutError::InvalidResponse(e.to_string())),
        }
    }

    /// Request an order for the plan and build the widget options
    pub async fn begin_checkout(
        &self,
        profile: &Profile,
        amount: f64,
        plan_name: &str,
    ) -> Result<CheckoutStart, CheckoutError> {
        if profile.is_pro {
            return Ok(CheckoutStart::AlreadyPro);
        }

        let order = self.create_order(amount, plan_name).await.map_err(|e| {
            tracing::error!("Checkout for {} failed: {}", plan_name, e);
            e
        })?;

        Ok(CheckoutStart::Ready(CheckoutOptions::new(&order, plan_name, profile)))
    }

    /// Begin checkout for a catalogue plan, charging its listed price
    pub async fn begin_plan_checkout(
        &self,
        profile: &Profile,
        plan_name: &str,
    ) -> Result<CheckoutStart, CheckoutError> {
        let plan = find_plan(plan_name)
            .ok_or_else(|| CheckoutError::UnknownPlan(plan_name.to_string()))?;
        self.begin_checkout(profile, f64::from(plan.amount), plan.name)
            .await
    }
}

/// Record a success callback from the checkout widget
///
/// Grants Pro on the client's word. The payment id and signature are logged
/// but not verified.
pub fn complete_checkout(store: &mut BoardStore, payment: &PaymentSuccess) -> bool {
    tracing::info!(
        "Checkout reported success for payment {}; granting Pro without server verification",
        payment.razorpay_payment_id
    );

    store.update_profile(&ProfileUpdate {
        is_pro: Some(true),
        ..ProfileUpdate::default()
    })
}
