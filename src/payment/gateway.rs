use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::GatewayConfig;
use crate::constants::RECEIPT_RANGE;

/// Order creation request sent to the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    /// Minor currency units
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
    pub notes: OrderNotes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderNotes {
    pub plan: String,
}

impl OrderRequest {
    /// Build a request for `plan` with a random receipt number
    pub fn for_plan(amount: u64, currency: impl Into<String>, plan: impl Into<String>) -> Self {
        let receipt_number = rand::rng().random_range(0..RECEIPT_RANGE);
        Self {
            amount,
            currency: currency.into(),
            receipt: format!("receipt_order_{}", receipt_number),
            notes: OrderNotes { plan: plan.into() },
        }
    }
}

/// Order record returned by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Gateway failures
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway rejected order ({status}): {description}")]
    Rejected { status: u16, description: String },
}

impl GatewayError {
    /// Upstream error text passed back to the client
    pub fn details(&self) -> String {
        match self {
            GatewayError::Http(e) => e.to_string(),
            GatewayError::Rejected { description, .. } => description.clone(),
        }
    }
}

/// A payment gateway able to issue orders
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> Result<GatewayOrder, GatewayError>;

    /// Publishable key handed to the checkout widget
    fn key_id(&self) -> &str;
}

/// Razorpay orders API client
pub struct RazorpayClient {
    api_url: String,
    key_id: String,
    key_secret: String,
    client: reqwest::Client,
}

impl RazorpayClient {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            client: reqwest::Client::new(),
        }
    }
}

/// Pull a human-readable description out of a gateway error body
fn error_description(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("description"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, request: &OrderRequest) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/v1/orders", self.api_url);
        tracing::debug!(
            "Requesting order of {} {} for plan {}",
            request.amount,
            request.currency,
            request.notes.plan
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                description: error_description(&body),
            });
        }

        let order: GatewayOrder = response.json().await?;
        tracing::info!("Gateway issued order {} for {} {}", order.id, order.amount, order.currency);
        Ok(order)
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }
}
