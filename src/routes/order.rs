use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::constants::ERR_ORDER_FIELDS_REQUIRED;
use crate::error::{AppError, Result};
use crate::models::{to_minor_units, CreateOrderRequest, CreateOrderResponse};
use crate::payment::OrderRequest;
use crate::AppState;

/// Create a gateway order for a plan purchase
///
/// Validates `amount` and `planName`, converts the amount to minor units and
/// forwards the order to the payment gateway. The response carries the
/// publishable key the checkout widget needs.
///
/// Returns 400 when either field is missing and 500 when the gateway fails.
pub async fn create_order(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!("Unreadable order request: {}", e);
        AppError::InvalidInput(ERR_ORDER_FIELDS_REQUIRED.to_string())
    })?;

    let (amount, plan_name) = payload
        .validate()
        .map_err(|msg| AppError::InvalidInput(msg.to_string()))?;

    let request = OrderRequest::for_plan(
        to_minor_units(amount),
        state.config.gateway.currency.as_str(),
        plan_name,
    );
    let order = state.gateway.create_order(&request).await?;

    tracing::info!(
        "Order {} created for plan {}: {} {}",
        order.id,
        plan_name,
        order.amount,
        order.currency
    );

    Ok(Json(CreateOrderResponse {
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        key_id: state.gateway.key_id().to_string(),
    }))
}
