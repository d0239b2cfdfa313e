use serde::{Deserialize, Serialize};

use crate::constants::{ERR_ORDER_AMOUNT_INVALID, ERR_ORDER_FIELDS_REQUIRED, MINOR_UNITS_PER_MAJOR};

/// Body of `POST /api/create-order`
///
/// Both fields are optional at the type level so that a missing field
/// produces our own 400 rather than an extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(
        rename = "planName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub plan_name: Option<String>,
}

impl CreateOrderRequest {
    pub fn new(amount: f64, plan_name: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            plan_name: Some(plan_name.into()),
        }
    }

    /// Check required fields, returning `(amount, plan_name)`
    pub fn validate(&self) -> Result<(f64, &str), &'static str> {
        let amount = match self.amount {
            Some(amount) if amount != 0.0 => amount,
            _ => return Err(ERR_ORDER_FIELDS_REQUIRED),
        };
        let plan_name = match self.plan_name.as_deref() {
            Some(plan) if !plan.trim().is_empty() => plan,
            _ => return Err(ERR_ORDER_FIELDS_REQUIRED),
        };

        if !amount.is_finite() || amount < 0.0 || to_minor_units(amount) == 0 {
            return Err(ERR_ORDER_AMOUNT_INVALID);
        }

        Ok((amount, plan_name))
    }
}

/// Successful order creation, as returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order_id: String,
    /// Minor currency units
    pub amount: u64,
    pub currency: String,
    /// Publishable gateway key for the checkout widget
    pub key_id: String,
}

/// Error body produced by the order endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Convert a major-unit amount to the gateway's minor unit
pub fn to_minor_units(amount: f64) -> u64 {
    (amount * MINOR_UNITS_PER_MAJOR).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units() {
        assert_eq!(to_minor_units(119.0), 11900);
        assert_eq!(to_minor_units(0.5), 50);
        assert_eq!(to_minor_units(19.99), 1999);
    }

    #[test]
    fn test_validate_requires_both_fields() {
        let missing_amount: CreateOrderRequest =
            serde_json::from_str(r#"{"planName":"Standard Monthly"}"#).unwrap();
        assert_eq!(missing_amount.validate(), Err(ERR_ORDER_FIELDS_REQUIRED));

        let missing_plan: CreateOrderRequest = serde_json::from_str(r#"{"amount":119}"#).unwrap();
        assert_eq!(missing_plan.validate(), Err(ERR_ORDER_FIELDS_REQUIRED));

        let zero = CreateOrderRequest::new(0.0, "Standard Monthly");
        assert_eq!(zero.validate(), Err(ERR_ORDER_FIELDS_REQUIRED));

        let blank_plan = CreateOrderRequest::new(119.0, "  ");
        assert_eq!(blank_plan.validate(), Err(ERR_ORDER_FIELDS_REQUIRED));
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let request = CreateOrderRequest::new(-5.0, "Standard Monthly");
        assert_eq!(request.validate(), Err(ERR_ORDER_AMOUNT_INVALID));
    }

    #[test]
    fn test_validate_rejects_amount_below_one_minor_unit() {
        let request = CreateOrderRequest::new(0.001, "Standard Monthly");
        assert_eq!(request.validate(), Err(ERR_ORDER_AMOUNT_INVALID));

        let request = CreateOrderRequest::new(0.005, "Standard Monthly");
        assert_eq!(request.validate(), Ok((0.005, "Standard Monthly")));
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        let request = CreateOrderRequest::new(119.0, "Standard Monthly");
        assert_eq!(request.validate(), Ok((119.0, "Standard Monthly")));
    }
}
