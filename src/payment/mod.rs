pub mod checkout;
pub mod gateway;
pub mod plans;

pub use checkout::{
    complete_checkout, CheckoutClient, CheckoutError, CheckoutOptions, CheckoutStart,
    PaymentFailure, PaymentSuccess,
};
pub use gateway::{GatewayError, GatewayOrder, OrderNotes, OrderRequest, PaymentGateway, RazorpayClient};
pub use plans::{find_plan, Plan, PLANS};
