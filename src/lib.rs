//! TaskFlow board core and order backend
//!
//! The board store, drag resolution, entitlement gate and auth gate used by
//! the client, plus the order-creation endpoint served by the binary.

pub mod auth;
pub mod board;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod payment;
pub mod routes;

pub use board::BoardStore;
pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};

use std::sync::Arc;

use payment::{PaymentGateway, RazorpayClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gateway: Arc<dyn PaymentGateway>,
}

impl AppState {
    /// Create a new AppState with the given configuration and gateway
    pub fn new(config: Config, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { config, gateway }
    }

    /// AppState talking to the gateway named in `config`
    pub fn from_config(config: Config) -> Self {
        let gateway = Arc::new(RazorpayClient::new(&config.gateway));
        Self::new(config, gateway)
    }
}
