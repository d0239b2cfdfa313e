use std::env;

use crate::constants::{
    DEFAULT_CURRENCY, DEFAULT_STORAGE_KEY, PLACEHOLDER_KEY_ID, PLACEHOLDER_KEY_SECRET,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    pub storage_path: String,
    pub storage_key: String,
    pub backend_url: String,
    pub gateway: GatewayConfig,
    pub identity_provider: Option<IdentityProviderConfig>,
}

/// Payment gateway credentials and endpoint
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_url: String,
    pub key_id: String,
    pub key_secret: String,
    pub currency: String,
}

impl GatewayConfig {
    /// True when the placeholder credentials are in use
    pub fn is_placeholder(&self) -> bool {
        self.key_id == PLACEHOLDER_KEY_ID || self.key_secret == PLACEHOLDER_KEY_SECRET
    }
}

/// Identity provider endpoint; absent means the auth gate is bypassed
#[derive(Debug, Clone)]
pub struct IdentityProviderConfig {
    pub url: String,
    pub anon_key: String,
}

/// First variable in `names` that is set and non-empty
fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = first_var(&["SERVER_PORT", "PORT"])
            .unwrap_or_else(|| "3001".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let storage_path =
            env::var("STORAGE_PATH").unwrap_or_else(|_| "./data/taskflow.redb".to_string());
        let storage_key =
            env::var("STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());

        let backend_url = first_var(&["BACKEND_URL", "VITE_BACKEND_URL"])
            .unwrap_or_else(|| "http://localhost:3001".to_string());

        let gateway = GatewayConfig {
            api_url: env::var("RAZORPAY_API_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com".to_string()),
            key_id: first_var(&["RAZORPAY_KEY_ID", "VITE_RAZORPAY_KEY_ID"])
                .unwrap_or_else(|| PLACEHOLDER_KEY_ID.to_string()),
            key_secret: first_var(&["RAZORPAY_KEY_SECRET", "VITE_RAZORPAY_KEY_SECRET"])
                .unwrap_or_else(|| PLACEHOLDER_KEY_SECRET.to_string()),
            currency: env::var("ORDER_CURRENCY").unwrap_or_else(|_| DEFAULT_CURRENCY.to_string()),
        };

        let identity_provider = match (
            first_var(&["SUPABASE_URL", "VITE_SUPABASE_URL"]),
            first_var(&["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"]),
        ) {
            (Some(url), Some(anon_key)) => Some(IdentityProviderConfig { url, anon_key }),
            _ => {
                tracing::warn!(
                    "Identity provider credentials not found; authentication is bypassed"
                );
                None
            }
        };

        Ok(Config {
            server_host,
            server_port,
            allowed_origins,
            environment,
            storage_path,
            storage_key,
            backend_url,
            gateway,
            identity_provider,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
