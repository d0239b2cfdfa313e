/// Name of the persisted board blob
/// Shared with the web client so existing local data keeps loading
pub const DEFAULT_STORAGE_KEY: &str = "task-manager-storage";

/// Version written into every persisted blob
pub const PERSISTED_STATE_VERSION: u32 = 0;

/// Tasks a free profile may hold before task creation is gated
pub const FREE_TASK_LIMIT: usize = 4;

/// Columns that ship with every board and can never be deleted
pub const DEFAULT_COLUMN_IDS: [&str; 3] = ["todo", "in-progress", "done"];

/// Features listed on the upgrade prompt
pub const PRO_FEATURES: [&str; 4] = [
    "Unlimited Tasks Creation",
    "Unlimited Custom Kanban Columns",
    "Advanced Productivity Analytics",
    "Priority Support Team Access",
];

// =============================================================================
// Payments
// =============================================================================

/// Gateway amounts are expressed in the smallest currency unit (paise)
pub const MINOR_UNITS_PER_MAJOR: f64 = 100.0;

/// Currency used for orders when none is configured
pub const DEFAULT_CURRENCY: &str = "INR";

/// Receipt numbers are drawn from `0..RECEIPT_RANGE`
pub const RECEIPT_RANGE: u32 = 10_000;

/// Placeholder credentials used when no gateway keys are configured
pub const PLACEHOLDER_KEY_ID: &str = "dummy_key_id";
pub const PLACEHOLDER_KEY_SECRET: &str = "dummy_key_secret";

/// Merchant name shown in the checkout widget
pub const CHECKOUT_MERCHANT_NAME: &str = "TaskFlow Premium";

/// Brand colour passed to the checkout widget
pub const CHECKOUT_THEME_COLOR: &str = "#10b981";

// =============================================================================
// Error Messages
// =============================================================================

/// Returned when an order request lacks amount or planName
pub const ERR_ORDER_FIELDS_REQUIRED: &str = "Amount and planName are required";

/// Returned when the gateway refuses or fails an order
pub const ERR_ORDER_GATEWAY_FAILED: &str =
    "Failed to generate Razorpay order. Did you provide your API Keys in .env.local?";

/// Shown when the order backend cannot be reached
pub const ERR_BACKEND_UNREACHABLE: &str =
    "Could not connect to the Razorpay backend server. Make sure it's running on port 3001!";

/// Shown when sign in is attempted without an identity provider
pub const ERR_AUTH_NOT_CONFIGURED: &str =
    "Supabase credentials missing! App is running without auth backend.";

/// Fallback for identity provider errors without a message
pub const ERR_AUTH_GENERIC: &str = "An error occurred during authentication.";

/// Shown after a sign up that still needs email confirmation
pub const MSG_SIGN_UP_CONFIRM_EMAIL: &str =
    "Registration successful! Check your email for a confirmation link.";

/// Returned when the order amount is negative or not finite
pub const ERR_ORDER_AMOUNT_INVALID: &str = "Amount must be a positive number";
