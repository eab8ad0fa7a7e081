use serde::Serialize;
use thiserror::Error;

/// Crate-wide error type.
///
/// Local validation failures are distinguished from transport failures and
/// from rejections carrying a backend-supplied message, mirroring the three
/// classes of user-visible errors in the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Please enter a coupon code")]
    EmptyCouponCode,

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Rejection with a message supplied by the backend (validation,
    /// business rule, expired coupon, and so on).
    #[error("{0}")]
    Backend(String),

    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for StorefrontError {
    fn from(err: validator::ValidationErrors) -> Self {
        StorefrontError::ValidationError(err.to_string())
    }
}

impl From<url::ParseError> for StorefrontError {
    fn from(err: url::ParseError) -> Self {
        StorefrontError::Configuration(format!("invalid URL: {}", err))
    }
}

/// Failure of a card checkout sequence, tagged by the step that failed.
///
/// `OrderSaveFailed` is the known inconsistency of the flow: the provider has
/// already captured the payment but the order record was not persisted. The
/// variant carries the payment intent id so a caller can reconcile out of
/// band; nothing is retried automatically.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Local precondition failed before any network call was made.
    #[error(transparent)]
    Precondition(#[from] StorefrontError),

    #[error("Failed to create payment intent: {source}")]
    IntentCreation { source: StorefrontError },

    /// The payment provider rejected the card. The message is the provider's,
    /// surfaced verbatim.
    #[error("{message}")]
    CardDeclined { message: String },

    /// Confirmation returned without error but the intent did not reach the
    /// succeeded status.
    #[error("Payment failed")]
    PaymentNotCompleted,

    #[error("Order could not be saved after payment capture: {source}")]
    OrderSaveFailed {
        payment_intent_id: String,
        source: StorefrontError,
    },
}

impl CheckoutError {
    /// True when funds were captured by the provider before the failure, so
    /// the payment exists without a corresponding order record.
    pub fn payment_captured(&self) -> bool {
        matches!(self, CheckoutError::OrderSaveFailed { .. })
    }

    /// Payment intent id associated with the failure, when one was created.
    pub fn payment_intent_id(&self) -> Option<&str> {
        match self {
            CheckoutError::OrderSaveFailed {
                payment_intent_id, ..
            } => Some(payment_intent_id),
            _ => None,
        }
    }
}

/// Error reported by an injected payment provider during card confirmation.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error reported by an injected identity provider.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct IdentityError {
    pub message: String,
}

impl IdentityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<IdentityError> for StorefrontError {
    fn from(err: IdentityError) -> Self {
        StorefrontError::AuthError(err.message)
    }
}
