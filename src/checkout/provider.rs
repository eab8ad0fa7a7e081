//! Payment-provider capability.
//!
//! The orchestrator never talks to a concrete payment SDK; it is handed an
//! implementation of [`PaymentProvider`] that wraps one. Card details stay
//! inside the provider's hosted input fields and reach this crate only as an
//! opaque payment-method handle.

use async_trait::async_trait;

use crate::errors::ProviderError;

/// Opaque handle to a payment method collected by the provider's hosted
/// fields (a tokenized card, never raw card data).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPaymentMethod {
    pub token: String,
}

impl CardPaymentMethod {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Terminal status of a confirmed payment intent as reported by the
/// provider. Anything other than `Succeeded` means the charge did not
/// complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentIntentStatus {
    Succeeded,
    Processing,
    RequiresAction,
    RequiresPaymentMethod,
    Canceled,
}

/// Result of a card confirmation that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub payment_intent_id: String,
    pub status: PaymentIntentStatus,
}

/// Injected payment-processor capability.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Whether the provider's client library has finished initializing.
    /// Submissions are ignored until this returns true.
    fn is_ready(&self) -> bool {
        true
    }

    /// Confirms the charge identified by `client_secret` with the given
    /// payment method. A returned error carries the provider's message,
    /// which is surfaced to the shopper verbatim.
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        method: &CardPaymentMethod,
    ) -> Result<PaymentConfirmation, ProviderError>;
}
