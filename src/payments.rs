//! Payments
//!
//! Boundary to the external payment provider. The checkout core never moves
//! money itself; it hands a [`PaymentRequest`] to a [`PaymentCapability`] and
//! interprets the result.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use thiserror::Error;

/// Amount, currency and description submitted to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Amount due, fixed to the currency's minor-unit precision.
    pub amount: Decimal,

    /// ISO 4217 currency code (e.g. `USD`).
    pub currency: String,

    /// Human-readable description shown by the provider.
    pub description: String,
}

/// Successful response from the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    /// Provider-assigned transaction identifier.
    pub transaction_id: String,
}

impl PaymentConfirmation {
    /// Create a confirmation for the given transaction.
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
        }
    }
}

/// Reasons a payment provider can reject a submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// The payment was declined.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The user cancelled the payment sheet.
    #[error("payment cancelled by user")]
    Cancelled,

    /// The provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// Any other provider or SDK failure.
    #[error("payment provider error: {0}")]
    Provider(String),
}

/// External capability that actually submits a payment.
#[automock]
#[async_trait]
pub trait PaymentCapability: Send + Sync {
    /// Submit a payment for the given amount.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] if the payment was declined, cancelled, or
    /// the provider could not process it.
    async fn submit(&self, request: PaymentRequest) -> Result<PaymentConfirmation, PaymentError>;
}
