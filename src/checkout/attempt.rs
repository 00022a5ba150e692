//! Payment Attempts

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{checkout::PlatformMode, payments::PaymentRequest, summary::CartSummary};

/// Message shown for every rejected payment, whatever the provider said.
pub const GENERIC_FAILURE_REASON: &str =
    "We couldn't complete your payment. Your bag has been kept so you can try again.";

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The attempt has not resolved yet.
    Pending,

    /// Payment succeeded. Web demo checkouts carry no transaction id.
    Success(Option<String>),

    /// Payment was rejected; the reason is safe to show to the user.
    Failure(String),

    /// No payment capability is available on this device.
    Unavailable,
}

impl AttemptOutcome {
    /// Whether the attempt succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success(_))
    }

    /// Message for the user-facing layer.
    pub fn message(&self) -> String {
        match self {
            AttemptOutcome::Pending => "Processing your payment...".to_string(),
            AttemptOutcome::Success(Some(transaction_id)) => {
                format!("Payment successful! Transaction ID: {transaction_id}")
            }
            AttemptOutcome::Success(None) => {
                "Order placed! This is a demo checkout, no payment was taken.".to_string()
            }
            AttemptOutcome::Failure(reason) => reason.clone(),
            AttemptOutcome::Unavailable => {
                "Payments are not available on this device.".to_string()
            }
        }
    }
}

/// A single checkout attempt.
///
/// The amount due is captured by value when the attempt is created, so later
/// changes to the cart never alter what was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentAttempt {
    amount_due: Money<'static, Currency>,
    item_count: u64,
    description: String,
    mode: PlatformMode,
    outcome: AttemptOutcome,
}

impl PaymentAttempt {
    /// Create a pending attempt for the cart's current totals.
    pub fn new(summary: &CartSummary, mode: PlatformMode, merchant: &str) -> Self {
        let item_count = summary.item_count();
        let noun = if item_count == 1 { "item" } else { "items" };

        Self {
            amount_due: summary.total(),
            item_count,
            description: format!("{merchant} order: {item_count} {noun}"),
            mode,
            outcome: AttemptOutcome::Pending,
        }
    }

    /// Total due, including shipping.
    pub fn amount_due(&self) -> Money<'static, Currency> {
        self.amount_due
    }

    /// Total due as a decimal fixed to the currency's minor-unit precision.
    pub fn amount(&self) -> Decimal {
        Decimal::new(
            self.amount_due.to_minor_units(),
            self.amount_due.currency().exponent,
        )
    }

    /// ISO currency code of the amount due.
    pub fn currency(&self) -> &'static str {
        self.amount_due.currency().iso_alpha_code
    }

    /// Number of units being paid for.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Description submitted to the payment provider.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Mode the attempt ran in.
    pub fn mode(&self) -> PlatformMode {
        self.mode
    }

    /// Current outcome.
    pub fn outcome(&self) -> &AttemptOutcome {
        &self.outcome
    }

    /// Request to hand to the payment capability.
    pub fn request(&self) -> PaymentRequest {
        PaymentRequest {
            amount: self.amount(),
            currency: self.currency().to_string(),
            description: self.description.clone(),
        }
    }

    pub(crate) fn resolve(&mut self, outcome: AttemptOutcome) {
        self.outcome = outcome;
    }
}
