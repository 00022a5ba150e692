//! Checkout Coordinator

use rusty_money::Money;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{Span, info, warn};

use crate::{
    checkout::{
        PaymentBackend,
        attempt::{AttemptOutcome, GENERIC_FAILURE_REASON, PaymentAttempt},
    },
    pricing::TotalPriceError,
    store::CartStore,
    summary::CartSummary,
};

/// Errors that prevent a checkout attempt from starting.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// Another attempt is already submitting.
    #[error("a checkout is already in progress")]
    InProgress,

    /// The cart totals could not be calculated.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Where the coordinator is in the current checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutPhase {
    /// No attempt has started.
    #[default]
    Idle,

    /// A payment has been handed to the capability and is awaiting a response.
    Submitting,

    /// The last attempt succeeded.
    Succeeded,

    /// The last attempt was rejected.
    Failed,

    /// The last attempt found no payment capability.
    Unavailable,
}

/// Drives checkout attempts for a cart against a payment backend.
///
/// Only one attempt may be submitting at a time. The cart is cleared on
/// success only.
#[derive(Debug)]
pub struct CheckoutCoordinator {
    store: CartStore,
    backend: PaymentBackend,
    merchant: String,
    phase: watch::Sender<CheckoutPhase>,
}

impl CheckoutCoordinator {
    /// Create a coordinator for the given cart and payment backend.
    pub fn new(store: CartStore, backend: PaymentBackend, merchant: impl Into<String>) -> Self {
        Self {
            store,
            backend,
            merchant: merchant.into(),
            phase: watch::Sender::new(CheckoutPhase::Idle),
        }
    }

    /// The cart this coordinator checks out.
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// The payment backend resolved at startup.
    pub fn backend(&self) -> &PaymentBackend {
        &self.backend
    }

    /// Current phase.
    pub fn phase(&self) -> CheckoutPhase {
        *self.phase.borrow()
    }

    /// Subscribe to phase changes, e.g. to disable the checkout control while submitting.
    pub fn subscribe_phase(&self) -> watch::Receiver<CheckoutPhase> {
        self.phase.subscribe()
    }

    /// Run one checkout attempt to completion.
    ///
    /// Exactly one payment submission is made in native live mode; failures
    /// are not retried. The returned attempt carries the terminal outcome.
    /// Web demo checkouts always succeed.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InProgress`]: Another native attempt is submitting.
    /// - [`CheckoutError::TotalPrice`]: The cart totals overflowed on a native platform.
    #[tracing::instrument(
        name = "checkout.initiate",
        skip(self),
        fields(
            mode = %self.backend.mode(),
            amount = tracing::field::Empty,
            item_count = tracing::field::Empty,
        ),
        err
    )]
    pub async fn initiate_checkout(&self) -> Result<PaymentAttempt, CheckoutError> {
        let capability = match &self.backend {
            PaymentBackend::WebDemo => return Ok(self.complete_demo()),
            PaymentBackend::NativeLive(capability) => Some(capability),
            PaymentBackend::NativeUnavailable => None,
        };

        let submission = Submission::claim(&self.phase)?;
        let mut attempt = self.new_attempt()?;

        let Some(capability) = capability else {
            attempt.resolve(AttemptOutcome::Unavailable);
            submission.finish(CheckoutPhase::Unavailable);

            warn!("payment capability unavailable, cart kept");

            return Ok(attempt);
        };

        match capability.submit(attempt.request()).await {
            Ok(confirmation) => {
                self.store.clear();

                info!(
                    transaction_id = %confirmation.transaction_id,
                    "payment succeeded, cart cleared"
                );

                attempt.resolve(AttemptOutcome::Success(Some(confirmation.transaction_id)));
                submission.finish(CheckoutPhase::Succeeded);
            }
            Err(error) => {
                warn!(%error, "payment rejected, cart kept");

                attempt.resolve(AttemptOutcome::Failure(GENERIC_FAILURE_REASON.to_string()));
                submission.finish(CheckoutPhase::Failed);
            }
        }

        Ok(attempt)
    }

    fn complete_demo(&self) -> PaymentAttempt {
        let mut attempt = self.new_attempt().unwrap_or_else(|error| {
            warn!(%error, "demo checkout totals unavailable, recording zero amount");

            self.zero_attempt()
        });

        self.store.clear();
        attempt.resolve(AttemptOutcome::Success(None));
        self.phase.send_replace(CheckoutPhase::Succeeded);

        info!("demo checkout completed, cart cleared");

        attempt
    }

    fn zero_attempt(&self) -> PaymentAttempt {
        let cart = self.store.snapshot();
        let zero = Money::from_minor(0, cart.currency());
        let summary = CartSummary::new(zero, cart.total_item_count(), zero, zero);

        PaymentAttempt::new(&summary, self.backend.mode(), &self.merchant)
    }

    fn new_attempt(&self) -> Result<PaymentAttempt, CheckoutError> {
        let summary = self.store.summary()?;
        let attempt = PaymentAttempt::new(&summary, self.backend.mode(), &self.merchant);

        let span = Span::current();

        span.record("amount", tracing::field::display(attempt.amount_due()));
        span.record("item_count", attempt.item_count());

        Ok(attempt)
    }
}

/// Marks the coordinator as submitting for the lifetime of an attempt.
///
/// Dropping an unfinished submission (e.g. a cancelled future) returns the
/// phase to idle so checkout can be retried.
struct Submission<'a> {
    phase: &'a watch::Sender<CheckoutPhase>,
    finished: bool,
}

impl<'a> Submission<'a> {
    fn claim(phase: &'a watch::Sender<CheckoutPhase>) -> Result<Self, CheckoutError> {
        let claimed = phase.send_if_modified(|current| {
            if *current == CheckoutPhase::Submitting {
                return false;
            }

            *current = CheckoutPhase::Submitting;

            true
        });

        if !claimed {
            return Err(CheckoutError::InProgress);
        }

        Ok(Self {
            phase,
            finished: false,
        })
    }

    fn finish(mut self, next: CheckoutPhase) {
        self.phase.send_replace(next);
        self.finished = true;
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.phase.send_replace(CheckoutPhase::Idle);
        }
    }
}
