//! Bag prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{BasketError, Cart},
    checkout::{
        AttemptOutcome, CheckoutCoordinator, CheckoutError, CheckoutPhase, PaymentAttempt,
        PaymentBackend, Platform, PlatformMode,
    },
    fixtures::{CartFixture, FixtureError, load_cart},
    items::{LineItem, LineItemId},
    payments::{PaymentCapability, PaymentConfirmation, PaymentError, PaymentRequest},
    pricing::TotalPriceError,
    store::CartStore,
    summary::{CartSummary, SummaryError},
};
