//! Integration tests for the checkout workflow against the seeded bag.
//!
//! The seeded bag holds three line items:
//!
//! - Seamless Leggings: $45.99 × 2 = $91.98
//! - Training Hoodie: $52.99 × 1 = $52.99
//! - Crop Tank: $38.95 × 3 = $116.85
//!
//! Subtotal $261.82, flat shipping $15.00, total $276.82, 6 units.

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;
use tokio::sync::{Mutex, Notify};

use bag::prelude::*;

fn seeded_store() -> Result<CartStore, FixtureError> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/carts/bag.yml");

    Ok(CartStore::new(load_cart(path)?))
}

/// Capability that holds every submission until released.
#[derive(Debug, Default)]
struct GatedCapability {
    gate: Notify,
    calls: AtomicUsize,
    requests: Mutex<Vec<PaymentRequest>>,
}

#[async_trait]
impl PaymentCapability for GatedCapability {
    async fn submit(&self, request: PaymentRequest) -> Result<PaymentConfirmation, PaymentError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        self.requests.lock().await.push(request);
        self.gate.notified().await;

        Ok(PaymentConfirmation::new(format!("PAY-{call}")))
    }
}

#[test]
fn seeded_bag_totals() -> TestResult {
    let store = seeded_store()?;
    let summary = store.summary()?;

    assert_eq!(summary.subtotal(), Money::from_minor(26182, USD));
    assert_eq!(summary.shipping(), Money::from_minor(1500, USD));
    assert_eq!(summary.total(), Money::from_minor(27682, USD));
    assert_eq!(summary.item_count(), 6);

    Ok(())
}

#[test]
fn totals_track_every_mutation() -> TestResult {
    let store = seeded_store()?;
    let leggings = LineItemId::from("leggings-black-m");
    let hoodie = LineItemId::from("hoodie-grey-l");

    for _ in 0..5 {
        store.increment(&hoodie);
    }

    for _ in 0..5 {
        store.decrement(&leggings);
    }

    let cart = store.snapshot();
    let summary = store.summary()?;

    let expected_minor: i64 = cart
        .iter()
        .map(|item| item.unit_price().to_minor_units() * i64::from(item.quantity()))
        .sum();

    assert_eq!(cart.get(&leggings).map(LineItem::quantity), Some(1));
    assert_eq!(cart.get(&hoodie).map(LineItem::quantity), Some(6));
    assert_eq!(summary.subtotal(), Money::from_minor(expected_minor, USD));
    assert_eq!(
        summary.total(),
        Money::from_minor(expected_minor + 1500, USD)
    );

    Ok(())
}

#[tokio::test]
async fn web_checkout_empties_any_bag() -> TestResult {
    let store = seeded_store()?;
    let backend = PaymentBackend::resolve(Platform::Web, None);
    let coordinator = CheckoutCoordinator::new(store.clone(), backend, "Storefront");

    let attempt = coordinator.initiate_checkout().await?;

    assert_eq!(attempt.outcome(), &AttemptOutcome::Success(None));

    let summary = store.summary()?;

    assert!(store.snapshot().is_empty());
    assert_eq!(summary.subtotal(), Money::from_minor(0, USD));
    assert_eq!(summary.item_count(), 0);
    assert_eq!(summary.total(), Money::from_minor(1500, USD));

    Ok(())
}

#[tokio::test]
async fn web_checkout_succeeds_on_mutated_and_empty_bags() -> TestResult {
    let store = seeded_store()?;
    let backend = PaymentBackend::resolve(Platform::Web, None);
    let coordinator = CheckoutCoordinator::new(store.clone(), backend, "Storefront");

    assert!(store.increment(&"hoodie-grey-l".into()));
    assert!(store.decrement(&"tank-white-s".into()));

    let attempt = coordinator.initiate_checkout().await?;

    assert_eq!(attempt.outcome(), &AttemptOutcome::Success(None));
    assert_eq!(attempt.amount_due(), Money::from_minor(27682 + 5299 - 3895, USD));
    assert!(store.snapshot().is_empty());

    let attempt = coordinator.initiate_checkout().await?;

    assert_eq!(attempt.outcome(), &AttemptOutcome::Success(None));
    assert_eq!(attempt.amount_due(), Money::from_minor(1500, USD));
    assert_eq!(attempt.item_count(), 0);
    assert!(store.snapshot().is_empty());
    assert_eq!(coordinator.phase(), CheckoutPhase::Succeeded);

    Ok(())
}

#[tokio::test]
async fn native_without_capability_keeps_bag() -> TestResult {
    let store = seeded_store()?;
    let before = store.snapshot();
    let backend = PaymentBackend::resolve(Platform::Android, None);
    let coordinator = CheckoutCoordinator::new(store.clone(), backend, "Storefront");

    let attempt = coordinator.initiate_checkout().await?;

    assert_eq!(attempt.outcome(), &AttemptOutcome::Unavailable);
    assert_eq!(attempt.mode(), PlatformMode::NativeUnavailable);
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.snapshot().len(), 3);

    Ok(())
}

#[tokio::test]
async fn in_flight_amount_ignores_later_changes() -> TestResult {
    let store = seeded_store()?;
    let capability = Arc::new(GatedCapability::default());
    let live: Arc<dyn PaymentCapability> = capability.clone();
    let backend = PaymentBackend::resolve(Platform::Ios, Some(live));
    let coordinator = Arc::new(CheckoutCoordinator::new(
        store.clone(),
        backend,
        "Storefront",
    ));

    let mut phase = coordinator.subscribe_phase();

    let in_flight = tokio::spawn({
        let coordinator = Arc::clone(&coordinator);
        async move { coordinator.initiate_checkout().await }
    });

    phase
        .wait_for(|phase| *phase == CheckoutPhase::Submitting)
        .await?;

    // The user keeps tapping while the payment sheet is open.
    assert!(store.increment(&"tank-white-s".into()));

    let second = coordinator.initiate_checkout().await;

    assert!(matches!(second, Err(CheckoutError::InProgress)));

    capability.gate.notify_one();

    let attempt = in_flight.await??;

    assert_eq!(
        attempt.outcome(),
        &AttemptOutcome::Success(Some("PAY-1".to_string()))
    );
    assert_eq!(attempt.amount_due(), Money::from_minor(27682, USD));
    assert_eq!(capability.calls.load(Ordering::SeqCst), 1);

    let requests = capability.requests.lock().await;
    let submitted = requests.first().ok_or("no payment submitted")?;

    assert_eq!(submitted.amount, Decimal::new(27682, 2));
    assert_eq!(submitted.currency, "USD");
    assert_eq!(submitted.description, "Storefront order: 6 items");

    assert!(store.snapshot().is_empty());
    assert_eq!(coordinator.phase(), CheckoutPhase::Succeeded);

    Ok(())
}

#[tokio::test]
async fn cancelled_checkout_can_be_retried() -> TestResult {
    let store = seeded_store()?;
    let capability = Arc::new(GatedCapability::default());
    let live: Arc<dyn PaymentCapability> = capability.clone();
    let backend = PaymentBackend::resolve(Platform::Ios, Some(live));
    let coordinator = Arc::new(CheckoutCoordinator::new(
        store.clone(),
        backend,
        "Storefront",
    ));

    let mut phase = coordinator.subscribe_phase();

    let in_flight = tokio::spawn({
        let coordinator = Arc::clone(&coordinator);
        async move { coordinator.initiate_checkout().await }
    });

    phase
        .wait_for(|phase| *phase == CheckoutPhase::Submitting)
        .await?;

    in_flight.abort();
    assert!(in_flight.await.is_err());

    assert_eq!(coordinator.phase(), CheckoutPhase::Idle);
    assert_eq!(store.snapshot().len(), 3);

    capability.gate.notify_one();

    let attempt = coordinator.initiate_checkout().await?;

    assert!(attempt.outcome().is_success());
    assert_eq!(capability.calls.load(Ordering::SeqCst), 2);

    Ok(())
}
