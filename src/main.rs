//! Bag CLI
//!
//! Renders the seeded bag, applies quantity changes and runs a checkout
//! attempt. No native payment SDK ships with the CLI, so native platforms
//! resolve to an unavailable payment backend.

use std::io;

use anyhow::{Context, Result};
use bag::{
    checkout::{CheckoutCoordinator, PaymentBackend},
    config::{BagConfig, Command},
    fixtures::load_cart,
    observability::init_subscriber,
    store::CartStore,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = BagConfig::load()?;

    init_subscriber(&config.logging)?;

    let cart = load_cart(&config.cart.fixture)
        .with_context(|| format!("failed to load {}", config.cart.fixture.display()))?;

    let store = CartStore::new(cart);
    let changes = config.command.changes();

    for id in changes.increments() {
        store.increment(&id);
    }

    for id in changes.decrements() {
        store.decrement(&id);
    }

    if let Command::Checkout(_) = config.command {
        let backend = PaymentBackend::resolve(config.checkout.platform, None);
        let coordinator = CheckoutCoordinator::new(store.clone(), backend, config.checkout.merchant);

        let attempt = coordinator.initiate_checkout().await?;

        info!(outcome = ?attempt.outcome(), "checkout finished");

        write_line(&format!(
            "\n{} ({} {})",
            attempt.outcome().message(),
            attempt.amount_due(),
            attempt.mode()
        ))?;
    }

    let cart = store.snapshot();

    cart.summary()?.write_to(io::stdout().lock(), &cart)?;

    Ok(())
}

fn write_line(line: &str) -> Result<()> {
    use std::io::Write as _;

    writeln!(io::stdout().lock(), "{line}")?;

    Ok(())
}
