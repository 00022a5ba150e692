//! Integration tests for loading and rendering cart fixtures.

use std::io::Write;

use rusty_money::{Money, iso::GBP};
use tempfile::NamedTempFile;
use testresult::TestResult;

use bag::prelude::*;

#[test]
fn loads_cart_from_file_and_renders_it() -> TestResult {
    let mut file = NamedTempFile::new()?;

    writeln!(
        file,
        r#"
shipping: "3.95 GBP"
items:
  - id: shorts
    name: Running Shorts
    variant: Navy / M
    price: "24.00 GBP"
    quantity: 2
  - id: socks
    name: Crew Socks
    variant: White / One Size
    price: "8.50 GBP"
"#
    )?;

    let cart = load_cart(file.path())?;
    let summary = cart.summary()?;

    assert_eq!(summary.subtotal(), Money::from_minor(5650, GBP));
    assert_eq!(summary.total(), Money::from_minor(6045, GBP));
    assert_eq!(summary.item_count(), 3);

    let mut out = Vec::new();
    summary.write_to(&mut out, &cart)?;

    let rendered = String::from_utf8(out)?;

    assert!(rendered.contains("Running Shorts"), "{rendered}");
    assert!(rendered.contains("Crew Socks"), "{rendered}");
    assert!(rendered.contains("Subtotal (3 items):"), "{rendered}");

    Ok(())
}

#[test]
fn duplicate_ids_are_rejected() -> TestResult {
    let fixture = CartFixture::from_yaml(
        r#"
shipping: "0 GBP"
items:
  - id: socks
    name: Crew Socks
    price: "8.50 GBP"
  - id: socks
    name: Crew Socks
    price: "8.50 GBP"
"#,
    )?;

    assert!(matches!(
        Cart::try_from(fixture),
        Err(FixtureError::Basket(BasketError::DuplicateId(id))) if id == LineItemId::from("socks")
    ));

    Ok(())
}

#[test]
fn zero_quantity_is_rejected() -> TestResult {
    let fixture = CartFixture::from_yaml(
        r#"
shipping: "0 GBP"
items:
  - id: socks
    name: Crew Socks
    price: "8.50 GBP"
    quantity: 0
"#,
    )?;

    assert!(matches!(
        Cart::try_from(fixture),
        Err(FixtureError::Basket(BasketError::ZeroQuantity(_)))
    ));

    Ok(())
}
