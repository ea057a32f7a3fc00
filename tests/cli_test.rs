use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("paysplit"));
    cmd.arg("tests/fixtures/orders.json")
        .arg("tests/fixtures/paymentmethods.json");

    cmd.assert()
        .success()
        .stdout("PUNKTY paid=100.00\nmZysk paid=0.00\nBosBankrut paid=392.50\n");

    Ok(())
}

#[test]
fn test_cli_csv_format() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("paysplit"));
    cmd.arg("tests/fixtures/orders.json")
        .arg("tests/fixtures/paymentmethods.json")
        .arg("--format")
        .arg("csv");

    cmd.assert()
        .success()
        .stdout("method,paid\nPUNKTY,100.00\nmZysk,0.00\nBosBankrut,392.50\n");

    Ok(())
}

#[test]
fn test_cli_breakdown() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("paysplit"));
    cmd.arg("tests/fixtures/orders.json")
        .arg("tests/fixtures/paymentmethods.json")
        .arg("--breakdown");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("PUNKTY paid=100.00\n"))
        .stdout(predicate::str::contains("=== Detailed Payments by Order ==="))
        .stdout(predicate::str::contains(
            "ORDER2:\n  PUNKTY -> 23.00\n  BosBankrut -> 157.00\n",
        ))
        .stdout(predicate::str::contains("ORDER4:\n  PUNKTY -> 42.50\n"))
        .stdout(predicate::str::contains("card total=392.50"));

    Ok(())
}

#[test]
fn test_cli_promo_threshold_flag() -> Result<(), Box<dyn std::error::Error>> {
    // With the threshold lowered to 5, mZysk (10%) takes part in the promotional pass and
    // settles ORDER1 before BosBankrut-only orders are split.
    let mut cmd = Command::new(cargo_bin!("paysplit"));
    cmd.arg("tests/fixtures/orders.json")
        .arg("tests/fixtures/paymentmethods.json")
        .arg("--promo-threshold")
        .arg("5")
        .arg("--breakdown");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ORDER1:\n  mZysk -> 135.00\n"));

    Ok(())
}
