#![allow(dead_code)]

use paysplit::domain::method::PaymentMethod;
use paysplit::domain::order::Order;
use rand::Rng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::io::Error;
use std::path::Path;

const PROMOTIONS: [&str; 4] = ["mZysk", "BosBankrut", "Revolut", "CARD"];

pub fn random_methods(rng: &mut StdRng) -> Vec<PaymentMethod> {
    let mut methods = vec![PaymentMethod::new(
        "PUNKTY",
        rng.gen_range(5..=20),
        Decimal::new(rng.gen_range(0..=50_000), 2),
    )];
    for id in PROMOTIONS {
        methods.push(PaymentMethod::new(
            id,
            rng.gen_range(0..=30),
            Decimal::new(rng.gen_range(0..=200_000), 2),
        ));
    }
    methods
}

pub fn random_orders(rng: &mut StdRng, count: usize) -> Vec<Order> {
    (1..=count)
        .map(|i| {
            let order = Order::new(
                format!("ORDER{}", i),
                Decimal::new(rng.gen_range(100..=50_000), 2),
            );
            if rng.gen_bool(0.25) {
                return order;
            }
            let promotions: Vec<&str> = PROMOTIONS
                .iter()
                .chain(["PUNKTY"].iter())
                .copied()
                .filter(|_| rng.gen_bool(0.4))
                .collect();
            order.with_promotions(promotions)
        })
        .collect()
}

pub fn write_json<T: Serialize>(path: &Path, records: &[T]) -> Result<(), Error> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}
