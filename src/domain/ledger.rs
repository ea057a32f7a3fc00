use super::method::PaymentMethod;
use crate::error::{AllocationError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// A single charge against a payment method.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PaymentEntry {
    pub method_id: String,
    pub amount: Decimal,
}

impl PaymentEntry {
    pub fn new(method_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            method_id: method_id.into(),
            amount,
        }
    }
}

/// Records which methods paid what, per order.
///
/// Remaining limits are derived from the recorded entries on every query, so replacing an
/// order's entries immediately releases whatever they used to charge.
#[derive(Debug, Clone)]
pub struct Ledger {
    points_method: String,
    /// Initial limits in catalog order.
    limits: Vec<(String, Decimal)>,
    entries: BTreeMap<String, Vec<PaymentEntry>>,
}

impl Ledger {
    /// Captures the initial limit of every method in the catalog.
    pub fn new(methods: &[PaymentMethod], points_method: &str) -> Result<Self> {
        if methods.is_empty() {
            return Err(AllocationError::EmptyCatalog);
        }
        if !methods.iter().any(|m| m.id == points_method) {
            return Err(AllocationError::MissingPointsMethod(points_method.to_string()));
        }

        Ok(Self {
            points_method: points_method.to_string(),
            limits: methods.iter().map(|m| (m.id.clone(), m.limit)).collect(),
            entries: BTreeMap::new(),
        })
    }

    /// Replaces the order's entries. The amounts are not checked against anything.
    pub fn set_entries(&mut self, order_id: &str, entries: Vec<PaymentEntry>) {
        self.entries.insert(order_id.to_string(), entries);
    }

    /// The order's current entries; empty while the order is pending.
    pub fn entries_for(&self, order_id: &str) -> &[PaymentEntry] {
        self.entries
            .get(order_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_pending(&self, order_id: &str) -> bool {
        self.entries_for(order_id).is_empty()
    }

    pub fn initial_limit(&self, method_id: &str) -> Decimal {
        self.limits
            .iter()
            .find(|(id, _)| id == method_id)
            .map(|(_, limit)| *limit)
            .unwrap_or(Decimal::ZERO)
    }

    /// Initial limit minus everything currently charged to the method. May be negative.
    pub fn remaining_limit(&self, method_id: &str) -> Decimal {
        self.initial_limit(method_id) - self.paid_total(method_id)
    }

    /// Sum of all entries charged to the method, across all orders.
    pub fn paid_total(&self, method_id: &str) -> Decimal {
        self.entries
            .values()
            .flatten()
            .filter(|e| e.method_id == method_id)
            .map(|e| e.amount)
            .sum()
    }

    /// Paid totals for every method, in catalog order.
    pub fn method_totals(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.limits
            .iter()
            .map(|(id, _)| (id.as_str(), self.paid_total(id)))
    }

    /// Total paid by every method except the points method.
    pub fn card_total(&self) -> Decimal {
        self.limits
            .iter()
            .filter(|(id, _)| *id != self.points_method)
            .map(|(id, _)| self.paid_total(id))
            .sum()
    }

    /// Recorded orders sorted by id, with their entries.
    pub fn orders(&self) -> impl Iterator<Item = (&str, &[PaymentEntry])> + '_ {
        self.entries
            .iter()
            .map(|(id, entries)| (id.as_str(), entries.as_slice()))
    }

    /// Ids from `order_ids` that have no entries.
    pub fn unsettled<'a, I>(&self, order_ids: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        order_ids
            .into_iter()
            .filter(|id| self.is_pending(id))
            .collect()
    }
}
