use crate::config::EngineConfig;
use crate::domain::eligibility::Eligibility;
use crate::domain::ledger::{Ledger, PaymentEntry};
use crate::domain::method::{MethodCatalog, PaymentMethod};
use crate::domain::order::{Order, by_value_ascending};
use crate::error::{AllocationError, Result};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Assigns a batch of orders to payment methods.
///
/// `AllocationEngine` owns the ledger for one batch. Allocation runs three phases in order:
///
/// 1. a greedy pass spending the best promotional discounts on the cheapest orders first,
/// 2. points settlement, which pairs the points method with the lowest-discount method and
///    upgrades orders to full points payment until nothing changes,
/// 3. a fallback that settles whatever is left, over the limit if it has to.
#[derive(Debug)]
pub struct AllocationEngine {
    catalog: MethodCatalog,
    eligibility: Eligibility,
    config: EngineConfig,
    ledger: Ledger,
}

impl AllocationEngine {
    /// Creates an engine over the given method catalog.
    ///
    /// Fails if the catalog is empty or has no method with the configured points id.
    pub fn new(methods: &[PaymentMethod], config: EngineConfig) -> Result<Self> {
        let catalog = MethodCatalog::new(methods, &config.points_method)?;
        let ledger = Ledger::new(methods, &config.points_method)?;
        let eligibility = Eligibility::new(config.points_method.clone());

        Ok(Self {
            catalog,
            eligibility,
            config,
            ledger,
        })
    }

    /// Settles every order. On success each order has at least one entry in the ledger.
    pub fn allocate(&mut self, orders: &[Order]) -> Result<()> {
        let run = Allocation {
            catalog: &self.catalog,
            eligibility: &self.eligibility,
            config: &self.config,
            points: self.catalog.points(),
            lowest: self.catalog.lowest(),
        };
        let ledger = &mut self.ledger;
        let by_value = by_value_ascending(orders);

        let settled = run.greedy_pass(&by_value, ledger);
        info!(settled, orders = orders.len(), "promotional pass finished");

        run.settle_with_points(orders, &by_value, ledger)?;
        run.settle_fallback(orders, ledger);

        Ok(())
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Consumes the engine and returns the final ledger.
    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }
}

/// Borrowed view of the engine for the duration of one `allocate` call.
struct Allocation<'a> {
    catalog: &'a MethodCatalog,
    eligibility: &'a Eligibility,
    config: &'a EngineConfig,
    points: &'a PaymentMethod,
    lowest: &'a PaymentMethod,
}

impl Allocation<'_> {
    /// Pays candidates in full with promotional methods above the threshold.
    ///
    /// Methods are tried best discount first and each one takes the cheapest eligible candidates
    /// that still fit under its remaining limit. Returns how many candidates were settled.
    fn greedy_pass(&self, candidates: &[&Order], ledger: &mut Ledger) -> usize {
        let mut unsettled = candidates.to_vec();

        for method in self.catalog.by_discount() {
            if method.discount <= self.config.promo_threshold {
                break;
            }

            unsettled.retain(|order| {
                if !self.eligibility.supports(order, method) {
                    return true;
                }
                let cost = method.discounted(order.value);
                if ledger.remaining_limit(&method.id) < cost {
                    return true;
                }
                debug!(order = %order.id, method = %method.id, %cost, "paid by promotion");
                ledger.set_entries(&order.id, vec![PaymentEntry::new(&method.id, cost)]);
                false
            });
        }

        candidates.len() - unsettled.len()
    }

    /// Phase two: minimum-share split, full-points upgrades until a fixpoint, then the
    /// proportional blend of leftover points into the mixed payments.
    fn settle_with_points(
        &self,
        orders: &[Order],
        by_value: &[&Order],
        ledger: &mut Ledger,
    ) -> Result<()> {
        self.split_min_share(by_value, ledger);

        let limit = orders.len();
        let mut iterations = 0;
        loop {
            let mut upgraded = false;

            for order in orders {
                if self.is_points_only(ledger.entries_for(&order.id)) {
                    continue;
                }
                let full_cost = self.points.discounted(order.value);
                if full_cost > ledger.remaining_limit(&self.points.id) {
                    continue;
                }

                debug!(order = %order.id, cost = %full_cost, "upgraded to full points payment");
                ledger.set_entries(&order.id, vec![PaymentEntry::new(&self.points.id, full_cost)]);
                upgraded = true;

                // The upgrade may have released a promotional method, let the greedy pass
                // reclaim what it can before refilling the split.
                let reopened: Vec<&Order> = by_value
                    .iter()
                    .copied()
                    .filter(|o| !self.is_points_only(ledger.entries_for(&o.id)))
                    .collect();
                self.greedy_pass(&reopened, ledger);
                self.split_min_share(by_value, ledger);
            }

            if !upgraded {
                break;
            }
            iterations += 1;
            if iterations > limit {
                return Err(AllocationError::NonTermination { limit });
            }
        }
        info!(iterations, "points upgrades reached a fixpoint");

        self.blend_points(orders, ledger);
        Ok(())
    }

    /// Pays the minimum points share of every pending order, the rest with the lowest-discount
    /// method.
    ///
    /// While the points budget cannot cover all minimum shares, the order with the largest
    /// share (smallest id on ties) is left out. The lowest-discount share is charged without
    /// looking at that method's limit or at eligibility.
    fn split_min_share(&self, by_value: &[&Order], ledger: &mut Ledger) {
        let share = self.config.min_points_share;
        let mut candidates: Vec<(&Order, Decimal)> = by_value
            .iter()
            .filter(|o| ledger.is_pending(&o.id))
            .map(|o| (*o, o.value * share))
            .collect();

        let available = ledger.remaining_limit(&self.points.id);
        let mut required: Decimal = candidates.iter().map(|(_, r)| *r).sum();

        while required > available {
            let Some(worst) = candidates
                .iter()
                .enumerate()
                .max_by(|(_, (a, ra)), (_, (b, rb))| ra.cmp(rb).then_with(|| b.id.cmp(&a.id)))
                .map(|(i, _)| i)
            else {
                break;
            };
            let (order, r) = candidates.remove(worst);
            debug!(order = %order.id, required = %r, "not enough points for minimum share");
            required -= r;
        }

        let remainder = self.config.remainder_share();
        for (order, minimum) in candidates {
            let rest = order.value * remainder;
            debug!(order = %order.id, points = %minimum, lowest = %rest, "split payment");
            ledger.set_entries(
                &order.id,
                vec![
                    PaymentEntry::new(&self.points.id, minimum),
                    PaymentEntry::new(&self.lowest.id, rest),
                ],
            );
        }

        let remaining = ledger.remaining_limit(&self.lowest.id);
        if remaining < Decimal::ZERO {
            warn!(method = %self.lowest.id, %remaining, "split payments exceed method limit");
        }
    }

    /// Spreads the unspent points budget over the mixed payments in proportion to order value.
    fn blend_points(&self, orders: &[Order], ledger: &mut Ledger) {
        let mixed: Vec<&Order> = orders
            .iter()
            .filter(|o| self.is_mixed(ledger.entries_for(&o.id)))
            .collect();

        let extra = ledger.remaining_limit(&self.points.id);
        let total: Decimal = mixed.iter().map(|o| o.value).sum();
        let share = self.config.min_points_share;
        let remainder = self.config.remainder_share();

        for order in &mixed {
            let cap = order.value * remainder;
            let mut use_points = order.value * share;
            if extra > Decimal::ZERO && total > Decimal::ZERO {
                use_points += extra * (order.value / total);
            }
            let use_points = use_points.min(cap);
            let use_lowest = cap - use_points;

            ledger.set_entries(
                &order.id,
                vec![
                    PaymentEntry::new(&self.points.id, use_points),
                    PaymentEntry::new(&self.lowest.id, use_lowest),
                ],
            );
        }
        info!(mixed = mixed.len(), %extra, "blended leftover points");
    }

    /// Settles every order still pending with the best eligible method that can cover it,
    /// or forces the full value onto the lowest-discount method.
    fn settle_fallback(&self, orders: &[Order], ledger: &mut Ledger) {
        let pending: Vec<&Order> = orders
            .iter()
            .filter(|o| ledger.is_pending(&o.id))
            .collect();

        let mut forced = 0;
        for order in &pending {
            let chosen = self
                .catalog
                .by_discount()
                .iter()
                .filter(|m| self.eligibility.supports(order, m))
                .map(|m| (m, m.discounted(order.value)))
                .find(|(m, cost)| ledger.remaining_limit(&m.id) >= *cost);

            let entry = match chosen {
                Some((method, cost)) => {
                    debug!(order = %order.id, method = %method.id, %cost, "fallback payment");
                    PaymentEntry::new(&method.id, cost)
                }
                None => {
                    forced += 1;
                    warn!(
                        order = %order.id,
                        method = %self.lowest.id,
                        value = %order.value,
                        "no method can cover order, charging full value"
                    );
                    PaymentEntry::new(&self.lowest.id, order.value)
                }
            };
            ledger.set_entries(&order.id, vec![entry]);
        }
        info!(settled = pending.len(), forced, "fallback pass finished");
    }

    fn is_points_only(&self, entries: &[PaymentEntry]) -> bool {
        matches!(entries, [only] if only.method_id == self.points.id)
    }

    fn is_mixed(&self, entries: &[PaymentEntry]) -> bool {
        matches!(
            entries,
            [p, l] if p.method_id == self.points.id && l.method_id == self.lowest.id
        )
    }
}
