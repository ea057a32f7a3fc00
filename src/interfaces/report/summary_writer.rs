use crate::domain::ledger::Ledger;
use crate::error::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct MethodTotal<'a> {
    method: &'a str,
    paid: String,
}

/// Formats the ledger's per-method totals.
pub struct SummaryWriter<W: Write> {
    writer: W,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// One `<method> paid=<amount>` line per method, in catalog order.
    pub fn write_totals(&mut self, ledger: &Ledger) -> Result<()> {
        for (method, paid) in ledger.method_totals() {
            writeln!(self.writer, "{} paid={}", method, two_places(paid))?;
        }
        Ok(())
    }

    /// The same totals as a `method,paid` CSV table.
    pub fn write_totals_csv(&mut self, ledger: &Ledger) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(&mut self.writer);
        for (method, paid) in ledger.method_totals() {
            wtr.serialize(MethodTotal {
                method,
                paid: two_places(paid),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Per-order entries, orders sorted by id, followed by the non-points total.
    pub fn write_breakdown(&mut self, ledger: &Ledger) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "=== Detailed Payments by Order ===")?;
        for (order_id, entries) in ledger.orders() {
            writeln!(self.writer, "{}:", order_id)?;
            for entry in entries {
                writeln!(
                    self.writer,
                    "  {} -> {}",
                    entry.method_id,
                    two_places(entry.amount)
                )?;
            }
        }
        writeln!(self.writer, "card total={}", two_places(ledger.card_total()))?;
        Ok(())
    }
}

fn two_places(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
