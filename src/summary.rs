//! Ledger-wide totals and category breakdowns.

use crate::amount::Amount;
use crate::error::Result;
use crate::transaction::{Direction, Transaction};
use std::collections::BTreeMap;
use std::io::Write;

/// Headline figures across a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub income: Amount,
    pub expense: Amount,
    /// `income - expense`; negative when spending exceeds income.
    pub surplus: Amount,
}

impl Summary {
    pub fn of(transactions: &[Transaction]) -> Self {
        let total = |direction: Direction| -> Amount {
            transactions
                .iter()
                .filter(|tx| tx.direction == direction)
                .map(|tx| tx.amount)
                .sum()
        };
        let income = total(Direction::Inflow);
        let expense = total(Direction::Outflow);
        Summary {
            income,
            expense,
            surplus: income - expense,
        }
    }
}

/// Sums amounts by stored category for one direction, ordered by category name.
pub fn category_totals(transactions: &[Transaction], direction: Direction) -> Vec<(String, Amount)> {
    let mut totals: BTreeMap<&str, Amount> = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| tx.direction == direction) {
        *totals.entry(tx.category.as_str()).or_default() += tx.amount;
    }
    totals
        .into_iter()
        .map(|(category, amount)| (category.to_string(), amount))
        .collect()
}

/// Writes totals followed by per-category breakdowns as `section,name,amount` CSV.
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let summary = Summary::of(transactions);

    csv_writer.write_record(["section", "name", "amount"])?;
    for (name, amount) in [
        ("income", summary.income),
        ("expense", summary.expense),
        ("surplus", summary.surplus),
    ] {
        csv_writer.write_record(["total", name, amount.to_string().as_str()])?;
    }
    for direction in [Direction::Inflow, Direction::Outflow] {
        for (category, amount) in category_totals(transactions, direction) {
            csv_writer.write_record([
                direction.as_str(),
                category.as_str(),
                amount.to_string().as_str(),
            ])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Transactions sorted by date; same-day records keep ledger order.
pub fn chronological(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|tx| tx.date);
    sorted
}
