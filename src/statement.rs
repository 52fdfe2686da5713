//! Profit-and-loss statement construction.
//!
//! A [`Statement`] is derived fresh from a ledger snapshot on every request:
//! filter by period, resolve each record's stored category to a line item,
//! group-sum, then run the profit waterfall.

use crate::amount::Amount;
use crate::error::Result;
use crate::mapping::{LineItem, LineItemMapping};
use crate::period::Period;
use crate::tax::TaxSchedule;
use crate::transaction::Transaction;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

/// The nine statement rows, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementRow {
    Revenue,
    Cost,
    SellingExpense,
    AdminExpense,
    FinanceExpense,
    OperatingProfit,
    TotalProfit,
    TaxEstimate,
    NetProfit,
}

impl StatementRow {
    pub const ORDER: [StatementRow; 9] = [
        StatementRow::Revenue,
        StatementRow::Cost,
        StatementRow::SellingExpense,
        StatementRow::AdminExpense,
        StatementRow::FinanceExpense,
        StatementRow::OperatingProfit,
        StatementRow::TotalProfit,
        StatementRow::TaxEstimate,
        StatementRow::NetProfit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatementRow::Revenue => "Operating Revenue",
            StatementRow::Cost => "Operating Cost",
            StatementRow::SellingExpense => "Selling Expense",
            StatementRow::AdminExpense => "Administrative Expense",
            StatementRow::FinanceExpense => "Finance Expense",
            StatementRow::OperatingProfit => "Operating Profit",
            StatementRow::TotalProfit => "Total Profit",
            StatementRow::TaxEstimate => "Tax Estimate",
            StatementRow::NetProfit => "Net Profit",
        }
    }
}

impl fmt::Display for StatementRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A computed profit-and-loss statement.
///
/// # Invariants
///
/// - `operating_profit == revenue - cost - selling_expense - admin_expense - finance_expense`
/// - `total_profit == operating_profit`; untracked line items are not included
/// - `tax_estimate >= 0`
/// - `net_profit == total_profit - tax_estimate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub period: Period,
    pub revenue: Amount,
    pub cost: Amount,
    pub selling_expense: Amount,
    pub admin_expense: Amount,
    pub finance_expense: Amount,
    pub operating_profit: Amount,
    pub total_profit: Amount,
    pub tax_estimate: Amount,
    pub net_profit: Amount,

    /// Sums for line items outside the five tracked aggregates.
    pub untracked: BTreeMap<LineItem, Amount>,
}

impl Statement {
    pub fn get(&self, row: StatementRow) -> Amount {
        match row {
            StatementRow::Revenue => self.revenue,
            StatementRow::Cost => self.cost,
            StatementRow::SellingExpense => self.selling_expense,
            StatementRow::AdminExpense => self.admin_expense,
            StatementRow::FinanceExpense => self.finance_expense,
            StatementRow::OperatingProfit => self.operating_profit,
            StatementRow::TotalProfit => self.total_profit,
            StatementRow::TaxEstimate => self.tax_estimate,
            StatementRow::NetProfit => self.net_profit,
        }
    }

    /// All nine rows in presentation order.
    pub fn rows(&self) -> [(StatementRow, Amount); 9] {
        StatementRow::ORDER.map(|row| (row, self.get(row)))
    }

    /// Writes the statement as `line_item,amount` CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["line_item", "amount"])?;
        for (row, amount) in self.rows() {
            csv_writer.write_record([row.label().to_string(), amount.to_string()])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Builds statements from ledger snapshots.
#[derive(Debug, Clone, Default)]
pub struct StatementBuilder {
    mapping: LineItemMapping,
    tax: TaxSchedule,
}

impl StatementBuilder {
    pub fn new(mapping: LineItemMapping, tax: TaxSchedule) -> Self {
        StatementBuilder { mapping, tax }
    }

    /// Computes the statement for `period`.
    ///
    /// Never fails; a period with no matching transactions yields all zeros.
    pub fn build(&self, transactions: &[Transaction], period: &Period) -> Statement {
        let mut sums: BTreeMap<LineItem, Amount> = BTreeMap::new();
        let mut matched = 0usize;

        for tx in transactions.iter().filter(|tx| period.contains(tx.date)) {
            let item = self.mapping.line_item_for(&tx.category);
            *sums.entry(item).or_default() += tx.amount;
            matched += 1;
        }

        debug!(
            "Building statement for {} from {} of {} transactions",
            period,
            matched,
            transactions.len()
        );

        let sum_of = |item: LineItem| sums.get(&item).copied().unwrap_or(Amount::ZERO);
        let revenue = sum_of(LineItem::OperatingRevenue);
        let cost = sum_of(LineItem::OperatingCost);
        let selling_expense = sum_of(LineItem::SellingExpense);
        let admin_expense = sum_of(LineItem::AdministrativeExpense);
        let finance_expense = sum_of(LineItem::FinanceExpense);

        let operating_profit = revenue - cost - selling_expense - admin_expense - finance_expense;

        let untracked: BTreeMap<LineItem, Amount> = sums
            .iter()
            .filter(|(item, _)| !item.is_tracked())
            .map(|(item, amount)| (*item, *amount))
            .collect();
        for (item, amount) in &untracked {
            debug!("{} of {} excluded from profit totals", amount, item);
        }

        let total_profit = operating_profit;
        let tax_estimate = self.tax.estimate(total_profit);
        let net_profit = total_profit - tax_estimate;

        Statement {
            period: period.clone(),
            revenue,
            cost,
            selling_expense,
            admin_expense,
            finance_expense,
            operating_profit,
            total_profit,
            tax_estimate,
            net_profit,
            untracked,
        }
    }
}
