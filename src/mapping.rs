//! Category to statement line-item mapping.

use crate::category::*;
use std::collections::HashMap;
use std::fmt;

/// A row of the profit statement that categories roll up into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineItem {
    OperatingRevenue,
    OperatingCost,
    SellingExpense,
    AdministrativeExpense,
    FinanceExpense,
    /// Mappable, but not part of any computed total.
    NonOperatingIncome,
    /// Mappable, but not part of any computed total.
    NonOperatingExpense,
}

impl LineItem {
    /// The five line items the profit waterfall is computed from.
    pub const TRACKED: [LineItem; 5] = [
        LineItem::OperatingRevenue,
        LineItem::OperatingCost,
        LineItem::SellingExpense,
        LineItem::AdministrativeExpense,
        LineItem::FinanceExpense,
    ];

    pub fn is_tracked(self) -> bool {
        Self::TRACKED.contains(&self)
    }

    pub fn label(self) -> &'static str {
        match self {
            LineItem::OperatingRevenue => "Operating Revenue",
            LineItem::OperatingCost => "Operating Cost",
            LineItem::SellingExpense => "Selling Expense",
            LineItem::AdministrativeExpense => "Administrative Expense",
            LineItem::FinanceExpense => "Finance Expense",
            LineItem::NonOperatingIncome => "Non-operating Income",
            LineItem::NonOperatingExpense => "Non-operating Expense",
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Total function from category to line item.
///
/// Categories without an entry map to [`LineItemMapping::DEFAULT`].
#[derive(Debug, Clone)]
pub struct LineItemMapping {
    entries: HashMap<String, LineItem>,
}

impl LineItemMapping {
    pub const DEFAULT: LineItem = LineItem::AdministrativeExpense;

    /// A mapping with no entries; everything lands on the default line item.
    pub fn empty() -> Self {
        LineItemMapping {
            entries: HashMap::new(),
        }
    }

    /// Adds or overrides one entry.
    pub fn with(mut self, category: impl Into<String>, item: LineItem) -> Self {
        self.entries.insert(category.into(), item);
        self
    }

    pub fn line_item_for(&self, category: &str) -> LineItem {
        self.entries.get(category).copied().unwrap_or(Self::DEFAULT)
    }
}

impl Default for LineItemMapping {
    fn default() -> Self {
        let mut mapping = LineItemMapping::empty()
            .with(PRIMARY_REVENUE, LineItem::OperatingRevenue)
            .with(OTHER_REVENUE, LineItem::OperatingRevenue)
            .with(UNCATEGORIZED_INFLOW, LineItem::OperatingRevenue)
            .with(NON_OPERATING_INCOME, LineItem::NonOperatingIncome)
            .with(COST_OF_SALES, LineItem::OperatingCost)
            .with(ADVERTISING, LineItem::SellingExpense)
            .with(FINANCE_CHARGES, LineItem::FinanceExpense);

        for category in [
            BUSINESS_ENTERTAINMENT,
            TRAVEL,
            OFFICE,
            STAFF_WELFARE,
            PAYROLL,
            VEHICLE,
            CONSULTING,
            RENT,
            UNCATEGORIZED_OUTFLOW,
        ] {
            mapping = mapping.with(category, LineItem::AdministrativeExpense);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entertainment_is_administrative() {
        let mapping = LineItemMapping::default();
        assert_eq!(
            mapping.line_item_for(BUSINESS_ENTERTAINMENT),
            LineItem::AdministrativeExpense
        );
    }

    #[test]
    fn test_primary_revenue_is_operating_revenue() {
        let mapping = LineItemMapping::default();
        assert_eq!(
            mapping.line_item_for(PRIMARY_REVENUE),
            LineItem::OperatingRevenue
        );
        assert_eq!(
            LineItem::OperatingRevenue.to_string(),
            "Operating Revenue"
        );
    }

    #[test]
    fn test_every_business_category_is_mapped_to_its_side() {
        let mapping = LineItemMapping::default();
        for c in BUSINESS_OUTFLOW {
            let item = mapping.line_item_for(c);
            assert!(item != LineItem::OperatingRevenue, "{c} mapped to revenue");
        }
        for c in BUSINESS_INFLOW {
            let item = mapping.line_item_for(c);
            assert!(
                matches!(
                    item,
                    LineItem::OperatingRevenue | LineItem::NonOperatingIncome
                ),
                "{c} mapped to {item}"
            );
        }
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let mapping = LineItemMapping::default();
        assert_eq!(
            mapping.line_item_for("garbage"),
            LineItem::AdministrativeExpense
        );
        assert_eq!(mapping.line_item_for(""), LineItem::AdministrativeExpense);
    }

    #[test]
    fn test_override() {
        let mapping = LineItemMapping::default().with(TRAVEL, LineItem::SellingExpense);
        assert_eq!(mapping.line_item_for(TRAVEL), LineItem::SellingExpense);
    }
}
