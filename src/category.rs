//! Category names used by the default business rule set and personal mode.
//!
//! Categories are plain strings on a [`Transaction`](crate::Transaction); the
//! constants here are the known set the default rules and line-item mapping
//! are written against. Anything else is still accepted by the ledger.

use crate::transaction::Direction;

/// Business entertainment (业务招待费).
pub const BUSINESS_ENTERTAINMENT: &str = "业务招待费";
/// Travel (差旅费).
pub const TRAVEL: &str = "差旅费";
/// Office expenses (办公费).
pub const OFFICE: &str = "办公费";
/// Staff welfare (福利费).
pub const STAFF_WELFARE: &str = "福利费";
/// Payroll (职工薪酬).
pub const PAYROLL: &str = "职工薪酬";
/// Vehicle running costs (车辆使用费).
pub const VEHICLE: &str = "车辆使用费";
/// Consulting and service fees (咨询/劳务费).
pub const CONSULTING: &str = "咨询/劳务费";
/// Rent and leasing (租赁费).
pub const RENT: &str = "租赁费";
/// Advertising and commission (广宣费/佣金).
pub const ADVERTISING: &str = "广宣费/佣金";
/// Cost of sales (主营业务成本).
pub const COST_OF_SALES: &str = "主营业务成本";
/// Finance charges (财务费用).
pub const FINANCE_CHARGES: &str = "财务费用";
/// Uncategorized outflow (其他支出/待分类).
pub const UNCATEGORIZED_OUTFLOW: &str = "其他支出/待分类";

/// Primary revenue (主营业务收入).
pub const PRIMARY_REVENUE: &str = "主营业务收入";
/// Other operating revenue (其他业务收入).
pub const OTHER_REVENUE: &str = "其他业务收入";
/// Non-operating income (营业外收入).
pub const NON_OPERATING_INCOME: &str = "营业外收入";
/// Uncategorized inflow (其他收入/待分类).
pub const UNCATEGORIZED_INFLOW: &str = "其他收入/待分类";

/// Business outflow categories, in rule order, fallback last.
pub const BUSINESS_OUTFLOW: &[&str] = &[
    BUSINESS_ENTERTAINMENT,
    TRAVEL,
    OFFICE,
    STAFF_WELFARE,
    PAYROLL,
    VEHICLE,
    CONSULTING,
    RENT,
    ADVERTISING,
    COST_OF_SALES,
    FINANCE_CHARGES,
    UNCATEGORIZED_OUTFLOW,
];

/// Business inflow categories, default first, fallback last.
pub const BUSINESS_INFLOW: &[&str] = &[
    PRIMARY_REVENUE,
    OTHER_REVENUE,
    NON_OPERATING_INCOME,
    UNCATEGORIZED_INFLOW,
];

/// Personal-mode outflow categories.
pub const PERSONAL_OUTFLOW: &[&str] = &["餐饮", "交通", "购物", "娱乐", "居住", "医疗", "其他"];

/// Personal-mode inflow categories.
pub const PERSONAL_INFLOW: &[&str] = &["工资", "理财", "兼职", "其他"];

/// How a new transaction gets its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    /// Category inferred from the note by the classifier (or supplied by hand).
    #[default]
    Business,
    /// Category picked from the small personal set; no inference.
    Personal,
}

impl EntryMode {
    /// The categories offered for `direction` in this mode.
    pub fn categories(self, direction: Direction) -> &'static [&'static str] {
        match (self, direction) {
            (EntryMode::Business, Direction::Inflow) => BUSINESS_INFLOW,
            (EntryMode::Business, Direction::Outflow) => BUSINESS_OUTFLOW,
            (EntryMode::Personal, Direction::Inflow) => PERSONAL_INFLOW,
            (EntryMode::Personal, Direction::Outflow) => PERSONAL_OUTFLOW,
        }
    }

    /// Returns `true` if `category` is offered for `direction` in this mode.
    pub fn allows(self, direction: Direction, category: &str) -> bool {
        self.categories(direction).contains(&category)
    }

    pub fn name(self) -> &'static str {
        match self {
            EntryMode::Business => "business",
            EntryMode::Personal => "personal",
        }
    }
}
