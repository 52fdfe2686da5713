//! # Ledger P&L
//!
//! Classifies income and expense transactions from their free-text notes and
//! rolls them up into a simplified profit-and-loss statement.
//!
//! ## Design Principles
//!
//! - **First-match classification**: keyword rules are an ordered list, so the
//!   winning category for a note is reproducible
//! - **Stored categories are authoritative**: statements read the category on
//!   each record and never re-classify, so hand corrections stick
//! - **Total lookups**: unknown categories fall back to a default line item and
//!   an empty period yields an all-zero statement
//! - **Fixed-point arithmetic**: amounts are kept at 2 decimal places via
//!   `rust_decimal`
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use ledger_pnl::{Amount, Classifier, Direction, Ledger, Period, StatementBuilder, Transaction};
//!
//! let classifier = Classifier::default();
//! let mut ledger = Ledger::new();
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//!
//! for (direction, amount, note) in [
//!     (Direction::Inflow, 1000, "销售3月货款"),
//!     (Direction::Outflow, 300, "请客户吃饭"),
//! ] {
//!     let category = classifier.classify(direction, note);
//!     ledger.append(Transaction::new(date, direction, category, Amount::from_units(amount), note));
//! }
//!
//! let statement = StatementBuilder::default().build(&ledger.snapshot(), &Period::year(2024));
//! assert_eq!(statement.operating_profit, Amount::from_units(700));
//! assert_eq!(statement.tax_estimate, Amount::from_units(35));
//! ```

pub mod amount;
pub mod category;
pub mod classifier;
pub mod config;
pub mod error;
pub mod ledger;
pub mod mapping;
pub mod period;
pub mod rules;
pub mod statement;
pub mod summary;
pub mod tax;
pub mod transaction;

pub use amount::Amount;
pub use category::EntryMode;
pub use classifier::{Classifier, DefaultCategories};
pub use config::Config;
pub use error::{EngineError, Result};
pub use ledger::{Ledger, Snapshot};
pub use mapping::{LineItem, LineItemMapping};
pub use period::Period;
pub use rules::{Rule, RuleStore};
pub use statement::{Statement, StatementBuilder, StatementRow};
pub use summary::Summary;
pub use tax::TaxSchedule;
pub use transaction::{Direction, Transaction, TransactionRecord};
