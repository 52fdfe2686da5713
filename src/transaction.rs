//! Transaction models for CSV parsing and internal representation.

use crate::amount::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether money is coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Money received.
    Inflow,

    /// Money spent.
    Outflow,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Inflow => "inflow",
            Direction::Outflow => "outflow",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Accepts the English names and the labels used by older ledger files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inflow" | "income" | "in" | "收入" => Ok(Direction::Inflow),
            "outflow" | "expense" | "out" | "支出" => Ok(Direction::Outflow),
            other => Err(format!("Unknown direction: '{other}'")),
        }
    }
}

impl Serialize for Direction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Direction::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A validated ledger entry.
///
/// Corrections replace the whole record; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub direction: Direction,
    /// Accounting category. Not checked against any known set.
    pub category: String,
    pub amount: Amount,
    pub note: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        direction: Direction,
        category: impl Into<String>,
        amount: Amount,
        note: impl Into<String>,
    ) -> Self {
        Transaction {
            date,
            direction,
            category: category.into(),
            amount,
            note: note.into(),
        }
    }
}

/// Raw ledger row as read from CSV.
///
/// Every field is kept as a string so a bad row can be reported and skipped
/// without aborting the whole file. The Chinese column names written by older
/// ledger files (`日期,类型,分类,金额,备注`) are accepted as aliases.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    #[serde(alias = "日期")]
    pub date: String,
    #[serde(alias = "类型")]
    pub direction: String,
    #[serde(default, alias = "分类")]
    pub category: Option<String>,
    #[serde(alias = "金额")]
    pub amount: String,
    #[serde(default, alias = "备注")]
    pub note: Option<String>,
}

/// A parsed row whose category may still be missing.
#[derive(Debug, Clone)]
pub struct ParsedRecord {
    pub date: NaiveDate,
    pub direction: Direction,
    pub category: Option<String>,
    pub amount: Amount,
    pub note: String,
}

impl TransactionRecord {
    /// Parses the raw CSV record into typed fields.
    ///
    /// Returns a message describing the first bad field.
    pub fn parse(&self) -> Result<ParsedRecord, String> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|e| format!("bad date '{}': {}", self.date.trim(), e))?;
        let direction = Direction::from_str(&self.direction)?;
        let amount = Amount::parse_non_negative(&self.amount)
            .ok_or_else(|| {
                format!(
                    "bad amount '{}' (expected 0 to {})",
                    self.amount.trim(),
                    Amount::MAX_ENTRY
                )
            })?;
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(ParsedRecord {
            date,
            direction,
            category,
            amount,
            note: self.note.as_deref().unwrap_or("").trim().to_string(),
        })
    }
}

impl ParsedRecord {
    /// Completes the record, using `fallback` when no category was given.
    pub fn into_transaction(self, fallback: impl FnOnce(Direction, &str) -> String) -> Transaction {
        let category = match self.category {
            Some(c) => c,
            None => fallback(self.direction, &self.note),
        };
        Transaction {
            date: self.date,
            direction: self.direction,
            category,
            amount: self.amount,
            note: self.note,
        }
    }
}
