//! Reporting period filter.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use std::fmt;

/// A calendar year, optionally narrowed to a set of months.
///
/// An empty month set means the whole year. Month numbers outside `1..=12`
/// are kept but simply never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub months: BTreeSet<u32>,
}

impl Period {
    pub fn year(year: i32) -> Self {
        Period {
            year,
            months: BTreeSet::new(),
        }
    }

    pub fn months(year: i32, months: impl IntoIterator<Item = u32>) -> Self {
        Period {
            year,
            months: months.into_iter().collect(),
        }
    }

    pub fn is_whole_year(&self) -> bool {
        self.months.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && (self.is_whole_year() || self.months.contains(&date.month()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole_year() {
            return write!(f, "{}", self.year);
        }
        let months: Vec<String> = self.months.iter().map(|m| m.to_string()).collect();
        write!(f, "{} months {}", self.year, months.join(","))
    }
}
