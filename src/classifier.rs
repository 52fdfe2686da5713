//! Note-based category inference.
//!
//! Matching is a case-insensitive substring test against the note. Rules are
//! tried in store order and keywords in rule order; the first hit wins, even
//! when a later rule would match more specifically.

use crate::category::{PRIMARY_REVENUE, UNCATEGORIZED_OUTFLOW};
use crate::rules::{Rule, RuleStore};
use crate::transaction::Direction;
use log::debug;
use serde::Deserialize;

/// Categories returned when no rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultCategories {
    pub inflow: String,
    pub outflow: String,
}

impl DefaultCategories {
    pub fn for_direction(&self, direction: Direction) -> &str {
        match direction {
            Direction::Inflow => &self.inflow,
            Direction::Outflow => &self.outflow,
        }
    }
}

impl Default for DefaultCategories {
    fn default() -> Self {
        DefaultCategories {
            inflow: PRIMARY_REVENUE.to_string(),
            outflow: UNCATEGORIZED_OUTFLOW.to_string(),
        }
    }
}

/// Internal pairing of a rule with its lower-cased keywords.
struct CompiledRule {
    category: String,
    keywords: Vec<String>,
}

impl CompiledRule {
    fn compile(rule: &Rule) -> Self {
        CompiledRule {
            category: rule.category.clone(),
            keywords: rule
                .keywords
                .iter()
                .map(|k| k.to_lowercase())
                // An empty keyword would match every note.
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn matches(&self, note: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| note.contains(k.as_str()))
            .map(String::as_str)
    }
}

/// Deterministic, first-match classifier.
pub struct Classifier {
    inflow: Vec<CompiledRule>,
    outflow: Vec<CompiledRule>,
    defaults: DefaultCategories,
}

impl Classifier {
    pub fn new(rules: &RuleStore, defaults: DefaultCategories) -> Self {
        let compile = |direction: Direction| -> Vec<CompiledRule> {
            rules
                .keywords_for(direction)
                .iter()
                .map(CompiledRule::compile)
                .collect()
        };
        Classifier {
            inflow: compile(Direction::Inflow),
            outflow: compile(Direction::Outflow),
            defaults,
        }
    }

    /// Returns the category for a transaction with the given direction and note.
    ///
    /// Never fails: a note that matches nothing (including an empty note) gets
    /// the direction's default category.
    pub fn classify(&self, direction: Direction, note: &str) -> &str {
        let rules = match direction {
            Direction::Inflow => &self.inflow,
            Direction::Outflow => &self.outflow,
        };
        let normalized = note.to_lowercase();

        for rule in rules {
            if let Some(keyword) = rule.matches(&normalized) {
                debug!(
                    "Classified {} note '{}' as {} (keyword '{}')",
                    direction, note, rule.category, keyword
                );
                return &rule.category;
            }
        }

        let fallback = self.defaults.for_direction(direction);
        debug!(
            "No rule matched {} note '{}', using default {}",
            direction, note, fallback
        );
        fallback
    }

    pub fn defaults(&self) -> &DefaultCategories {
        &self.defaults
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(&RuleStore::default(), DefaultCategories::default())
    }
}
