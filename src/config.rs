//! TOML configuration.
//!
//! Every field is optional:
//!
//! ```toml
//! rules = "rules.toml"
//!
//! [defaults]
//! inflow = "主营业务收入"
//! outflow = "其他支出/待分类"
//!
//! [tax]
//! kind = "tiered"
//! low_rate = "0.05"
//! high_rate = "0.25"
//! threshold = 3000000
//! ```
//!
//! A relative `rules` path is resolved against the config file's directory.

use crate::classifier::{Classifier, DefaultCategories};
use crate::error::Result;
use crate::mapping::LineItemMapping;
use crate::rules::RuleStore;
use crate::statement::StatementBuilder;
use crate::tax::TaxSchedule;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Optional rule file replacing the built-in keyword table.
    pub rules: Option<PathBuf>,
    pub defaults: DefaultCategories,
    pub tax: TaxSchedule,
}

impl Config {
    /// Parses a config and validates its tax schedule.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.tax.validate()?;
        Ok(config)
    }

    /// Reads a config file, resolving a relative rule path next to it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Config::from_toml(&content)?;

        if let Some(dir) = path.parent() {
            config.rules = config
                .rules
                .take()
                .map(|rules| if rules.is_relative() { dir.join(rules) } else { rules });
        }

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// The configured rule store, or the built-in one.
    pub fn rule_store(&self) -> Result<RuleStore> {
        match &self.rules {
            Some(path) => {
                debug!("Loading rules from {}", path.display());
                RuleStore::from_toml(&fs::read_to_string(path)?)
            }
            None => Ok(RuleStore::default()),
        }
    }

    pub fn classifier(&self) -> Result<Classifier> {
        Ok(Classifier::new(&self.rule_store()?, self.defaults.clone()))
    }

    pub fn statement_builder(&self) -> StatementBuilder {
        StatementBuilder::new(LineItemMapping::default(), self.tax.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::category::*;
    use crate::transaction::Direction;
    use rust_decimal::Decimal;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.rules.is_none());
        assert_eq!(config.defaults, DefaultCategories::default());
        assert_eq!(config.tax, TaxSchedule::default());
    }

    #[test]
    fn partial_defaults_section() {
        let config = Config::from_toml("[defaults]\ninflow = \"Sales\"").unwrap();
        assert_eq!(config.defaults.inflow, "Sales");
        assert_eq!(config.defaults.outflow, UNCATEGORIZED_OUTFLOW);
    }

    #[test]
    fn flat_tax_section() {
        let config = Config::from_toml("[tax]\nkind = \"flat\"\nrate = \"0.2\"").unwrap();
        let builder = config.statement_builder();
        let ledger = vec![crate::Transaction::new(
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Direction::Inflow,
            PRIMARY_REVENUE,
            Amount::from_units(1000),
            "",
        )];
        let s = builder.build(&ledger, &crate::Period::year(2024));
        assert_eq!(s.tax_estimate, Amount::from_units(200));
        assert_eq!(config.tax, TaxSchedule::flat(Decimal::new(2, 1)));
    }

    #[test]
    fn malformed_config_is_error() {
        assert!(Config::from_toml("[tax]\nkind = \"progressive\"").is_err());
    }

    #[test]
    fn negative_tax_rate_is_rejected() {
        let err = Config::from_toml("[tax]\nkind = \"flat\"\nrate = \"-0.2\"").unwrap_err();
        assert!(matches!(err, crate::EngineError::InvalidTaxSchedule(_)));

        let err = Config::from_toml(
            "[tax]\nkind = \"tiered\"\nlow_rate = \"0.05\"\nhigh_rate = \"0.25\"\nthreshold = -1",
        )
        .unwrap_err();
        assert!(err.to_string().contains("threshold"), "{}", err);
    }

    #[test]
    fn unquoted_threshold_is_accepted() {
        let config = Config::from_toml(
            "[tax]\nkind = \"tiered\"\nlow_rate = \"0.05\"\nhigh_rate = \"0.25\"\nthreshold = 3000000",
        )
        .unwrap();
        assert_eq!(config.tax, TaxSchedule::default());
    }

    #[test]
    fn load_resolves_rules_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut rules = fs::File::create(dir.path().join("rules.toml")).unwrap();
        writeln!(rules, "[[outflow]]\ncategory = \"Coffee\"\nkeywords = [\"latte\"]").unwrap();

        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "rules = \"rules.toml\"").unwrap();

        let config = Config::load(&config_path).unwrap();
        let classifier = config.classifier().unwrap();
        assert_eq!(classifier.classify(Direction::Outflow, "Oat LATTE"), "Coffee");
        assert_eq!(
            classifier.classify(Direction::Outflow, "请客户吃饭"),
            UNCATEGORIZED_OUTFLOW
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, crate::EngineError::Io(_)));
    }
}
