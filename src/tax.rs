//! Simplified income tax estimate.
//!
//! This is a rate-by-bracket approximation, not a tax computation: the whole
//! profit is taxed at the single rate of the bracket it falls in.

use crate::amount::Amount;
use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

/// How the tax estimate is derived from operating profit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TaxSchedule {
    /// One rate for any positive profit.
    Flat {
        #[serde(with = "rust_decimal::serde::str")]
        rate: Decimal,
    },

    /// `low_rate` up to and including `threshold`, `high_rate` above it.
    Tiered {
        #[serde(with = "rust_decimal::serde::str")]
        low_rate: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        high_rate: Decimal,
        threshold: Amount,
    },
}

impl TaxSchedule {
    pub fn flat(rate: Decimal) -> Self {
        TaxSchedule::Flat { rate }
    }

    /// The rate applied to a given (non-negative) profit.
    pub fn rate_for(&self, profit: Amount) -> Decimal {
        match self {
            TaxSchedule::Flat { rate } => *rate,
            TaxSchedule::Tiered {
                low_rate,
                high_rate,
                threshold,
            } => {
                if profit <= *threshold {
                    *low_rate
                } else {
                    *high_rate
                }
            }
        }
    }

    /// Checks every rate is within [0, 1] and the threshold is not negative.
    pub fn validate(&self) -> Result<()> {
        let check_rate = |name: &str, rate: Decimal| {
            if (rate.is_sign_negative() && !rate.is_zero()) || rate > Decimal::ONE {
                Err(EngineError::InvalidTaxSchedule(format!(
                    "{} {} is outside 0 to 1",
                    name, rate
                )))
            } else {
                Ok(())
            }
        };

        match self {
            TaxSchedule::Flat { rate } => check_rate("rate", *rate),
            TaxSchedule::Tiered {
                low_rate,
                high_rate,
                threshold,
            } => {
                check_rate("low_rate", *low_rate)?;
                check_rate("high_rate", *high_rate)?;
                if threshold.is_negative() {
                    return Err(EngineError::InvalidTaxSchedule(format!(
                        "threshold {} is negative",
                        threshold
                    )));
                }
                Ok(())
            }
        }
    }

    /// Estimated tax on `profit`. Zero when profit is zero or negative, and
    /// never below zero whatever the rate.
    pub fn estimate(&self, profit: Amount) -> Amount {
        if profit.is_negative() || profit.is_zero() {
            return Amount::ZERO;
        }
        profit.apply_rate(self.rate_for(profit)).max(Amount::ZERO)
    }
}

impl Default for TaxSchedule {
    /// 5% up to 3,000,000 of profit, 25% above.
    fn default() -> Self {
        TaxSchedule::Tiered {
            low_rate: Decimal::new(5, 2),
            high_rate: Decimal::new(25, 2),
            threshold: Amount::from_units(3_000_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_tier() {
        let tax = TaxSchedule::default();
        assert_eq!(tax.estimate(Amount::from_units(700)).to_string(), "35.00");
    }

    #[test]
    fn test_threshold_is_inclusive_of_low_tier() {
        let tax = TaxSchedule::default();
        assert_eq!(
            tax.estimate(Amount::from_units(3_000_000)),
            Amount::from_units(150_000)
        );
        assert_eq!(
            tax.estimate(Amount::from_units(3_000_001)).to_string(),
            "750000.25"
        );
    }

    #[test]
    fn test_never_negative() {
        let tax = TaxSchedule::default();
        let loss = Amount::ZERO - Amount::from_units(500);
        assert_eq!(tax.estimate(loss), Amount::ZERO);
        assert_eq!(tax.estimate(Amount::ZERO), Amount::ZERO);
    }

    #[test]
    fn test_flat() {
        let tax = TaxSchedule::flat(Decimal::new(20, 2));
        assert_eq!(tax.estimate(Amount::from_units(1000)), Amount::from_units(200));
    }

    #[test]
    fn test_validate_rejects_out_of_range_rates() {
        assert!(TaxSchedule::default().validate().is_ok());
        assert!(TaxSchedule::flat(Decimal::ZERO).validate().is_ok());
        assert!(TaxSchedule::flat(Decimal::ONE).validate().is_ok());

        let negative = TaxSchedule::flat(Decimal::new(-2, 1));
        assert!(matches!(
            negative.validate(),
            Err(EngineError::InvalidTaxSchedule(_))
        ));
        assert!(TaxSchedule::flat(Decimal::new(15, 1)).validate().is_err());

        let bad_threshold = TaxSchedule::Tiered {
            low_rate: Decimal::new(5, 2),
            high_rate: Decimal::new(25, 2),
            threshold: Amount::ZERO - Amount::from_units(1),
        };
        assert!(bad_threshold.validate().is_err());
    }

    #[test]
    fn test_estimate_clamps_negative_rate_to_zero() {
        let tax = TaxSchedule::flat(Decimal::new(-2, 1));
        assert_eq!(tax.estimate(Amount::from_units(1000)), Amount::ZERO);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let tax: TaxSchedule =
            toml::from_str("kind = \"flat\"\nrate = \"0.2\"").unwrap();
        assert_eq!(tax, TaxSchedule::flat(Decimal::new(2, 1)));

        let tax: TaxSchedule = toml::from_str(
            "kind = \"tiered\"\nlow_rate = \"0.05\"\nhigh_rate = \"0.25\"\nthreshold = \"1000\"",
        )
        .unwrap();
        assert_eq!(tax.rate_for(Amount::from_units(1001)), Decimal::new(25, 2));
    }
}
