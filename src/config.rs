use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, UnderwritingError};
use crate::products::LoanProduct;
use crate::types::PropertyType;

/// eligibility policy injected into the evaluation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwritingPolicy {
    /// monthly payment / income ceiling
    pub max_income_ratio: Rate,
    /// (existing debt + payment) / income ceiling
    pub max_debt_ratio: Rate,
    /// fractional digits kept when computing the two ratios above
    pub ratio_scale: u32,
    pub min_employment_years: u32,
    pub max_age_at_maturity: u32,
    pub age_margin: u32,
    pub max_financing: MaxFinancingTable,
    pub savings: SavingsPolicy,
}

/// maximum loan-to-value fraction per property type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MaxFinancingTable {
    pub first_home: Rate,
    pub second_home: Rate,
    pub commercial: Rate,
    pub remodeling: Rate,
}

/// thresholds of the five savings capacity criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsPolicy {
    /// balance / requested amount
    pub min_balance_fraction: Rate,
    pub min_consecutive_months: u32,
    pub max_significant_withdrawals: u32,
    /// monthly deposits / monthly income
    pub min_deposit_income_fraction: Rate,
    /// account age splitting the two balance requirements below
    pub tenure_threshold_months: u32,
    pub short_tenure_balance_fraction: Rate,
    pub long_tenure_balance_fraction: Rate,
    /// largest recent withdrawal / balance
    pub max_withdrawal_balance_fraction: Rate,
    /// criteria needed out of five
    pub required_criteria: u8,
}

/// charges added on top of the amortized installment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// monthly life insurance as a fraction of the principal
    pub life_insurance_rate: Rate,
    /// flat monthly administration charge
    pub monthly_admin_charge: Money,
    /// one-time administration fee as a fraction of the principal
    pub admin_fee_rate: Rate,
    /// fractional digits kept for the monthly periodic rate
    pub rate_scale: u32,
}

impl Default for UnderwritingPolicy {
    fn default() -> Self {
        Self {
            max_income_ratio: Rate::from_percentage(35),
            max_debt_ratio: Rate::from_percentage(50),
            ratio_scale: 4,
            min_employment_years: 1,
            max_age_at_maturity: 75,
            age_margin: 5,
            max_financing: MaxFinancingTable::default(),
            savings: SavingsPolicy::default(),
        }
    }
}

impl Default for MaxFinancingTable {
    fn default() -> Self {
        Self::from_products()
    }
}

impl Default for SavingsPolicy {
    fn default() -> Self {
        Self {
            min_balance_fraction: Rate::from_percentage(10),
            min_consecutive_months: 12,
            max_significant_withdrawals: 0,
            min_deposit_income_fraction: Rate::from_percentage(5),
            tenure_threshold_months: 24,
            short_tenure_balance_fraction: Rate::from_percentage(20),
            long_tenure_balance_fraction: Rate::from_percentage(10),
            max_withdrawal_balance_fraction: Rate::from_percentage(30),
            required_criteria: 3,
        }
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            life_insurance_rate: Rate::from_bps(3),
            monthly_admin_charge: Money::from_major(20_000),
            admin_fee_rate: Rate::from_percentage(1),
            rate_scale: 6,
        }
    }
}

impl UnderwritingPolicy {
    /// load a policy from json; omitted keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json).map_err(|e| {
            UnderwritingError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        policy.validate()?;
        Ok(policy)
    }

    /// oldest age allowed when the last installment falls due
    pub fn age_ceiling(&self) -> u32 {
        self.max_age_at_maturity.saturating_sub(self.age_margin)
    }

    pub fn validate(&self) -> Result<()> {
        check_unit_interval("max_income_ratio", self.max_income_ratio)?;
        check_unit_interval("max_debt_ratio", self.max_debt_ratio)?;

        if self.ratio_scale > 28 {
            return Err(UnderwritingError::InvalidConfiguration {
                message: format!("ratio_scale {} exceeds decimal precision", self.ratio_scale),
            });
        }

        if self.age_margin > self.max_age_at_maturity {
            return Err(UnderwritingError::InvalidConfiguration {
                message: format!(
                    "age margin {} larger than maximum age {}",
                    self.age_margin, self.max_age_at_maturity
                ),
            });
        }

        for property_type in PropertyType::ALL {
            let fraction = self.max_financing.get(property_type);
            if fraction <= Rate::ZERO || fraction > Rate::ONE {
                return Err(UnderwritingError::InvalidConfiguration {
                    message: format!(
                        "max financing for {:?} must be in (0, 1], got {}",
                        property_type, fraction
                    ),
                });
            }
        }

        self.savings.validate()
    }
}

impl MaxFinancingTable {
    /// table taken from the product catalog
    pub fn from_products() -> Self {
        Self {
            first_home: LoanProduct::for_property_type(PropertyType::FirstHome).max_financing,
            second_home: LoanProduct::for_property_type(PropertyType::SecondHome).max_financing,
            commercial: LoanProduct::for_property_type(PropertyType::Commercial).max_financing,
            remodeling: LoanProduct::for_property_type(PropertyType::Remodeling).max_financing,
        }
    }

    pub fn get(&self, property_type: PropertyType) -> Rate {
        match property_type {
            PropertyType::FirstHome => self.first_home,
            PropertyType::SecondHome => self.second_home,
            PropertyType::Commercial => self.commercial,
            PropertyType::Remodeling => self.remodeling,
        }
    }
}

impl SavingsPolicy {
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("min_balance_fraction", self.min_balance_fraction),
            ("min_deposit_income_fraction", self.min_deposit_income_fraction),
            ("short_tenure_balance_fraction", self.short_tenure_balance_fraction),
            ("long_tenure_balance_fraction", self.long_tenure_balance_fraction),
            ("max_withdrawal_balance_fraction", self.max_withdrawal_balance_fraction),
        ];
        for (name, fraction) in fractions {
            if fraction.is_negative() {
                return Err(UnderwritingError::InvalidConfiguration {
                    message: format!("{} must not be negative", name),
                });
            }
        }

        if self.required_criteria == 0 || self.required_criteria > 5 {
            return Err(UnderwritingError::InvalidConfiguration {
                message: format!(
                    "required_criteria must be between 1 and 5, got {}",
                    self.required_criteria
                ),
            });
        }

        Ok(())
    }
}

impl CostConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            UnderwritingError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.life_insurance_rate.is_negative() || self.admin_fee_rate.is_negative() {
            return Err(UnderwritingError::InvalidConfiguration {
                message: "fee rates must not be negative".to_string(),
            });
        }

        if self.monthly_admin_charge.is_negative() {
            return Err(UnderwritingError::InvalidConfiguration {
                message: format!("monthly admin charge {} is negative", self.monthly_admin_charge),
            });
        }

        // below 6 digits typical rates collapse to zero
        if self.rate_scale < 6 || self.rate_scale > 20 {
            return Err(UnderwritingError::InvalidConfiguration {
                message: format!("rate_scale must be between 6 and 20, got {}", self.rate_scale),
            });
        }

        Ok(())
    }
}

fn check_unit_interval(name: &str, rate: Rate) -> Result<()> {
    if rate.is_negative() || rate.as_decimal() > dec!(1) {
        return Err(UnderwritingError::InvalidConfiguration {
            message: format!("{} must be between 0 and 1, got {}", name, rate.as_decimal()),
        });
    }
    Ok(())
}
