use serde::{Deserialize, Serialize};

use crate::config::UnderwritingPolicy;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, UnderwritingError};
use crate::types::PropertySpec;

/// the seven eligibility rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditRule {
    IncomeRatio,
    CreditHistory,
    EmploymentTenure,
    DebtToIncome,
    MaxFinancing,
    AgeAtMaturity,
    SavingsCapacity,
}

impl CreditRule {
    pub const ORDER: [CreditRule; 7] = [
        CreditRule::IncomeRatio,
        CreditRule::CreditHistory,
        CreditRule::EmploymentTenure,
        CreditRule::DebtToIncome,
        CreditRule::MaxFinancing,
        CreditRule::AgeAtMaturity,
        CreditRule::SavingsCapacity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CreditRule::IncomeRatio => "Payment/Income Ratio",
            CreditRule::CreditHistory => "Credit History",
            CreditRule::EmploymentTenure => "Employment Tenure",
            CreditRule::DebtToIncome => "Debt/Income Ratio",
            CreditRule::MaxFinancing => "Maximum Financing",
            CreditRule::AgeAtMaturity => "Age at Maturity",
            CreditRule::SavingsCapacity => "Savings Capacity",
        }
    }

    /// human readable requirement, with the policy's thresholds filled in
    pub fn description(&self, policy: &UnderwritingPolicy) -> String {
        match self {
            CreditRule::IncomeRatio => format!(
                "The monthly payment must not exceed {} of monthly income",
                policy.max_income_ratio
            ),
            CreditRule::CreditHistory => {
                "No unpaid debts or serious delinquencies on record".to_string()
            }
            CreditRule::EmploymentTenure => format!(
                "At least {} year(s) of employment required",
                policy.min_employment_years
            ),
            CreditRule::DebtToIncome => format!(
                "Total monthly debt including the new payment must not exceed {} of income",
                policy.max_debt_ratio
            ),
            CreditRule::MaxFinancing => {
                "The requested amount must be within the maximum financing for the property type"
                    .to_string()
            }
            CreditRule::AgeAtMaturity => format!(
                "Age at the end of the loan must not exceed {} years",
                policy.age_ceiling()
            ),
            CreditRule::SavingsCapacity => format!(
                "At least {} of the 5 savings criteria must be met",
                policy.savings.required_criteria
            ),
        }
    }
}

pub(crate) fn income_ratio(
    policy: &UnderwritingPolicy,
    monthly_payment: Money,
    income: Money,
) -> Result<bool> {
    let ratio = ratio_to_income(monthly_payment, income, policy.ratio_scale)?;
    Ok(ratio <= policy.max_income_ratio)
}

pub(crate) fn employment_tenure(policy: &UnderwritingPolicy, employment_years: u32) -> bool {
    employment_years >= policy.min_employment_years
}

pub(crate) fn debt_to_income(
    policy: &UnderwritingPolicy,
    current_debt: Money,
    monthly_payment: Money,
    income: Money,
) -> Result<bool> {
    let total_debt = current_debt
        .checked_add(monthly_payment)
        .ok_or_else(|| UnderwritingError::overflow("total monthly debt"))?;

    let ratio = ratio_to_income(total_debt, income, policy.ratio_scale)?;
    Ok(ratio <= policy.max_debt_ratio)
}

/// income must be positive; any other failure is an overflow
fn ratio_to_income(amount: Money, income: Money, scale: u32) -> Result<Rate> {
    if !income.is_positive() {
        return Err(UnderwritingError::InvalidIncome { income });
    }

    amount
        .ratio_to(income, scale)
        .ok_or_else(|| UnderwritingError::overflow("income ratio"))
}

/// inclusive: asking for exactly the maximum passes
pub(crate) fn max_financing(policy: &UnderwritingPolicy, property: &PropertySpec) -> Result<bool> {
    let fraction = policy.max_financing.get(property.property_type);
    let max_amount = property
        .property_value
        .checked_fraction(fraction)
        .ok_or_else(|| UnderwritingError::overflow("maximum financing"))?;

    Ok(property.requested_amount <= max_amount)
}

pub(crate) fn age_at_maturity(policy: &UnderwritingPolicy, age: u32, term_years: u32) -> bool {
    u64::from(age) + u64::from(term_years) <= u64::from(policy.age_ceiling())
}
