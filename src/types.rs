use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// property class the loan finances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    FirstHome,
    SecondHome,
    Commercial,
    Remodeling,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::FirstHome,
        PropertyType::SecondHome,
        PropertyType::Commercial,
        PropertyType::Remodeling,
    ];
}

/// principal, rate and term of a fixed-rate loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub principal: Money,
    /// annual rate in percent, 5.5 means 5.5%
    pub annual_rate_percent: Decimal,
    pub term_years: u32,
}

impl LoanRequest {
    pub fn new(principal: Money, annual_rate_percent: Decimal, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }
}

/// applicant's financial profile at the time of evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfile {
    pub monthly_income: Money,
    pub employment_years: u32,
    pub current_monthly_debt: Money,
    pub age: u32,
}

/// property being financed and the amount requested against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    pub property_type: PropertyType,
    pub property_value: Money,
    pub requested_amount: Money,
}

/// loan terms together with the property they finance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub request: LoanRequest,
    pub property: PropertySpec,
}

impl LoanApplication {
    pub fn new(request: LoanRequest, property: PropertySpec) -> Self {
        Self { request, property }
    }

    pub fn requested_amount(&self) -> Money {
        self.property.requested_amount
    }

    pub fn term_years(&self) -> u32 {
        self.request.term_years
    }
}

/// applicant's savings account snapshot; any field may be unknown
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProfile {
    pub current_balance: Option<Money>,
    pub monthly_deposits_amount: Option<Money>,
    #[serde(rename = "largestWithdrawalLast6Months")]
    pub largest_withdrawal_last_6_months: Option<Money>,
    pub consecutive_months_with_balance: Option<u32>,
    pub significant_withdrawals_count: Option<u32>,
    /// verdict of the last savings capacity evaluation, display only
    #[serde(default)]
    pub meets_savings_criteria: Option<bool>,
}

impl SavingsProfile {
    pub fn new(
        current_balance: Money,
        monthly_deposits_amount: Money,
        largest_withdrawal: Money,
    ) -> Self {
        Self {
            current_balance: Some(current_balance),
            monthly_deposits_amount: Some(monthly_deposits_amount),
            largest_withdrawal_last_6_months: Some(largest_withdrawal),
            ..Self::default()
        }
    }

    pub fn with_history(mut self, consecutive_months: u32, significant_withdrawals: u32) -> Self {
        self.consecutive_months_with_balance = Some(consecutive_months);
        self.significant_withdrawals_count = Some(significant_withdrawals);
        self
    }
}
