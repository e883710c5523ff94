use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{Result, UnderwritingError};
use crate::types::{ApplicantProfile, LoanApplication, LoanRequest, PropertySpec, PropertyType};

/// Loan application as submitted by a client.
///
/// Every field is optional so a partially filled payload still parses;
/// completeness is checked by [`ApplicationForm::into_snapshots`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    pub property_type: Option<PropertyType>,
    pub property_value: Option<Money>,
    pub requested_amount: Option<Money>,
    /// years
    pub term: Option<u32>,
    /// annual rate in percent
    pub interest_rate: Option<Decimal>,
    pub monthly_income: Option<Money>,
    pub employment_years: Option<u32>,
    pub current_debt: Option<Money>,
    pub age: Option<u32>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(UnderwritingError::MissingField { field })
}

impl ApplicationForm {
    /// Split the form into the loan application and the applicant snapshot.
    ///
    /// The requested amount doubles as the loan principal. Fails with
    /// `MissingField` naming the first absent field.
    pub fn into_snapshots(self) -> Result<(LoanApplication, ApplicantProfile)> {
        let property_type = required(self.property_type, "propertyType")?;
        let property_value = required(self.property_value, "propertyValue")?;
        let requested_amount = required(self.requested_amount, "requestedAmount")?;
        let term = required(self.term, "term")?;
        let interest_rate = required(self.interest_rate, "interestRate")?;
        let monthly_income = required(self.monthly_income, "monthlyIncome")?;
        let employment_years = required(self.employment_years, "employmentYears")?;
        let current_debt = required(self.current_debt, "currentDebt")?;
        let age = required(self.age, "age")?;

        let application = LoanApplication::new(
            LoanRequest::new(requested_amount, interest_rate, term),
            PropertySpec {
                property_type,
                property_value,
                requested_amount,
            },
        );

        let applicant = ApplicantProfile {
            monthly_income,
            employment_years,
            current_monthly_debt: current_debt,
            age,
        };

        Ok((application, applicant))
    }
}
