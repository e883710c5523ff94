use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::Money;
use crate::errors::{Result, UnderwritingError};
use crate::payments::AmortizationCalculator;
use crate::types::LoanRequest;

/// every component of the all-in cost of a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub monthly_payment: Money,
    pub monthly_life_insurance: Money,
    pub monthly_admin_charge: Money,
    /// installment plus insurance plus admin charge
    pub total_monthly_payment: Money,
    pub installments: u32,
    /// one-time fee charged at origination
    pub admin_fee: Money,
    pub total_cost: Money,
}

impl AmortizationCalculator {
    /// Total cost of credit.
    ///
    /// Insurance and the administration fee are rounded to whole units
    /// before being summed, and the final total is rounded once more.
    pub fn total_cost(
        &self,
        principal: Money,
        annual_rate_percent: Decimal,
        term_years: u32,
    ) -> Result<Money> {
        Ok(self
            .cost_breakdown(principal, annual_rate_percent, term_years)?
            .total_cost)
    }

    pub fn cost_breakdown(
        &self,
        principal: Money,
        annual_rate_percent: Decimal,
        term_years: u32,
    ) -> Result<CostBreakdown> {
        let monthly_payment = self.monthly_payment(principal, annual_rate_percent, term_years)?;
        let costs = self.costs();

        let monthly_life_insurance = principal
            .checked_fraction(costs.life_insurance_rate)
            .ok_or_else(|| UnderwritingError::overflow("life insurance"))?
            .round_half_up(0);

        let admin_fee = principal
            .checked_fraction(costs.admin_fee_rate)
            .ok_or_else(|| UnderwritingError::overflow("admin fee"))?
            .round_half_up(0);

        let total_monthly_payment = monthly_payment
            .checked_add(monthly_life_insurance)
            .and_then(|m| m.checked_add(costs.monthly_admin_charge))
            .ok_or_else(|| UnderwritingError::overflow("monthly outflow"))?;

        // term_years was validated by monthly_payment
        let installments = term_years * 12;

        let total_cost = total_monthly_payment
            .checked_mul(Decimal::from(installments))
            .and_then(|m| m.checked_add(admin_fee))
            .ok_or_else(|| UnderwritingError::overflow("total cost"))?
            .round_half_up(0);

        debug!(
            %principal,
            %monthly_payment,
            %monthly_life_insurance,
            %admin_fee,
            %total_cost,
            "loan cost calculated"
        );

        Ok(CostBreakdown {
            monthly_payment,
            monthly_life_insurance,
            monthly_admin_charge: costs.monthly_admin_charge,
            total_monthly_payment,
            installments,
            admin_fee,
            total_cost,
        })
    }

    pub fn cost_breakdown_for(&self, request: &LoanRequest) -> Result<CostBreakdown> {
        self.cost_breakdown(request.principal, request.annual_rate_percent, request.term_years)
    }
}
