use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CostConfig;
use crate::decimal::{round_half_up, Money};
use crate::errors::{Result, UnderwritingError};

/// one installment of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
}

/// amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub monthly_rate: Decimal,
    pub term_months: u32,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// get payment for specific period (1-based)
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        payment_number
            .checked_sub(1)
            .and_then(|idx| self.payments.get(idx as usize))
    }

    /// remaining balance after payment
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.principal)
    }
}

/// fixed-rate annuity calculator
#[derive(Debug, Clone, Default)]
pub struct AmortizationCalculator {
    costs: CostConfig,
}

impl AmortizationCalculator {
    pub fn new(costs: CostConfig) -> Result<Self> {
        costs.validate()?;
        Ok(Self { costs })
    }

    pub fn costs(&self) -> &CostConfig {
        &self.costs
    }

    /// monthly periodic rate: percent / 12 / 100, each step rounded half-up
    pub fn monthly_rate(&self, annual_rate_percent: Decimal) -> Result<Decimal> {
        if annual_rate_percent < Decimal::ZERO {
            return Err(UnderwritingError::InvalidInterestRate {
                rate: annual_rate_percent,
            });
        }

        let scale = self.costs.rate_scale;
        let monthly_percent = annual_rate_percent
            .checked_div(dec!(12))
            .ok_or_else(|| UnderwritingError::overflow("monthly rate"))?;
        let monthly_percent = round_half_up(monthly_percent, scale);

        let monthly = monthly_percent
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or_else(|| UnderwritingError::overflow("monthly rate"))?;

        Ok(round_half_up(monthly, scale))
    }

    /// fixed monthly installment, rounded half-up to whole currency units
    pub fn monthly_payment(
        &self,
        principal: Money,
        annual_rate_percent: Decimal,
        term_years: u32,
    ) -> Result<Money> {
        let months = validate_terms(principal, term_years)?;
        let r = self.monthly_rate(annual_rate_percent)?;

        let payment = annuity_payment(principal, r, months)?;

        debug!(
            %principal,
            %annual_rate_percent,
            term_years,
            monthly_rate = %r,
            %payment,
            "monthly payment calculated"
        );

        Ok(payment)
    }

    /// full installment schedule; the last installment absorbs rounding
    pub fn schedule(
        &self,
        principal: Money,
        annual_rate_percent: Decimal,
        term_years: u32,
    ) -> Result<AmortizationSchedule> {
        let months = validate_terms(principal, term_years)?;
        let r = self.monthly_rate(annual_rate_percent)?;
        let emi = annuity_payment(principal, r, months)?;

        let mut payments = Vec::new();
        let mut balance = principal;
        let mut cumulative_interest = Money::ZERO;

        for i in 1..=months {
            let interest_portion = balance
                .checked_mul(r)
                .ok_or_else(|| UnderwritingError::overflow("schedule interest"))?
                .round_half_up(0);

            let principal_portion = if i == months {
                balance
            } else {
                (emi - interest_portion).max(Money::ZERO).min(balance)
            };
            let payment_amount = principal_portion + interest_portion;
            let ending_balance = balance - principal_portion;

            cumulative_interest += interest_portion;

            payments.push(ScheduledPayment {
                payment_number: i,
                beginning_balance: balance,
                payment_amount,
                principal_portion,
                interest_portion,
                ending_balance,
                cumulative_interest,
            });

            balance = ending_balance;
        }

        let total_payment = payments
            .iter()
            .map(|p| p.payment_amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        Ok(AmortizationSchedule {
            principal,
            annual_rate_percent,
            monthly_rate: r,
            term_months: months,
            payments,
            total_interest: cumulative_interest,
            total_payment,
        })
    }
}

/// returns the number of monthly installments
fn validate_terms(principal: Money, term_years: u32) -> Result<u32> {
    if term_years == 0 {
        return Err(UnderwritingError::InvalidTerm { term_years });
    }

    if principal.is_negative() {
        return Err(UnderwritingError::InvalidPrincipal { principal });
    }

    term_years
        .checked_mul(12)
        .ok_or_else(|| UnderwritingError::overflow("installment count"))
}

/// P * r / (1 - (1 + r)^-n), or P / n when r is zero
///
/// The discount factor (1 + r)^-n stays in (0, 1] for any rate and term.
fn annuity_payment(principal: Money, monthly_rate: Decimal, months: u32) -> Result<Money> {
    let n = Decimal::from(months);

    if monthly_rate.is_zero() {
        return principal
            .checked_div(n)
            .map(|p| p.round_half_up(0))
            .ok_or_else(|| UnderwritingError::overflow("zero-rate payment"));
    }

    let base = Decimal::ONE
        .checked_add(monthly_rate)
        .ok_or_else(|| UnderwritingError::overflow("discount factor"))?;
    let discount = discount_factor(base, months)?;
    let denominator = Decimal::ONE - discount;
    if denominator <= Decimal::ZERO {
        return Err(UnderwritingError::CalculationError {
            message: format!("degenerate discount factor {} for rate {}", discount, monthly_rate),
        });
    }

    principal
        .as_decimal()
        .checked_mul(monthly_rate)
        .and_then(|x| x.checked_div(denominator))
        .map(|p| Money::from_decimal(round_half_up(p, 0)))
        .ok_or_else(|| UnderwritingError::overflow("payment"))
}

/// base^-n by repeated squaring; underflow settles at zero
fn discount_factor(base: Decimal, months: u32) -> Result<Decimal> {
    let mut factor = Decimal::ONE
        .checked_div(base)
        .ok_or_else(|| UnderwritingError::overflow("discount factor"))?;
    let mut result = Decimal::ONE;
    let mut exponent = months;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result
                .checked_mul(factor)
                .ok_or_else(|| UnderwritingError::overflow("discount factor"))?;
        }
        exponent >>= 1;
        if exponent > 0 {
            factor = factor
                .checked_mul(factor)
                .ok_or_else(|| UnderwritingError::overflow("discount factor"))?;
        }
    }

    Ok(result)
}
