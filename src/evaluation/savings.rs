use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SavingsPolicy;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, UnderwritingError};
use crate::types::SavingsProfile;

/// outcome of the five savings capacity criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsAssessment {
    pub minimum_balance: bool,
    pub consistent_history: bool,
    pub periodic_deposits: bool,
    pub balance_to_tenure: bool,
    pub recent_withdrawals: bool,
    pub criteria_met: u8,
    pub passed: bool,
    /// set when scoring stopped before any criterion was counted
    pub not_scored_reason: Option<String>,
}

impl SavingsAssessment {
    fn not_scored(reason: String) -> Self {
        Self {
            not_scored_reason: Some(reason),
            ..Self::default()
        }
    }

    pub fn is_scored(&self) -> bool {
        self.not_scored_reason.is_none()
    }
}

/// Score a savings profile against the requested amount and income.
///
/// Never fails: a missing profile, a missing required field or an
/// arithmetic failure all yield a failed assessment with zero criteria.
pub fn assess_savings(
    policy: &SavingsPolicy,
    savings: Option<&SavingsProfile>,
    requested_amount: Money,
    monthly_income: Money,
) -> SavingsAssessment {
    match score(policy, savings, requested_amount, monthly_income) {
        Ok(assessment) => assessment,
        Err(err @ UnderwritingError::IncompleteSavingsData { .. }) => {
            debug!(reason = %err, "savings capacity not scored");
            SavingsAssessment::not_scored(err.to_string())
        }
        Err(err) => {
            warn!(error = %err, "savings capacity scoring failed, counting zero criteria");
            SavingsAssessment::not_scored(err.to_string())
        }
    }
}

fn score(
    policy: &SavingsPolicy,
    savings: Option<&SavingsProfile>,
    requested_amount: Money,
    monthly_income: Money,
) -> Result<SavingsAssessment> {
    let savings = savings.ok_or(UnderwritingError::IncompleteSavingsData {
        field: "savingsProfile",
    })?;
    let balance = savings
        .current_balance
        .ok_or(UnderwritingError::IncompleteSavingsData {
            field: "currentBalance",
        })?;
    let deposits = savings
        .monthly_deposits_amount
        .ok_or(UnderwritingError::IncompleteSavingsData {
            field: "monthlyDepositsAmount",
        })?;
    let largest_withdrawal = savings
        .largest_withdrawal_last_6_months
        .ok_or(UnderwritingError::IncompleteSavingsData {
            field: "largestWithdrawalLast6Months",
        })?;

    let minimum_balance = balance >= fraction_of(requested_amount, policy.min_balance_fraction)?;

    let consistent_history = match (
        savings.consecutive_months_with_balance,
        savings.significant_withdrawals_count,
    ) {
        (Some(months), Some(withdrawals)) => {
            months >= policy.min_consecutive_months
                && withdrawals <= policy.max_significant_withdrawals
        }
        _ => false,
    };

    let periodic_deposits =
        deposits >= fraction_of(monthly_income, policy.min_deposit_income_fraction)?;

    let balance_to_tenure = match savings.consecutive_months_with_balance {
        Some(months) => {
            let required = if months < policy.tenure_threshold_months {
                policy.short_tenure_balance_fraction
            } else {
                policy.long_tenure_balance_fraction
            };
            balance >= fraction_of(requested_amount, required)?
        }
        None => false,
    };

    let recent_withdrawals =
        largest_withdrawal <= fraction_of(balance, policy.max_withdrawal_balance_fraction)?;

    let criteria_met = [
        minimum_balance,
        consistent_history,
        periodic_deposits,
        balance_to_tenure,
        recent_withdrawals,
    ]
    .iter()
    .filter(|met| **met)
    .count() as u8;

    Ok(SavingsAssessment {
        minimum_balance,
        consistent_history,
        periodic_deposits,
        balance_to_tenure,
        recent_withdrawals,
        criteria_met,
        passed: criteria_met >= policy.required_criteria,
        not_scored_reason: None,
    })
}

fn fraction_of(amount: Money, fraction: Rate) -> Result<Money> {
    amount
        .checked_fraction(fraction)
        .ok_or_else(|| UnderwritingError::overflow("savings threshold"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn policy() -> SavingsPolicy {
        SavingsPolicy::default()
    }

    fn requested() -> Money {
        Money::from_major(160_000)
    }

    fn income() -> Money {
        Money::from_major(6_000)
    }

    #[test]
    fn test_all_criteria_met() {
        let profile = SavingsProfile::new(
            Money::from_major(40_000),
            Money::from_major(300),
            Money::from_major(5_000),
        )
        .with_history(30, 0);

        let assessment = assess_savings(&policy(), Some(&profile), requested(), income());
        assert_eq!(assessment.criteria_met, 5);
        assert!(assessment.passed);
        assert!(assessment.is_scored());
    }

    #[test]
    fn test_missing_profile_scores_zero() {
        let assessment = assess_savings(&policy(), None, requested(), income());
        assert_eq!(assessment.criteria_met, 0);
        assert!(!assessment.passed);
        assert!(!assessment.is_scored());
    }

    #[test]
    fn test_missing_required_field_scores_zero() {
        let profile = SavingsProfile {
            current_balance: Some(Money::from_major(1_000_000)),
            monthly_deposits_amount: None,
            largest_withdrawal_last_6_months: Some(Money::ZERO),
            consecutive_months_with_balance: Some(60),
            significant_withdrawals_count: Some(0),
            meets_savings_criteria: None,
        };

        let assessment = assess_savings(&policy(), Some(&profile), requested(), income());
        assert_eq!(assessment.criteria_met, 0);
        assert!(!assessment.passed);
        assert!(assessment
            .not_scored_reason
            .as_deref()
            .unwrap()
            .contains("monthlyDepositsAmount"));
    }

    #[test]
    fn test_history_requires_both_fields() {
        let mut profile = SavingsProfile::new(
            Money::from_major(40_000),
            Money::from_major(300),
            Money::from_major(5_000),
        );
        profile.consecutive_months_with_balance = Some(36);

        let assessment = assess_savings(&policy(), Some(&profile), requested(), income());
        assert!(!assessment.consistent_history);
        // tenure ratio only needs the month count
        assert!(assessment.balance_to_tenure);
        assert_eq!(assessment.criteria_met, 4);
    }

    #[test]
    fn test_tenure_fraction_switches_at_threshold() {
        // 10% of requested, enough for long tenure only
        let profile = SavingsProfile::new(
            Money::from_major(16_000),
            Money::ZERO,
            Money::from_major(10_000),
        );

        let short = profile.clone().with_history(23, 5);
        let assessment = assess_savings(&policy(), Some(&short), requested(), income());
        assert!(!assessment.balance_to_tenure);

        let long = profile.with_history(24, 5);
        let assessment = assess_savings(&policy(), Some(&long), requested(), income());
        assert!(assessment.balance_to_tenure);
    }

    #[test]
    fn test_pass_boundary_is_three_criteria() {
        // minimum balance, deposits, withdrawals: exactly three
        let three = SavingsProfile::new(
            Money::from_major(16_000),
            Money::from_major(300),
            Money::from_major(4_800),
        )
        .with_history(6, 2);
        let assessment = assess_savings(&policy(), Some(&three), requested(), income());
        assert_eq!(assessment.criteria_met, 3);
        assert!(assessment.passed);

        // drop the deposit criterion: two left
        let two = SavingsProfile {
            monthly_deposits_amount: Some(Money::from_major(299)),
            ..three
        };
        let assessment = assess_savings(&policy(), Some(&two), requested(), income());
        assert_eq!(assessment.criteria_met, 2);
        assert!(!assessment.passed);
    }

    #[test]
    fn test_threshold_overflow_scores_zero() {
        let policy = SavingsPolicy {
            min_balance_fraction: Rate::from_decimal(Decimal::MAX),
            ..SavingsPolicy::default()
        };
        let profile = SavingsProfile::new(
            Money::from_major(40_000),
            Money::from_major(300),
            Money::from_major(5_000),
        )
        .with_history(30, 0);

        let assessment = assess_savings(&policy, Some(&profile), requested(), income());
        assert_eq!(assessment.criteria_met, 0);
        assert!(!assessment.passed);
        assert!(!assessment.is_scored());
        assert!(assessment
            .not_scored_reason
            .as_deref()
            .unwrap()
            .contains("savings threshold"));
    }
}
