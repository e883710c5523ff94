pub mod bureau;
pub mod rules;
pub mod savings;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::UnderwritingPolicy;
use crate::decimal::Money;
use crate::errors::{Result, UnderwritingError};
use crate::types::{ApplicantProfile, LoanApplication, SavingsProfile};

pub use bureau::{AlwaysClearBureau, CreditBureau};
pub use rules::CreditRule;
pub use savings::{assess_savings, SavingsAssessment};

pub const APPROVED_MESSAGE: &str = "Credit pre-approved";
pub const REJECTED_MESSAGE: &str = "Credit rejected - does not meet all requirements";

/// outcome of a single rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDetail {
    pub rule: CreditRule,
    pub rule_name: String,
    pub passed: bool,
    pub description: String,
}

/// verdict with one detail per rule, in evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub approved: bool,
    pub details: Vec<EvaluationDetail>,
    pub message: String,
}

impl EvaluationResult {
    pub fn detail(&self, rule: CreditRule) -> Option<&EvaluationDetail> {
        self.details.iter().find(|d| d.rule == rule)
    }

    pub fn failed_rules(&self) -> Vec<CreditRule> {
        self.details
            .iter()
            .filter(|d| !d.passed)
            .map(|d| d.rule)
            .collect()
    }
}

/// runs the eligibility rules against an application snapshot
pub struct CreditEvaluationEngine {
    policy: UnderwritingPolicy,
    bureau: Box<dyn CreditBureau>,
}

impl CreditEvaluationEngine {
    pub fn new(policy: UnderwritingPolicy) -> Result<Self> {
        Self::with_bureau(policy, Box::new(AlwaysClearBureau))
    }

    pub fn with_bureau(policy: UnderwritingPolicy, bureau: Box<dyn CreditBureau>) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy, bureau })
    }

    pub fn policy(&self) -> &UnderwritingPolicy {
        &self.policy
    }

    /// Evaluate every rule, without short-circuiting.
    ///
    /// Fails only when the application or applicant violates a precondition
    /// (non-positive income, negative amounts, zero term). An absent or
    /// partial savings profile fails the savings rule instead. When the
    /// savings profile can be scored, its `meets_savings_criteria` flag is
    /// updated with the verdict.
    pub fn evaluate(
        &self,
        application: &LoanApplication,
        applicant: &ApplicantProfile,
        savings: Option<&mut SavingsProfile>,
        monthly_payment: Money,
    ) -> Result<EvaluationResult> {
        validate_inputs(application, applicant, monthly_payment)?;

        let policy = &self.policy;
        let income = applicant.monthly_income;

        let savings_assessment = assess_savings(
            &policy.savings,
            savings.as_deref(),
            application.requested_amount(),
            income,
        );
        if let Some(profile) = savings {
            if savings_assessment.is_scored() {
                profile.meets_savings_criteria = Some(savings_assessment.passed);
            }
        }

        let mut details = Vec::with_capacity(CreditRule::ORDER.len());
        for rule in CreditRule::ORDER {
            let passed = match rule {
                CreditRule::IncomeRatio => rules::income_ratio(policy, monthly_payment, income)?,
                CreditRule::CreditHistory => self.bureau.has_clean_history(applicant, application),
                CreditRule::EmploymentTenure => {
                    rules::employment_tenure(policy, applicant.employment_years)
                }
                CreditRule::DebtToIncome => rules::debt_to_income(
                    policy,
                    applicant.current_monthly_debt,
                    monthly_payment,
                    income,
                )?,
                CreditRule::MaxFinancing => rules::max_financing(policy, &application.property)?,
                CreditRule::AgeAtMaturity => {
                    rules::age_at_maturity(policy, applicant.age, application.term_years())
                }
                CreditRule::SavingsCapacity => savings_assessment.passed,
            };

            debug!(rule = rule.name(), passed, "credit rule evaluated");

            details.push(EvaluationDetail {
                rule,
                rule_name: rule.name().to_string(),
                passed,
                description: rule.description(policy),
            });
        }

        let approved = details.iter().all(|d| d.passed);
        let message = if approved { APPROVED_MESSAGE } else { REJECTED_MESSAGE };

        info!(
            approved,
            failed_rules = details.iter().filter(|d| !d.passed).count(),
            savings_criteria_met = savings_assessment.criteria_met,
            "credit evaluation completed"
        );

        Ok(EvaluationResult {
            approved,
            details,
            message: message.to_string(),
        })
    }

    /// savings criteria breakdown for display; same scoring the engine uses
    pub fn assess_savings(
        &self,
        application: &LoanApplication,
        applicant: &ApplicantProfile,
        savings: Option<&SavingsProfile>,
    ) -> SavingsAssessment {
        assess_savings(
            &self.policy.savings,
            savings,
            application.requested_amount(),
            applicant.monthly_income,
        )
    }
}

impl Default for CreditEvaluationEngine {
    fn default() -> Self {
        Self {
            policy: UnderwritingPolicy::default(),
            bureau: Box::new(AlwaysClearBureau),
        }
    }
}

impl std::fmt::Debug for CreditEvaluationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditEvaluationEngine")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn validate_inputs(
    application: &LoanApplication,
    applicant: &ApplicantProfile,
    monthly_payment: Money,
) -> Result<()> {
    if !applicant.monthly_income.is_positive() {
        return Err(UnderwritingError::InvalidIncome {
            income: applicant.monthly_income,
        });
    }

    if application.term_years() == 0 {
        return Err(UnderwritingError::InvalidTerm { term_years: 0 });
    }

    let amounts = [
        ("currentMonthlyDebt", applicant.current_monthly_debt),
        ("monthlyPayment", monthly_payment),
        ("requestedAmount", application.property.requested_amount),
        ("propertyValue", application.property.property_value),
    ];
    for (field, amount) in amounts {
        if amount.is_negative() {
            return Err(UnderwritingError::InvalidAmount { field, amount });
        }
    }

    Ok(())
}
