use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::ApplicationForm;
use crate::decimal::Money;
use crate::errors::Result;
use crate::evaluation::{CreditEvaluationEngine, EvaluationResult};
use crate::payments::{AmortizationCalculator, CostBreakdown};
use crate::products::LoanProduct;
use crate::types::{ApplicantProfile, LoanApplication, SavingsProfile};

/// payment, cost and credit verdict for one application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingDecision {
    pub monthly_payment: Money,
    pub cost: CostBreakdown,
    pub evaluation: EvaluationResult,
}

impl UnderwritingDecision {
    pub fn approved(&self) -> bool {
        self.evaluation.approved
    }
}

/// prices a loan then runs the credit rules against the computed payment
#[derive(Debug, Default)]
pub struct Underwriter {
    calculator: AmortizationCalculator,
    engine: CreditEvaluationEngine,
    enforce_product_terms: bool,
}

impl Underwriter {
    pub fn new(calculator: AmortizationCalculator, engine: CreditEvaluationEngine) -> Self {
        Self {
            calculator,
            engine,
            enforce_product_terms: false,
        }
    }

    /// reject requests outside the product catalog's rate band or term limit
    pub fn enforce_product_terms(mut self, enforce: bool) -> Self {
        self.enforce_product_terms = enforce;
        self
    }

    pub fn calculator(&self) -> &AmortizationCalculator {
        &self.calculator
    }

    pub fn engine(&self) -> &CreditEvaluationEngine {
        &self.engine
    }

    pub fn underwrite(
        &self,
        application: &LoanApplication,
        applicant: &ApplicantProfile,
        savings: Option<&mut SavingsProfile>,
    ) -> Result<UnderwritingDecision> {
        if self.enforce_product_terms {
            LoanProduct::for_property_type(application.property.property_type)
                .validate_request(&application.request)?;
        }

        let cost = self.calculator.cost_breakdown_for(&application.request)?;
        let monthly_payment = cost.monthly_payment;

        let evaluation = self
            .engine
            .evaluate(application, applicant, savings, monthly_payment)?;

        info!(
            property_type = ?application.property.property_type,
            %monthly_payment,
            total_cost = %cost.total_cost,
            approved = evaluation.approved,
            "application underwritten"
        );

        Ok(UnderwritingDecision {
            monthly_payment,
            cost,
            evaluation,
        })
    }

    pub fn underwrite_form(
        &self,
        form: ApplicationForm,
        savings: Option<&mut SavingsProfile>,
    ) -> Result<UnderwritingDecision> {
        let (application, applicant) = form.into_snapshots()?;
        self.underwrite(&application, &applicant, savings)
    }
}
