pub mod application;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod evaluation;
pub mod payments;
pub mod products;
pub mod types;
pub mod underwriter;

// re-export key types
pub use application::ApplicationForm;
pub use config::{CostConfig, MaxFinancingTable, SavingsPolicy, UnderwritingPolicy};
pub use decimal::{Money, Rate};
pub use errors::{Result, UnderwritingError};
pub use evaluation::{
    AlwaysClearBureau, CreditBureau, CreditEvaluationEngine, CreditRule, EvaluationDetail,
    EvaluationResult, SavingsAssessment,
};
pub use payments::{AmortizationCalculator, AmortizationSchedule, CostBreakdown, ScheduledPayment};
pub use products::LoanProduct;
pub use types::{
    ApplicantProfile, LoanApplication, LoanRequest, PropertySpec, PropertyType, SavingsProfile,
};
pub use underwriter::{UnderwritingDecision, Underwriter};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
