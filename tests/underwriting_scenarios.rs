// end-to-end decisions for reference applicants

use std::sync::Arc;
use std::thread;

use mortgage_underwriting_rs::{
    AmortizationCalculator, ApplicantProfile, ApplicationForm, CreditEvaluationEngine, CreditRule,
    LoanApplication, LoanRequest, Money, PropertySpec, PropertyType, SavingsProfile,
    UnderwritingError, Underwriter,
};
use rust_decimal_macros::dec;

fn reference_application() -> LoanApplication {
    LoanApplication::new(
        LoanRequest::new(Money::from_major(160_000), dec!(4.5), 20),
        PropertySpec {
            property_type: PropertyType::FirstHome,
            property_value: Money::from_major(250_000),
            requested_amount: Money::from_major(160_000),
        },
    )
}

fn reference_applicant() -> ApplicantProfile {
    ApplicantProfile {
        monthly_income: Money::from_major(6_000),
        employment_years: 2,
        current_monthly_debt: Money::from_major(500),
        age: 35,
    }
}

/// meets four of the five savings criteria, tenure ratio is the one missed
fn healthy_savings() -> SavingsProfile {
    SavingsProfile::new(
        Money::from_major(30_000),
        Money::from_major(300),
        Money::from_major(5_000),
    )
    .with_history(14, 0)
}

/// meets only minimum balance and recent withdrawals
fn thin_savings() -> SavingsProfile {
    SavingsProfile::new(
        Money::from_major(16_000),
        Money::from_major(299),
        Money::from_major(4_800),
    )
    .with_history(6, 2)
}

fn payment() -> Money {
    Money::from_major(1_500)
}

#[test]
fn test_reference_applicant_is_pre_approved() {
    let engine = CreditEvaluationEngine::default();
    let mut savings = healthy_savings();

    let result = engine
        .evaluate(&reference_application(), &reference_applicant(), Some(&mut savings), payment())
        .unwrap();

    assert!(result.approved);
    assert_eq!(result.message, "Credit pre-approved");
    assert_eq!(result.details.len(), 7);
    assert!(result.details.iter().all(|d| d.passed));
    assert_eq!(savings.meets_savings_criteria, Some(true));

    let assessment = engine.assess_savings(
        &reference_application(),
        &reference_applicant(),
        Some(&savings),
    );
    assert_eq!(assessment.criteria_met, 4);
    assert!(!assessment.balance_to_tenure);
}

#[test]
fn test_two_savings_criteria_fail_only_savings_rule() {
    let engine = CreditEvaluationEngine::default();
    let mut savings = thin_savings();

    let result = engine
        .evaluate(&reference_application(), &reference_applicant(), Some(&mut savings), payment())
        .unwrap();

    assert!(!result.approved);
    assert_eq!(result.message, "Credit rejected - does not meet all requirements");
    assert_eq!(result.details.len(), 7);
    assert_eq!(result.failed_rules(), vec![CreditRule::SavingsCapacity]);
    assert_eq!(savings.meets_savings_criteria, Some(false));
}

#[test]
fn test_missing_savings_profile_fails_savings_rule() {
    let engine = CreditEvaluationEngine::default();

    let result = engine
        .evaluate(&reference_application(), &reference_applicant(), None, payment())
        .unwrap();

    assert!(!result.approved);
    assert_eq!(result.failed_rules(), vec![CreditRule::SavingsCapacity]);
}

#[test]
fn test_max_financing_boundary_is_inclusive() {
    let engine = CreditEvaluationEngine::default();

    let mut at_limit = reference_application();
    at_limit.property.requested_amount = Money::from_major(200_000);
    let result = engine
        .evaluate(&at_limit, &reference_applicant(), Some(&mut healthy_savings()), payment())
        .unwrap();
    assert!(result.detail(CreditRule::MaxFinancing).unwrap().passed);

    let mut over_limit = reference_application();
    over_limit.property.requested_amount = Money::from_str_exact("200000.01").unwrap();
    let result = engine
        .evaluate(&over_limit, &reference_applicant(), Some(&mut healthy_savings()), payment())
        .unwrap();
    assert!(!result.detail(CreditRule::MaxFinancing).unwrap().passed);
    assert!(!result.approved);
}

#[test]
fn test_age_at_maturity_boundary() {
    let engine = CreditEvaluationEngine::default();

    let mut fifty = reference_applicant();
    fifty.age = 50;
    let result = engine
        .evaluate(&reference_application(), &fifty, Some(&mut healthy_savings()), payment())
        .unwrap();
    assert!(result.detail(CreditRule::AgeAtMaturity).unwrap().passed);
    assert!(result.approved);

    let mut fifty_one = reference_applicant();
    fifty_one.age = 51;
    let result = engine
        .evaluate(&reference_application(), &fifty_one, Some(&mut healthy_savings()), payment())
        .unwrap();
    assert_eq!(result.failed_rules(), vec![CreditRule::AgeAtMaturity]);
}

#[test]
fn test_zero_income_is_invalid_input() {
    let engine = CreditEvaluationEngine::default();
    let mut applicant = reference_applicant();
    applicant.monthly_income = Money::ZERO;

    let err = engine
        .evaluate(&reference_application(), &applicant, Some(&mut healthy_savings()), payment())
        .unwrap_err();

    assert_eq!(err, UnderwritingError::InvalidIncome { income: Money::ZERO });
    assert!(err.is_invalid_input());
}

#[test]
fn test_large_mortgage_cost_bounds() {
    let calculator = AmortizationCalculator::default();
    let principal = Money::from_major(50_000_000);

    let payment = calculator.monthly_payment(principal, dec!(5.5), 20).unwrap();
    let total = calculator.total_cost(principal, dec!(5.5), 20).unwrap();

    assert!(payment.is_positive());
    assert!(payment < principal);
    assert!(total > principal + Money::from_major(500_000));
    assert_eq!(payment, Money::from_major(343_932));
    assert_eq!(total, Money::from_major(91_443_680));
}

#[test]
fn test_evaluation_is_deterministic_across_threads() {
    let engine = Arc::new(CreditEvaluationEngine::default());
    let expected = engine
        .evaluate(
            &reference_application(),
            &reference_applicant(),
            Some(&mut thin_savings()),
            payment(),
        )
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .evaluate(
                        &reference_application(),
                        &reference_applicant(),
                        Some(&mut thin_savings()),
                        payment(),
                    )
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_form_submission_through_underwriter() {
    let form: ApplicationForm = serde_json::from_str(
        r#"{
            "propertyType": "FIRST_HOME",
            "propertyValue": "250000",
            "requestedAmount": "160000",
            "term": 20,
            "interestRate": "4.5",
            "monthlyIncome": "6000",
            "employmentYears": 2,
            "currentDebt": "500",
            "age": 35
        }"#,
    )
    .unwrap();

    let underwriter = Underwriter::default().enforce_product_terms(true);
    let mut savings = healthy_savings();
    let decision = underwriter.underwrite_form(form, Some(&mut savings)).unwrap();

    assert!(decision.monthly_payment.is_positive());
    assert!(decision.monthly_payment < Money::from_major(160_000));
    assert_eq!(decision.cost.monthly_payment, decision.monthly_payment);
    assert_eq!(decision.cost.monthly_life_insurance, Money::from_major(48));
    assert_eq!(decision.cost.admin_fee, Money::from_major(1_600));
    assert!(decision.approved());

    let json = serde_json::to_value(&decision).unwrap();
    assert_eq!(json["evaluation"]["approved"], true);
    assert_eq!(json["evaluation"]["details"][0]["rule"], "INCOME_RATIO");
}
