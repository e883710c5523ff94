/// underwrite one application end to end, printing the decision as json
///
/// RUST_LOG=debug shows each rule as it is evaluated
use mortgage_underwriting_rs::{
    AmortizationCalculator, ApplicationForm, CreditEvaluationEngine, Money, SavingsProfile,
    Underwriter, UnderwritingPolicy,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new("info")?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    // form as a client would submit it
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
    )?;

    let mut savings = SavingsProfile::new(
        Money::from_major(30_000),
        Money::from_major(300),
        Money::from_major(5_000),
    )
    .with_history(14, 0);

    let underwriter = Underwriter::new(
        AmortizationCalculator::default(),
        CreditEvaluationEngine::new(UnderwritingPolicy::default())?,
    )
    .enforce_product_terms(true);

    let decision = underwriter.underwrite_form(form, Some(&mut savings))?;

    println!("{}", serde_json::to_string_pretty(&decision)?);
    println!("savings criteria met: {:?}", savings.meets_savings_criteria);

    Ok(())
}
