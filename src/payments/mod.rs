pub mod amortization;
pub mod costs;

pub use amortization::{AmortizationCalculator, AmortizationSchedule, ScheduledPayment};
pub use costs::CostBreakdown;
