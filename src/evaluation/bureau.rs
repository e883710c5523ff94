use crate::types::{ApplicantProfile, LoanApplication};

/// credit bureau lookup backing the credit history rule
pub trait CreditBureau: Send + Sync {
    /// true when the applicant has no unpaid debts or serious delinquencies
    fn has_clean_history(
        &self,
        applicant: &ApplicantProfile,
        application: &LoanApplication,
    ) -> bool;
}

/// bureau used until a real integration is wired in; reports every
/// applicant as clean
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysClearBureau;

impl CreditBureau for AlwaysClearBureau {
    fn has_clean_history(
        &self,
        _applicant: &ApplicantProfile,
        _application: &LoanApplication,
    ) -> bool {
        true
    }
}

