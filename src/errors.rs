use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::PropertyType;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnderwritingError {
    #[error("invalid term: {term_years} years, at least 1 year required")]
    InvalidTerm {
        term_years: u32,
    },

    #[error("invalid principal: {principal}, must not be negative")]
    InvalidPrincipal {
        principal: Money,
    },

    #[error("invalid interest rate: {rate}%, must not be negative")]
    InvalidInterestRate {
        rate: Decimal,
    },

    #[error("invalid monthly income: {income}, must be greater than zero")]
    InvalidIncome {
        income: Money,
    },

    #[error("invalid {field}: {amount}")]
    InvalidAmount {
        field: &'static str,
        amount: Money,
    },

    #[error("missing required field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("interest rate {rate}% outside {property_type:?} band {min}% - {max}%")]
    RateOutsideProductBand {
        property_type: PropertyType,
        rate: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error(
        "term of {term_years} years exceeds {property_type:?} maximum of {max_term_years} years"
    )]
    TermExceedsProduct {
        property_type: PropertyType,
        term_years: u32,
        max_term_years: u32,
    },

    #[error("incomplete savings data: {field} not provided")]
    IncompleteSavingsData {
        field: &'static str,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl UnderwritingError {
    /// caller violated a precondition; never retried or suppressed
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            UnderwritingError::InvalidTerm { .. }
                | UnderwritingError::InvalidPrincipal { .. }
                | UnderwritingError::InvalidInterestRate { .. }
                | UnderwritingError::InvalidIncome { .. }
                | UnderwritingError::InvalidAmount { .. }
                | UnderwritingError::MissingField { .. }
                | UnderwritingError::RateOutsideProductBand { .. }
                | UnderwritingError::TermExceedsProduct { .. }
        )
    }

    pub(crate) fn overflow(operation: &str) -> Self {
        UnderwritingError::CalculationError {
            message: format!("decimal overflow in {}", operation),
        }
    }
}

pub type Result<T> = std::result::Result<T, UnderwritingError>;
