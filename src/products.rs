use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{Result, UnderwritingError};
use crate::types::{LoanRequest, PropertyType};

/// longest term offered for any mortgage product
pub const MAX_TERM_YEARS: u32 = 30;

/// advertised terms of the mortgage offered for a property type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanProduct {
    pub property_type: PropertyType,
    /// maximum loan-to-value fraction
    pub max_financing: Rate,
    /// annual rate band in percent
    pub min_annual_rate: Decimal,
    pub max_annual_rate: Decimal,
    pub max_term_years: u32,
}

impl LoanProduct {
    pub fn for_property_type(property_type: PropertyType) -> Self {
        let (max_financing, min_annual_rate, max_annual_rate) = match property_type {
            PropertyType::FirstHome => (Rate::from_percentage(80), dec!(3.5), dec!(5.0)),
            PropertyType::SecondHome => (Rate::from_percentage(70), dec!(4.0), dec!(6.0)),
            PropertyType::Commercial => (Rate::from_percentage(60), dec!(5.0), dec!(7.0)),
            PropertyType::Remodeling => (Rate::from_percentage(50), dec!(4.5), dec!(6.0)),
        };

        Self {
            property_type,
            max_financing,
            min_annual_rate,
            max_annual_rate,
            max_term_years: MAX_TERM_YEARS,
        }
    }

    /// whole catalog, in property type order
    pub fn catalog() -> Vec<LoanProduct> {
        PropertyType::ALL
            .iter()
            .map(|t| LoanProduct::for_property_type(*t))
            .collect()
    }

    pub fn rate_in_band(&self, annual_rate_percent: Decimal) -> bool {
        annual_rate_percent >= self.min_annual_rate && annual_rate_percent <= self.max_annual_rate
    }

    /// check a request against the product's term limit and rate band
    pub fn validate_request(&self, request: &LoanRequest) -> Result<()> {
        if request.term_years == 0 {
            return Err(UnderwritingError::InvalidTerm {
                term_years: request.term_years,
            });
        }

        if request.term_years > self.max_term_years {
            return Err(UnderwritingError::TermExceedsProduct {
                property_type: self.property_type,
                term_years: request.term_years,
                max_term_years: self.max_term_years,
            });
        }

        if !self.rate_in_band(request.annual_rate_percent) {
            return Err(UnderwritingError::RateOutsideProductBand {
                property_type: self.property_type,
                rate: request.annual_rate_percent,
                min: self.min_annual_rate,
                max: self.max_annual_rate,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;

    #[test]
    fn test_catalog_covers_every_property_type() {
        let catalog = LoanProduct::catalog();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.iter().all(|p| p.max_term_years == 30));
        assert_eq!(catalog[2].property_type, PropertyType::Commercial);
        assert_eq!(catalog[2].max_financing.as_decimal(), dec!(0.60));
    }

    #[test]
    fn test_rate_band_is_inclusive() {
        let product = LoanProduct::for_property_type(PropertyType::SecondHome);
        assert!(product.rate_in_band(dec!(4.0)));
        assert!(product.rate_in_band(dec!(6.0)));
        assert!(!product.rate_in_band(dec!(3.99)));
        assert!(!product.rate_in_band(dec!(6.01)));
    }

    #[test]
    fn test_validate_request() {
        let product = LoanProduct::for_property_type(PropertyType::FirstHome);

        let ok = LoanRequest::new(Money::from_major(100_000_000), dec!(4.5), 30);
        assert!(product.validate_request(&ok).is_ok());

        let too_long = LoanRequest::new(Money::from_major(100_000_000), dec!(4.5), 31);
        assert!(matches!(
            product.validate_request(&too_long),
            Err(UnderwritingError::TermExceedsProduct { max_term_years: 30, .. })
        ));

        let too_cheap = LoanRequest::new(Money::from_major(100_000_000), dec!(3.0), 20);
        let err = product.validate_request(&too_cheap).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(matches!(err, UnderwritingError::RateOutsideProductBand { .. }));
    }
}
