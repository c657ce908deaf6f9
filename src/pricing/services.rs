//! Apply-time coupon validation.
//!
//! The booking form validates a coupon when the visitor hits "apply", with
//! specific feedback for each failure mode. The quote pipeline later
//! re-checks the active flag and minimum amount defensively, but expiry is
//! enforced only here so the pure calculators stay deterministic.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::models::{Coupon, PricingCatalog};

/// Why a coupon could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponError {
    #[error("invalid coupon code")]
    UnknownCode,
    #[error("this coupon is no longer active")]
    Inactive,
    #[error("this coupon expired on {0}")]
    Expired(NaiveDate),
    #[error("minimum order amount of {minimum} required for this coupon")]
    BelowMinimum { minimum: Decimal },
}

/// Validate a coupon code against the current subtotal.
///
/// Codes are case-insensitive (the form upcases as the visitor types).
/// Expiry is checked against the supplied date so callers control "today".
pub fn validate_coupon<'a>(
    catalog: &'a PricingCatalog,
    code: &str,
    subtotal: Decimal,
    on: NaiveDate,
) -> Result<&'a Coupon, CouponError> {
    let code = code.trim().to_uppercase();
    let coupon = catalog.coupons.get(&code).ok_or(CouponError::UnknownCode)?;

    if !coupon.is_active {
        return Err(CouponError::Inactive);
    }
    if let Some(expiry) = coupon.expiry_date {
        if on > expiry {
            return Err(CouponError::Expired(expiry));
        }
    }
    if let Some(minimum) = coupon.min_amount {
        if subtotal < minimum {
            return Err(CouponError::BelowMinimum { minimum });
        }
    }

    Ok(coupon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn catalog() -> PricingCatalog {
        PricingCatalog::from_json(
            r#"{
            "destinations": {
                "odisha": {
                    "name": "Odisha",
                    "availablePackages": {},
                    "accommodationOptions": {},
                    "mealOptions": {},
                    "addOnServices": {}
                }
            },
            "seasonalPricing": {},
            "groupDiscounts": {},
            "coupons": {
                "SAVE10": {
                    "code": "SAVE10",
                    "name": "Save 10%",
                    "discountType": "percentage",
                    "discountValue": 10,
                    "isActive": true,
                    "minAmount": 5000
                },
                "WINTER24": {
                    "code": "WINTER24",
                    "name": "Winter Special",
                    "discountType": "fixed",
                    "discountValue": 750,
                    "isActive": true,
                    "expiryDate": "2025-02-28"
                },
                "RETIRED": {
                    "code": "RETIRED",
                    "name": "Retired Offer",
                    "discountType": "fixed",
                    "discountValue": 100,
                    "isActive": false
                }
            }
        }"#,
        )
        .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_coupon_is_returned() {
        let catalog = catalog();
        let coupon = validate_coupon(&catalog, "SAVE10", dec!(19690), day(2025, 11, 1)).unwrap();
        assert_eq!(coupon.code, "SAVE10");
    }

    #[test]
    fn test_code_is_case_insensitive() {
        let catalog = catalog();
        let coupon = validate_coupon(&catalog, " save10 ", dec!(9000), day(2025, 11, 1)).unwrap();
        assert_eq!(coupon.code, "SAVE10");
    }

    #[test]
    fn test_unknown_code() {
        let catalog = catalog();
        let err = validate_coupon(&catalog, "NOPE", dec!(9000), day(2025, 11, 1)).unwrap_err();
        assert_eq!(err, CouponError::UnknownCode);
    }

    #[test]
    fn test_inactive_coupon() {
        let catalog = catalog();
        let err = validate_coupon(&catalog, "RETIRED", dec!(9000), day(2025, 11, 1)).unwrap_err();
        assert_eq!(err, CouponError::Inactive);
    }

    #[test]
    fn test_expired_coupon() {
        let catalog = catalog();
        let err = validate_coupon(&catalog, "WINTER24", dec!(9000), day(2025, 3, 1)).unwrap_err();
        assert_eq!(err, CouponError::Expired(day(2025, 2, 28)));
    }

    #[test]
    fn test_coupon_valid_on_its_expiry_day() {
        let catalog = catalog();
        assert!(validate_coupon(&catalog, "WINTER24", dec!(9000), day(2025, 2, 28)).is_ok());
    }

    #[test]
    fn test_below_minimum_amount() {
        let catalog = catalog();
        let err = validate_coupon(&catalog, "SAVE10", dec!(4999), day(2025, 11, 1)).unwrap_err();
        assert_eq!(
            err,
            CouponError::BelowMinimum {
                minimum: dec!(5000)
            }
        );
    }
}
