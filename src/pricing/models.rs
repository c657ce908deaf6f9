//! Pricing catalog data model and booking domain types.
//!
//! The catalog is a static JSON document (`data/pricing-config.json`)
//! deserialized once at startup, validated, and shared read-only for the
//! life of the process. Field names follow the camelCase document format
//! the booking form already consumes.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full pricing configuration for all destinations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingCatalog {
    pub destinations: BTreeMap<String, Destination>,
    pub seasonal_pricing: BTreeMap<String, SeasonalRate>,
    pub group_discounts: BTreeMap<String, GroupDiscount>,
    #[serde(default)]
    pub coupons: BTreeMap<String, Coupon>,
}

/// A bookable destination with its packages and options.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub available_packages: BTreeMap<String, TourPackage>,
    pub accommodation_options: BTreeMap<String, AccommodationOption>,
    pub meal_options: BTreeMap<String, MealOption>,
    pub add_on_services: BTreeMap<String, AddOnService>,
}

/// A multi-day tour itinerary with a fixed per-person price.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPackage {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price_per_person: Decimal,
    /// Duration in days.
    pub duration: u32,
    #[serde(default)]
    pub inclusions: Vec<String>,
}

/// An accommodation tier priced per room per night.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationOption {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_per_night: Decimal,
    /// Per-person-per-night upgrade surcharge for premium tiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_cost_per_person: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// A meal plan priced per person per day.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealOption {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_per_day: Decimal,
}

/// An optional service, priced flat or per day.
///
/// Transport tiers carry a per-person surcharge that may be negative
/// (a downgrade discount).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnService {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_day: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_cost_per_person: Option<Decimal>,
}

/// Seasonal multiplier applied to the subtotal.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalRate {
    #[serde(default)]
    pub name: String,
    pub multiplier: Decimal,
    #[serde(default)]
    pub description: String,
}

/// Group size multiplier (at most 1) applied after seasonal adjustment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDiscount {
    #[serde(default)]
    pub name: String,
    pub multiplier: Decimal,
}

/// Discount coupon redeemable at checkout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    pub name: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

/// How a coupon's discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Catalog loading and validation errors (startup only).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid catalog: {}", errors.join("; "))]
    Invalid { errors: Vec<String> },
}

impl PricingCatalog {
    /// Load and validate the catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse and validate a catalog from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the configuration invariants the pricing pipeline relies on.
    ///
    /// All violations are collected so a broken catalog fails startup with
    /// a complete report instead of one error at a time.
    fn validate(&self) -> Result<(), CatalogError> {
        let mut errors = Vec::new();

        if self.destinations.is_empty() {
            errors.push("no destinations configured".to_string());
        }

        for (dest_key, destination) in &self.destinations {
            for (key, pkg) in &destination.available_packages {
                if pkg.duration == 0 {
                    errors.push(format!(
                        "{dest_key}/{key}: package duration must be at least 1 day"
                    ));
                }
                if pkg.base_price_per_person < Decimal::ZERO {
                    errors.push(format!("{dest_key}/{key}: negative base price"));
                }
            }
            for (key, acc) in &destination.accommodation_options {
                if acc.price_per_night < Decimal::ZERO {
                    errors.push(format!("{dest_key}/{key}: negative nightly rate"));
                }
            }
            for (key, meal) in &destination.meal_options {
                if meal.price_per_day < Decimal::ZERO {
                    errors.push(format!("{dest_key}/{key}: negative meal rate"));
                }
            }
        }

        for (key, rate) in &self.seasonal_pricing {
            if rate.multiplier <= Decimal::ZERO {
                errors.push(format!("seasonalPricing/{key}: multiplier must be positive"));
            }
        }

        for (key, discount) in &self.group_discounts {
            if discount.multiplier <= Decimal::ZERO || discount.multiplier > Decimal::ONE {
                errors.push(format!("groupDiscounts/{key}: multiplier must be in (0, 1]"));
            }
        }

        for (code, coupon) in &self.coupons {
            match coupon.discount_type {
                DiscountType::Percentage => {
                    if coupon.discount_value <= Decimal::ZERO
                        || coupon.discount_value > Decimal::ONE_HUNDRED
                    {
                        errors.push(format!("coupons/{code}: percentage must be in (0, 100]"));
                    }
                }
                DiscountType::Fixed => {
                    if coupon.discount_value <= Decimal::ZERO {
                        errors.push(format!("coupons/{code}: fixed discount must be positive"));
                    }
                }
            }
            if let Some(min) = coupon.min_amount {
                if min < Decimal::ZERO {
                    errors.push(format!("coupons/{code}: negative minimum amount"));
                }
            }
            if let Some(cap) = coupon.max_discount {
                if cap <= Decimal::ZERO {
                    errors.push(format!("coupons/{code}: maximum discount must be positive"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Invalid { errors })
        }
    }
}

/// The visitor's current choices, one per quote request.
///
/// Built fresh by the booking form on every interaction; the engine keeps
/// no memory between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSelection {
    pub destination: String,
    /// Order-independent; packages are priced as sequential legs.
    pub selected_packages: Vec<String>,
    /// Accommodation key; `"none"` means a day tour without lodging.
    pub accommodation: String,
    pub meals: String,
    pub add_ons: Vec<String>,
    pub adults: u32,
    /// Children under 11 (flat 50% discount on package and meal prices).
    pub children: u32,
    pub rooms: u32,
    pub start_date: NaiveDate,
    /// Season key, normally derived from the start date but overridable.
    pub season: String,
    pub applied_coupon: Option<String>,
}

/// Itemized quote, fully derived from catalog and selection.
///
/// Amounts carry full decimal precision; rounding happens only when the
/// breakdown is rendered into a response.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub base_package_price: Decimal,
    /// Includes the upgrade surcharge component below.
    pub accommodation_price: Decimal,
    pub accommodation_upgrade_cost: Decimal,
    pub meal_price: Decimal,
    pub add_on_price: Decimal,
    pub subtotal: Decimal,
    /// Signed: peak season raises the price, off season lowers it.
    pub seasonal_adjustment: Decimal,
    pub group_discount: Decimal,
    /// Informational; already netted into package and meal prices.
    pub children_discount: Decimal,
    pub coupon_discount: Decimal,
    pub final_total: Decimal,
    pub price_per_person: Decimal,
    pub room_details: RoomAllocation,
}

/// How travellers are distributed across the requested rooms.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomAllocation {
    pub total_rooms: u32,
    pub people_per_room: Vec<u32>,
    /// Nightly rate of the chosen accommodation tier.
    pub room_rate: Decimal,
    pub total_accommodation_cost: Decimal,
}
