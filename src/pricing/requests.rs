//! Request DTOs for the pricing API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::calculators::season_for_date;
use super::models::BookingSelection;

/// A quote request: the visitor's current selection, sent on every change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub destination: String,
    #[serde(default)]
    pub selected_packages: Vec<String>,
    pub accommodation: String,
    pub meals: String,
    #[serde(default)]
    pub add_ons: Vec<String>,
    pub number_of_adults: u32,
    #[serde(default)]
    pub number_of_children: u32,
    #[serde(default = "default_rooms")]
    pub number_of_rooms: u32,
    pub start_date: NaiveDate,
    /// Overrides the season derived from the start date when set.
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub applied_coupon: Option<String>,
}

fn default_rooms() -> u32 {
    1
}

impl QuoteRequest {
    /// Convert into a booking selection, deriving the season from the start
    /// date when the request does not pin one.
    pub fn into_selection(self) -> BookingSelection {
        let season = self
            .season
            .unwrap_or_else(|| season_for_date(self.start_date).key().to_string());
        BookingSelection {
            destination: self.destination,
            selected_packages: self.selected_packages,
            accommodation: self.accommodation,
            meals: self.meals,
            add_ons: self.add_ons,
            adults: self.number_of_adults,
            children: self.number_of_children,
            rooms: self.number_of_rooms,
            start_date: self.start_date,
            season,
            applied_coupon: self.applied_coupon,
        }
    }
}

/// Request to validate a coupon at apply time.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCouponRequest {
    pub code: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    /// Date to check expiry against; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}
