//! Response DTOs for the pricing API.
//!
//! Money fields serialize as strings (exact decimals survive JSON) and are
//! rounded to paise here, at the presentation boundary; the engine itself
//! carries full precision.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{round_money, Season};
use super::models::{Coupon, DiscountType, PriceBreakdown, RoomAllocation};

/// Itemized quote for the booking form's price panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdownResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_package_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub accommodation_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub accommodation_upgrade_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub meal_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub add_on_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub seasonal_adjustment: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub group_discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub children_discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub coupon_discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_person: Decimal,
    pub room_details: RoomDetailsResponse,
}

/// Room allocation detail inside the breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailsResponse {
    pub total_rooms: u32,
    pub people_per_room: Vec<u32>,
    #[serde(with = "rust_decimal::serde::str")]
    pub room_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_accommodation_cost: Decimal,
}

impl From<PriceBreakdown> for PriceBreakdownResponse {
    fn from(breakdown: PriceBreakdown) -> Self {
        let RoomAllocation {
            total_rooms,
            people_per_room,
            room_rate,
            total_accommodation_cost,
        } = breakdown.room_details;
        Self {
            base_package_price: round_money(breakdown.base_package_price, 2),
            accommodation_price: round_money(breakdown.accommodation_price, 2),
            accommodation_upgrade_cost: round_money(breakdown.accommodation_upgrade_cost, 2),
            meal_price: round_money(breakdown.meal_price, 2),
            add_on_price: round_money(breakdown.add_on_price, 2),
            subtotal: round_money(breakdown.subtotal, 2),
            seasonal_adjustment: round_money(breakdown.seasonal_adjustment, 2),
            group_discount: round_money(breakdown.group_discount, 2),
            children_discount: round_money(breakdown.children_discount, 2),
            coupon_discount: round_money(breakdown.coupon_discount, 2),
            final_total: round_money(breakdown.final_total, 2),
            price_per_person: round_money(breakdown.price_per_person, 2),
            room_details: RoomDetailsResponse {
                total_rooms,
                people_per_room,
                room_rate: round_money(room_rate, 2),
                total_accommodation_cost: round_money(total_accommodation_cost, 2),
            },
        }
    }
}

/// Successful coupon validation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub code: String,
    pub name: String,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_value: Decimal,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub max_discount: Option<Decimal>,
    pub message: String,
}

impl CouponResponse {
    pub fn applied(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.clone(),
            name: coupon.name.clone(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            max_discount: coupon.max_discount,
            message: format!("Coupon \"{}\" applied successfully!", coupon.name),
        }
    }
}

/// Season lookup result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonResponse {
    pub date: NaiveDate,
    pub season: Season,
}

/// Generic error body for the JSON API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}
