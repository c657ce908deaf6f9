//! Core pricing calculation functions.
//!
//! Pure functions for quote math - no I/O and no shared state. Every call
//! is an independent computation over the catalog and the visitor's current
//! selection, so the booking form can invoke it on every keystroke.
//!
//! The breakdown pipeline runs in a fixed order because each discount
//! compounds on the previous result: packages, accommodation, meals,
//! add-ons, subtotal, seasonal adjustment, group discount, coupon discount.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::models::{
    BookingSelection, DiscountType, PriceBreakdown, PricingCatalog, RoomAllocation,
};

/// Accommodation key meaning "day tour, no lodging".
pub const NO_ACCOMMODATION: &str = "none";

/// Add-on key prefix for transport tiers carrying a per-person surcharge.
pub const TRANSPORT_PREFIX: &str = "transport-";

/// Hard cap on travellers sharing one room.
pub const MAX_PEOPLE_PER_ROOM: u32 = 3;

/// Flat discount factor for children under 11 on package and meal prices.
const CHILD_RATE: Decimal = dec!(0.5);

/// Quote computation errors.
///
/// Only two conditions abort a quote; every other missing reference is a
/// zero-priced absence because the form calls in mid-edit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    /// The selection names a destination absent from the catalog.
    #[error("unknown destination '{0}'")]
    InvalidDestination(String),
    /// `adults + children` is zero; the per-person price is undefined.
    #[error("party size must be at least one traveller")]
    InvalidPartySize,
}

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is
/// exactly halfway between two possibilities. This reduces cumulative
/// rounding bias. Applied at the presentation boundary only; the pipeline
/// itself keeps full precision.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use utkaltours_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Travel season, derived from the month of the start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Peak,
    Normal,
    Off,
}

impl Season {
    /// Catalog lookup key for this season.
    pub fn key(self) -> &'static str {
        match self {
            Season::Peak => "peak",
            Season::Normal => "normal",
            Season::Off => "off",
        }
    }
}

/// Classify a start date into a season. Month-of-year only; day and year
/// are ignored.
///
/// Oct-Feb is peak, Jul-Aug is off season, everything else is normal.
pub fn season_for_date(date: NaiveDate) -> Season {
    match date.month() {
        10..=12 | 1 | 2 => Season::Peak,
        7 | 8 => Season::Off,
        _ => Season::Normal,
    }
}

/// Party-size bracket for group discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBracket {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl GroupBracket {
    /// Classify a party size. Parties of one fall into the smallest bracket.
    pub fn for_party(people: u32) -> Self {
        match people {
            0..=4 => GroupBracket::Small,
            5..=8 => GroupBracket::Medium,
            9..=15 => GroupBracket::Large,
            _ => GroupBracket::ExtraLarge,
        }
    }

    /// Catalog lookup key for this bracket.
    pub fn key(self) -> &'static str {
        match self {
            GroupBracket::Small => "2-4",
            GroupBracket::Medium => "5-8",
            GroupBracket::Large => "9-15",
            GroupBracket::ExtraLarge => "16+",
        }
    }
}

/// Distribute travellers across the requested rooms, at most 3 per room.
///
/// Rooms fill in order; surplus rooms get 0 people. The count is never
/// auto-shrunk, so `sum == min(total_people, 3 * requested_rooms)`.
pub fn allocate_rooms(total_people: u32, requested_rooms: u32) -> Vec<u32> {
    let mut remaining = total_people;
    (0..requested_rooms)
        .map(|_| {
            let occupants = remaining.min(MAX_PEOPLE_PER_ROOM);
            remaining -= occupants;
            occupants
        })
        .collect()
}

/// Calculate a full price breakdown for a booking selection.
///
/// Missing package/accommodation/meal/add-on keys contribute zero rather
/// than erroring: the form calls this continuously while the visitor is
/// still composing an incomplete selection. An unknown destination is the
/// one fatal case, and an empty party makes the per-person price undefined.
pub fn calculate_price(
    catalog: &PricingCatalog,
    selection: &BookingSelection,
) -> Result<PriceBreakdown, QuoteError> {
    let destination = catalog
        .destinations
        .get(&selection.destination)
        .ok_or_else(|| QuoteError::InvalidDestination(selection.destination.clone()))?;

    let travellers = selection.adults + selection.children;
    if travellers == 0 {
        return Err(QuoteError::InvalidPartySize);
    }

    let adults = Decimal::from(selection.adults);
    let children = Decimal::from(selection.children);
    let people = Decimal::from(travellers);

    // Stage 1: duration and base package price. Packages are sequential
    // back-to-back legs; children pay half the per-person rate.
    let mut total_days: u32 = 0;
    let mut base_package_price = Decimal::ZERO;
    let mut children_package_discount = Decimal::ZERO;
    for key in &selection.selected_packages {
        if let Some(pkg) = destination.available_packages.get(key) {
            total_days += pkg.duration;
            let child_share = pkg.base_price_per_person * children * CHILD_RATE;
            base_package_price += pkg.base_price_per_person * adults + child_share;
            children_package_discount += child_share;
        }
    }
    let total_nights = total_days.saturating_sub(1);
    let days = Decimal::from(total_days);
    let nights = Decimal::from(total_nights);

    // Stage 2: accommodation. Charged per room per night, only when the
    // trip spans a night and lodging was actually chosen. The upgrade
    // surcharge is per person per night and counts children at the full
    // rate (reference behavior).
    let accommodation = destination.accommodation_options.get(&selection.accommodation);
    let mut accommodation_price = Decimal::ZERO;
    let mut accommodation_upgrade_cost = Decimal::ZERO;
    let mut people_per_room = Vec::new();
    let room_rate = accommodation
        .map(|acc| acc.price_per_night)
        .unwrap_or(Decimal::ZERO);
    if total_nights > 0 && selection.accommodation != NO_ACCOMMODATION {
        if let Some(acc) = accommodation {
            people_per_room = allocate_rooms(travellers, selection.rooms);
            accommodation_price = acc.price_per_night * nights * Decimal::from(selection.rooms);
            if let Some(surcharge) = acc.extra_cost_per_person {
                accommodation_upgrade_cost = surcharge * people * nights;
                accommodation_price += accommodation_upgrade_cost;
            }
        }
    }
    let room_details = RoomAllocation {
        total_rooms: selection.rooms,
        people_per_room,
        room_rate,
        total_accommodation_cost: accommodation_price,
    };

    // Stage 3: meals. Per person per day over the full trip duration,
    // children at half rate.
    let meal_rate = destination
        .meal_options
        .get(&selection.meals)
        .map(|meal| meal.price_per_day)
        .unwrap_or(Decimal::ZERO);
    let children_meal_discount = meal_rate * days * children * CHILD_RATE;
    let meal_price = meal_rate * days * adults + children_meal_discount;

    // Stage 4: add-ons. Per-day price wins over flat price. Transport tiers
    // additionally charge (or refund) a per-person surcharge for every day;
    // the sum is not floored at zero.
    let mut add_on_price = Decimal::ZERO;
    for key in &selection.add_ons {
        let Some(add_on) = destination.add_on_services.get(key) else {
            continue;
        };
        if let Some(per_day) = add_on.price_per_day {
            add_on_price += per_day * days;
        } else if let Some(flat) = add_on.price {
            add_on_price += flat;
        }
        if key.starts_with(TRANSPORT_PREFIX) {
            if let Some(surcharge) = add_on.extra_cost_per_person {
                add_on_price += surcharge * people * days;
            }
        }
    }

    // Stage 5: subtotal.
    let subtotal = base_package_price + accommodation_price + meal_price + add_on_price;

    // Stage 6: seasonal adjustment, signed. Unknown season keys leave the
    // price untouched.
    let seasonal_multiplier = catalog
        .seasonal_pricing
        .get(&selection.season)
        .map(|rate| rate.multiplier)
        .unwrap_or(Decimal::ONE);
    let seasonal_adjustment = subtotal * (seasonal_multiplier - Decimal::ONE);
    let after_seasonal = subtotal + seasonal_adjustment;

    // Stage 7: group discount on the seasonally adjusted amount.
    let bracket = GroupBracket::for_party(travellers);
    let group_multiplier = catalog
        .group_discounts
        .get(bracket.key())
        .map(|discount| discount.multiplier)
        .unwrap_or(Decimal::ONE);
    let group_discount = after_seasonal * (Decimal::ONE - group_multiplier);

    // Stage 8: coupon discount on what is left after the other discounts.
    let coupon_discount = coupon_discount(
        catalog,
        selection.applied_coupon.as_deref(),
        after_seasonal - group_discount,
    );

    // Stage 9: final total and per-person price.
    let final_total = after_seasonal - group_discount - coupon_discount;
    let price_per_person = final_total / people;

    Ok(PriceBreakdown {
        base_package_price,
        accommodation_price,
        accommodation_upgrade_cost,
        meal_price,
        add_on_price,
        subtotal,
        seasonal_adjustment,
        group_discount,
        children_discount: children_package_discount + children_meal_discount,
        coupon_discount,
        final_total,
        price_per_person,
        room_details,
    })
}

/// Coupon contribution against the amount remaining after seasonal and
/// group adjustments.
///
/// Re-checks the active flag and minimum amount defensively (the form
/// validates these at apply time too). Percentage discounts respect the
/// optional cap; the result never exceeds the base amount.
fn coupon_discount(catalog: &PricingCatalog, code: Option<&str>, base: Decimal) -> Decimal {
    let Some(code) = code else {
        return Decimal::ZERO;
    };
    let Some(coupon) = catalog.coupons.get(code) else {
        return Decimal::ZERO;
    };
    if !coupon.is_active {
        return Decimal::ZERO;
    }
    if let Some(minimum) = coupon.min_amount {
        if base < minimum {
            return Decimal::ZERO;
        }
    }

    let discount = match coupon.discount_type {
        DiscountType::Percentage => {
            let discount = base * coupon.discount_value / Decimal::ONE_HUNDRED;
            match coupon.max_discount {
                Some(cap) => discount.min(cap),
                None => discount,
            }
        }
        DiscountType::Fixed => coupon.discount_value,
    };

    discount.min(base)
}
