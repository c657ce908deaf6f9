//! Pricing engine module for the booking form.
//!
//! Provides the quote calculations behind the interactive booking panel.
//! The Next.js front end calls this module via HTTP/JSON on every
//! selection change and renders the returned breakdown.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{calculate_price, round_money, season_for_date, QuoteError, Season};
pub use models::{BookingSelection, PriceBreakdown, PricingCatalog};
pub use routes::router;
pub use services::{validate_coupon, CouponError};
