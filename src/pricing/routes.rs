//! Pricing API route handlers.
//!
//! JSON endpoints consumed by the booking form: quote calculation, coupon
//! validation, season lookup, and catalog browsing.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};

use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators::{calculate_price, season_for_date};
use super::models::{Destination, PricingCatalog};
use super::requests::{QuoteRequest, ValidateCouponRequest};
use super::responses::{CouponResponse, PriceBreakdownResponse, SeasonResponse};
use super::services::validate_coupon;

/// Build the pricing router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/pricing/quote", post(quote))
        .route("/api/pricing/coupons/validate", post(coupon_validate))
        .route("/api/pricing/season/:date", get(season))
        .route("/api/pricing/catalog", get(catalog))
        .route("/api/pricing/destinations/:key", get(destination))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Full price breakdown for the visitor's current selection.
async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<PriceBreakdownResponse>> {
    let selection = request.into_selection();
    let breakdown = calculate_price(&state.catalog, &selection)?;
    Ok(Json(breakdown.into()))
}

/// Apply-time coupon validation with form-friendly error messages.
async fn coupon_validate(
    State(state): State<AppState>,
    Json(request): Json<ValidateCouponRequest>,
) -> Result<Json<CouponResponse>> {
    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let coupon = validate_coupon(&state.catalog, &request.code, request.subtotal, as_of)?;
    Ok(Json(CouponResponse::applied(coupon)))
}

/// Season classification for a travel start date.
async fn season(Path(date): Path<String>) -> Result<Json<SeasonResponse>> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date '{date}', expected YYYY-MM-DD")))?;
    Ok(Json(SeasonResponse {
        date,
        season: season_for_date(date),
    }))
}

/// The full pricing catalog, for rendering the form's option lists.
async fn catalog(State(state): State<AppState>) -> Json<PricingCatalog> {
    Json(state.catalog.as_ref().clone())
}

/// A single destination's packages and options.
async fn destination(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Destination>> {
    state
        .catalog
        .destinations
        .get(&key)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::str::FromStr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let catalog = PricingCatalog::from_json(
            r#"{
            "destinations": {
                "odisha": {
                    "name": "Odisha",
                    "availablePackages": {
                        "golden-triangle": {
                            "name": "Golden Triangle Package",
                            "basePricePerPerson": 8950,
                            "duration": 3
                        }
                    },
                    "accommodationOptions": {
                        "none": { "name": "No Accommodation", "pricePerNight": 0 },
                        "deluxe": { "name": "Deluxe Hotel", "pricePerNight": 2000 }
                    },
                    "mealOptions": {
                        "none": { "name": "No Meals", "pricePerDay": 0 }
                    },
                    "addOnServices": {}
                }
            },
            "seasonalPricing": {
                "peak": { "name": "Peak Season", "multiplier": 1.1 },
                "normal": { "name": "Normal Season", "multiplier": 1.0 },
                "off": { "name": "Off Season", "multiplier": 0.85 }
            },
            "groupDiscounts": {
                "2-4": { "multiplier": 1.0 }
            },
            "coupons": {
                "SAVE10": {
                    "code": "SAVE10",
                    "name": "Save 10%",
                    "discountType": "percentage",
                    "discountValue": 10,
                    "isActive": true,
                    "minAmount": 5000
                }
            }
        }"#,
        )
        .unwrap();
        router(AppState {
            catalog: Arc::new(catalog),
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn money(value: &Value) -> Decimal {
        Decimal::from_str(value.as_str().unwrap()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_quote_endpoint_peak_day_tour() {
        let request = post_json(
            "/api/pricing/quote",
            json!({
                "destination": "odisha",
                "selectedPackages": ["golden-triangle"],
                "accommodation": "none",
                "meals": "none",
                "numberOfAdults": 2,
                "startDate": "2025-11-15"
            }),
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        // Season derived from the November start date
        assert_eq!(money(&body["basePackagePrice"]), dec!(17900));
        assert_eq!(money(&body["seasonalAdjustment"]), dec!(1790));
        assert_eq!(money(&body["finalTotal"]), dec!(19690));
        assert_eq!(money(&body["pricePerPerson"]), dec!(9845));
    }

    #[tokio::test]
    async fn test_quote_endpoint_unknown_destination() {
        let request = post_json(
            "/api/pricing/quote",
            json!({
                "destination": "atlantis",
                "accommodation": "none",
                "meals": "none",
                "numberOfAdults": 2,
                "startDate": "2025-11-15"
            }),
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["errorType"], "invalid_destination");
    }

    #[tokio::test]
    async fn test_coupon_validate_success_and_minimum_gate() {
        let ok = app()
            .oneshot(post_json(
                "/api/pricing/coupons/validate",
                json!({ "code": "save10", "subtotal": "19690" }),
            ))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        let body = body_json(ok).await;
        assert_eq!(body["code"], "SAVE10");
        assert!(body["message"].as_str().unwrap().contains("applied successfully"));

        let rejected = app()
            .oneshot(post_json(
                "/api/pricing/coupons/validate",
                json!({ "code": "SAVE10", "subtotal": "4999" }),
            ))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(rejected).await;
        assert_eq!(body["errorType"], "invalid_coupon");
    }

    #[tokio::test]
    async fn test_season_endpoint() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/pricing/season/2025-08-10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["season"], "off");

        let bad = app()
            .oneshot(
                Request::builder()
                    .uri("/api/pricing/season/not-a-date")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_destination_lookup() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/pricing/destinations/odisha")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Odisha");

        let missing = app()
            .oneshot(
                Request::builder()
                    .uri("/api/pricing/destinations/atlantis")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_catalog_endpoint_serves_document() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/pricing/catalog")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["destinations"]["odisha"]["availablePackages"]
            .get("golden-triangle")
            .is_some());
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
