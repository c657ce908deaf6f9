//! Utkal Tours pricing and quoting service.
//!
//! Serves the booking form's price calculations over HTTP/JSON. The front
//! end sends the visitor's current selection on every change and renders
//! the returned breakdown; all pricing rules live here, driven by a static
//! catalog document loaded at startup.

pub mod config;
pub mod error;
pub mod pricing;

use std::sync::Arc;

use pricing::models::PricingCatalog;

/// Shared application state: the read-only pricing catalog.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PricingCatalog>,
}
