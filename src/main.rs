use std::sync::Arc;

use anyhow::Context;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use utkaltours_web::config::Config;
use utkaltours_web::pricing::{self, PricingCatalog};
use utkaltours_web::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "utkaltours_web=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog = PricingCatalog::load(&config.catalog_path).with_context(|| {
        format!(
            "loading pricing catalog from {}",
            config.catalog_path.display()
        )
    })?;
    info!(
        destinations = catalog.destinations.len(),
        coupons = catalog.coupons.len(),
        "pricing catalog loaded"
    );

    let state = AppState {
        catalog: Arc::new(catalog),
    };

    let app = pricing::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
