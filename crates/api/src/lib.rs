//! # Barbershop API
//!
//! The web server for the barbershop: public endpoints for the site and the
//! booking flow, and an `/api/admin` surface for running the shop.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate input, call repositories or the booking store
//! - **Middleware**: Authentication extractors and error mapping
//! - **Config**: Environment configuration
//! - **Storage**: Uploaded barber photos
//!
//! Slot availability and booking go through the
//! [`BookingStore`](barbershop_core::ports::BookingStore) port; the other
//! handlers use the repositories in `barbershop_db` directly.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Photo storage on the local filesystem
pub mod storage;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use barbershop_core::ports::BookingStore;
use barbershop_db::PgBookingStore;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::{config::ApiConfig, storage::PhotoStorage};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for repository calls
    pub db_pool: PgPool,
    /// Schedule and booking source used by availability and booking
    pub store: Arc<dyn BookingStore>,
    pub config: ApiConfig,
    pub photos: PhotoStorage,
}

impl ApiState {
    pub fn new(db_pool: PgPool, store: Arc<dyn BookingStore>, config: ApiConfig) -> Self {
        let photos = PhotoStorage::from_config(&config);
        Self {
            db_pool,
            store,
            config,
            photos,
        }
    }

    /// The shop's current date, which anchors the booking window.
    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Builds the full application router with its middleware stack
pub fn build_router(state: Arc<ApiState>) -> Router {
    let config = state.config.clone();

    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Accounts and sessions
        .merge(routes::auth::routes())
        // Public site and booking flow
        .merge(routes::barber::routes())
        .merge(routes::service::routes())
        .merge(routes::settings::routes())
        .merge(routes::appointment::routes())
        // Administration
        .merge(routes::admin::routes())
        // Uploaded photos
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(allowed)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs the tracing subscriber, ensures the bootstrap administrator
/// exists, and serves until the process is stopped.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = barbershop_api::config::ApiConfig::from_env()?;
/// let db_pool = barbershop_db::create_pool(&config.database_url).await?;
/// barbershop_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(admin) = &config.bootstrap_admin {
        let user_id = handlers::admin::ensure_admin(&db_pool, &admin.email, &admin.password)
            .await
            .map_err(|e| eyre::eyre!("Failed to bootstrap admin {}: {}", admin.email, e))?;
        info!("Bootstrap admin {} is ready ({})", admin.email, user_id);
    }

    let addr = config.server_addr();
    let store = Arc::new(PgBookingStore::new(db_pool.clone()));
    let state = Arc::new(ApiState::new(db_pool, store, config));
    let app = build_router(state);

    // Start the HTTP server
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
