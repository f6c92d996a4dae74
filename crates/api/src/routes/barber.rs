use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/barbers", get(handlers::barber::list_barbers))
        .route("/api/barbers/:id", get(handlers::barber::get_barber))
        .route(
            "/api/barbers/:id/availability",
            get(handlers::availability::get_availability),
        )
}
