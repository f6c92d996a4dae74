use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

/// Largest accepted photo upload.
const PHOTO_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Everything under `/api/admin` requires a session holding the admin role;
/// the handlers enforce it through the `AdminUser` extractor.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        // Barbers
        .route(
            "/api/admin/barbers",
            get(handlers::barber::list_all_barbers).post(handlers::barber::create_barber),
        )
        .route(
            "/api/admin/barbers/:id",
            put(handlers::barber::update_barber).delete(handlers::barber::delete_barber),
        )
        .route(
            "/api/admin/barbers/:id/active",
            put(handlers::barber::set_barber_active),
        )
        .route(
            "/api/admin/barbers/:id/photo",
            post(handlers::barber::upload_photo).layer(DefaultBodyLimit::max(PHOTO_BODY_LIMIT)),
        )
        // Weekly schedules
        .route(
            "/api/admin/barbers/:id/schedule",
            get(handlers::schedule::get_week).put(handlers::schedule::update_week),
        )
        .route(
            "/api/admin/barbers/:id/schedule/reset",
            post(handlers::schedule::reset_week),
        )
        // Services
        .route(
            "/api/admin/services",
            get(handlers::service::list_all_services).post(handlers::service::create_service),
        )
        .route(
            "/api/admin/services/:id",
            put(handlers::service::update_service).delete(handlers::service::delete_service),
        )
        // Appointments
        .route(
            "/api/admin/appointments",
            get(handlers::appointment::list_appointments),
        )
        .route(
            "/api/admin/appointments/:id",
            delete(handlers::appointment::delete_appointment),
        )
        .route(
            "/api/admin/appointments/:id/status",
            put(handlers::appointment::update_appointment_status),
        )
        // Settings
        .route(
            "/api/admin/settings",
            get(handlers::settings::list_settings).put(handlers::settings::update_settings),
        )
        // Administrators
        .route(
            "/api/admin/admins",
            get(handlers::admin::list_admins).post(handlers::admin::create_admin),
        )
        .route(
            "/api/admin/admins/:user_id",
            delete(handlers::admin::remove_admin),
        )
}
