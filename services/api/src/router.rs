use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use labdesk_core::health::{healthz, readyz};
use labdesk_core::middleware::request_id_layer;

use crate::handlers::{
    booking::{create_booking, get_booking, list_bookings, update_booking_status},
    lab_test::{create_test, delete_test, list_tests},
    register::{start_registration, verify_registration},
    report::{get_report, upload_report},
    token::{login, me},
    user::{delete_user, update_me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration
        .route("/auth/register", post(start_registration))
        .route("/auth/register/verify", post(verify_registration))
        // Session
        .route("/auth/token", post(login))
        .route("/auth/me", get(me))
        // Users
        .route("/users/@me", patch(update_me))
        .route("/users/{id}", delete(delete_user))
        // Test catalog
        .route("/tests", get(list_tests))
        .route("/tests", post(create_test))
        .route("/tests/{id}", delete(delete_test))
        // Bookings
        .route("/bookings", post(create_booking))
        .route("/bookings", get(list_bookings))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/status", patch(update_booking_status))
        .route("/bookings/{id}/report", post(upload_report))
        .route("/bookings/{id}/report", get(get_report))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
