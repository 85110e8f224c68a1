//! Router assembly

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, customers, health, invoices, users};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/api/login", post(auth::login))
        // Users
        .route("/api/users", post(users::register).get(users::list))
        .route("/api/users/{id}", get(users::get).put(users::update).delete(users::delete))
        // Customers
        .route("/api/customers", post(customers::create).get(customers::list))
        .route(
            "/api/customers/{id}",
            get(customers::get).put(customers::update).delete(customers::delete),
        )
        .route("/api/customers/{id}/invoices", get(customers::invoices))
        // Invoices
        .route("/api/invoices", post(invoices::create).get(invoices::list))
        .route(
            "/api/invoices/{id}",
            get(invoices::get).put(invoices::update).delete(invoices::delete),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
