//! HTTP routing.
//!
//! The customer endpoints are mounted under [`API_PREFIX`], which is the
//! base URL the views talk to.

mod customers;
mod request_tracing;

use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::{Value, json};

use crate::state::AppState;

/// Path prefix of the customer API.
pub const API_PREFIX: &str = "/api";

/// Routes for the customer collection and its items.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customer",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/customer/:id",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest(API_PREFIX, customer_routes())
        .layer(middleware::from_fn(request_tracing::trace_request))
        .with_state(state)
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
