//! Customer collection (`/customer`) and item (`/customer/:id`)
//! endpoints.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use clientele_core::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use clientele_core::repository::CustomerRepository;
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Ids that do not parse cannot name a stored customer.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("customer"))
}

pub(crate) async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = state.customers().await?.list().await?;
    Ok(Json(customers))
}

pub(crate) async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomer>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let Json(input) = payload?;
    let customer = state.customers().await?.create(input).await?;
    info!(customer_id = %customer.id, member_number = customer.member_number, "Customer created");
    Ok(Json(customer))
}

pub(crate) async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let id = parse_id(&id)?;
    let customer = state.customers().await?.get_by_id(id).await?;
    Ok(Json(customer))
}

pub(crate) async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCustomer>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    let customer = state.customers().await?.update(id, input).await?;
    info!(customer_id = %customer.id, "Customer updated");
    Ok(Json(customer))
}

pub(crate) async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state.customers().await?.delete(id).await?;
    info!(customer_id = %deleted.id, "Customer deleted");
    Ok(Json(json!({ "message": "Customer deleted successfully" })))
}
