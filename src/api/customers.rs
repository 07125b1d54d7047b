//! Customer API handlers using the customer service

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use super::error::ApiError;
use crate::domain::{Customer, CustomerDto, CustomerInput, DomainError};
use crate::infrastructure::AppState;

/// Public prefix the customer routes are served under
pub const CUSTOMER_ROUTE_PREFIX: &str = "/api/CustomerManagement";

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Text matched against first and last name; empty lists everyone
    pub filter_by: Option<String>,
}

fn message(status: StatusCode, text: String) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

/// Turn a raw body into validated input: null, malformed or invalid payloads are all 400s
fn validated_input(
    payload: Result<Json<Option<CustomerDto>>, JsonRejection>,
) -> Result<CustomerInput, ApiError> {
    let dto = match payload {
        Ok(Json(Some(dto))) => dto,
        Ok(Json(None)) => {
            tracing::warn!("Customer object sent from client is null.");
            return Err(ApiError::BadRequest("Customer object is null".to_string()));
        }
        Err(rejection) => {
            tracing::warn!("Unreadable customer object sent from client: {}", rejection);
            return Err(ApiError::BadRequest(format!(
                "Invalid model object: {}",
                rejection.body_text()
            )));
        }
    };

    dto.validate().map_err(|errors| {
        tracing::warn!("Invalid Customer object sent from client: {}", errors);
        ApiError::Invalid(errors)
    })
}

fn not_found(id: i32) -> ApiError {
    tracing::warn!("Customer with id: {}, hasn't been found in db.", id);
    ApiError::NotFound(format!("Customer with id: {} not found", id))
}

/// Get a customer by id
#[utoipa::path(
    get,
    path = "/api/CustomerManagement/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 404, description = "No customer with this id"),
        (status = 500, description = "Unexpected failure")
    ),
    tag = "customers"
)]
pub async fn get_customer_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Customer>, ApiError> {
    match state.customers.get_customer(id).await? {
        Some(customer) => {
            tracing::info!("Returned customer with id: {}", id);
            Ok(Json(customer))
        }
        None => Err(not_found(id)),
    }
}

/// Add a customer unless one with the same first and last name exists
#[utoipa::path(
    put,
    path = "/api/CustomerManagement/Customers/AddCustomer",
    request_body = CustomerDto,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 200, description = "A customer with this name already exists"),
        (status = 400, description = "Null or invalid customer object"),
        (status = 500, description = "Unexpected failure")
    ),
    tag = "customers"
)]
pub async fn add_customer(
    State(state): State<AppState>,
    payload: Result<Json<Option<CustomerDto>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let input = validated_input(payload)?;

    if state.customers.customer_exists(&input).await? {
        let text = format!(
            "customer already exists with the given First Name : {} and Last Name : {}",
            input.first_name(),
            input.last_name()
        );
        tracing::warn!("{}", text);
        return Ok(message(StatusCode::OK, text));
    }

    let customer = state.customers.create_customer(input).await?;
    let location = format!("{}/{}", CUSTOMER_ROUTE_PREFIX, customer.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(customer),
    )
        .into_response())
}

/// Update a customer's names and date of birth
#[utoipa::path(
    put,
    path = "/api/CustomerManagement/Customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = CustomerDto,
    responses(
        (status = 200, description = "Customer updated, or the new name conflicts with an existing customer"),
        (status = 400, description = "Null or invalid customer object"),
        (status = 404, description = "No customer with this id"),
        (status = 500, description = "Unexpected failure")
    ),
    tag = "customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<Option<CustomerDto>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let input = validated_input(payload)?;

    if state.customers.get_customer(id).await?.is_none() {
        return Err(not_found(id));
    }

    if state.customers.customer_exists(&input).await? {
        let text = format!(
            "Update will conflict with First Name : {} and Last Name : {}",
            input.first_name(),
            input.last_name()
        );
        tracing::warn!("{}", text);
        return Ok(message(StatusCode::OK, text));
    }

    match state.customers.update_customer(id, input).await {
        Ok(_) => Ok(message(
            StatusCode::OK,
            "Customer updated successfully.".to_string(),
        )),
        Err(DomainError::NotFound) => Err(not_found(id)),
        Err(e) => Err(e.into()),
    }
}

/// Delete a customer by id
#[utoipa::path(
    delete,
    path = "/api/CustomerManagement/Customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 404, description = "No customer with this id"),
        (status = 500, description = "Unexpected failure")
    ),
    tag = "customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    match state.customers.delete_customer(id).await {
        Ok(()) => Ok(message(
            StatusCode::OK,
            "Customer Deleted successfully.".to_string(),
        )),
        Err(DomainError::NotFound) => Err(not_found(id)),
        Err(e) => Err(e.into()),
    }
}

/// Search customers by first or last name, or list all when no filter is given
#[utoipa::path(
    get,
    path = "/api/CustomerManagement/Customers/GetCustomers",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching customers", body = [Customer]),
        (status = 500, description = "Unexpected failure")
    ),
    tag = "customers"
)]
pub async fn get_customers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let filter = query.filter_by.as_deref().unwrap_or_default();

    let customers = if filter.is_empty() {
        let all = state.customers.list_customers().await?;
        tracing::info!("Returned all Customers from database.");
        all
    } else {
        let found = state.customers.find_customers_by_name(filter).await?;
        tracing::info!(
            "All Customers with First Name or Last Name Like {}, Returned ({})",
            filter,
            found.len()
        );
        found
    };

    Ok(Json(customers))
}
