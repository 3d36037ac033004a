// src/handlers/customer.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dtos::customer::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest};
use crate::error::AppError;
use crate::models::customer::Customer;
use crate::state::AppState;

pub async fn create_customer(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Customer name is required"));
    }
    if req.phone.trim().is_empty() {
        return Err(AppError::validation("Phone number is required"));
    }

    let customer = sqlx::query_as::<_, Customer>(
        "INSERT INTO customers (name, email, phone, address)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, email, phone, address",
    )
    .bind(req.name.trim())
    .bind(&req.email)
    .bind(req.phone.trim())
    .bind(&req.address)
    .fetch_one(&db_pool)
    .await
    .map_err(|e| {
        if let Some(db) = e.as_database_error() {
            if db.code().as_deref() == Some("23505") {
                return AppError::conflict("Phone number already exists");
            }
        }
        AppError::db(e)
    })?;

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

pub async fn get_customer(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = sqlx::query_as::<_, Customer>(
        "SELECT id, name, email, phone, address FROM customers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Customer not found"))?;

    Ok(Json(CustomerResponse::from(customer)))
}

pub async fn list_customers(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers = sqlx::query_as::<_, Customer>(
        "SELECT id, name, email, phone, address FROM customers ORDER BY name ASC",
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(
        customers.into_iter().map(CustomerResponse::from).collect(),
    ))
}

pub async fn update_customer(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = sqlx::query_as::<_, Customer>(
        "UPDATE customers SET
            name = COALESCE($2, name),
            email = COALESCE($3, email),
            phone = COALESCE($4, phone),
            address = COALESCE($5, address)
         WHERE id = $1
         RETURNING id, name, email, phone, address",
    )
    .bind(id)
    .bind(req.name.as_deref().map(str::trim))
    .bind(req.email)
    .bind(req.phone.as_deref().map(str::trim))
    .bind(req.address)
    .fetch_optional(&db_pool)
    .await
    .map_err(|e| {
        if let Some(db) = e.as_database_error() {
            if db.code().as_deref() == Some("23505") {
                return AppError::conflict("Phone number already exists");
            }
        }
        AppError::db(e)
    })?
    .ok_or_else(|| AppError::not_found("Customer not found"))?;

    Ok(Json(CustomerResponse::from(customer)))
}

pub async fn delete_customer(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Customer not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
