// src/handlers/service_entry.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dtos::service_entry::{ServiceEntryRequest, ServiceEntryResponse};
use crate::dtos::MessageResponse;
use crate::error::AppError;
use crate::models::service_entry::ServiceEntryWithCustomer;
use crate::state::AppState;

const ENTRY_COLUMNS: &str = "s.id, s.customer_id, c.name AS customer_name,
        s.phone, s.address, s.call_for, s.status,
        (s.amount)::FLOAT8 AS amount, s.notes, s.created_on";

async fn fetch_entry(db_pool: &sqlx::PgPool, id: i64) -> Result<ServiceEntryResponse, AppError> {
    let entry = sqlx::query_as::<_, ServiceEntryWithCustomer>(&format!(
        "SELECT {ENTRY_COLUMNS}
         FROM service_entries s
         LEFT JOIN customers c ON s.customer_id = c.id
         WHERE s.id = $1"
    ))
    .bind(id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Service entry not found"))?;

    Ok(ServiceEntryResponse::from(entry))
}

// GET /services - newest first
pub async fn list_services(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<Vec<ServiceEntryResponse>>, AppError> {
    let entries = sqlx::query_as::<_, ServiceEntryWithCustomer>(&format!(
        "SELECT {ENTRY_COLUMNS}
         FROM service_entries s
         LEFT JOIN customers c ON s.customer_id = c.id
         ORDER BY s.created_on DESC"
    ))
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(
        entries.into_iter().map(ServiceEntryResponse::from).collect(),
    ))
}

// GET /services/:id
pub async fn get_service(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ServiceEntryResponse>, AppError> {
    fetch_entry(&db_pool, id).await.map(Json)
}

// POST /services
pub async fn create_service(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<ServiceEntryRequest>,
) -> Result<(StatusCode, Json<ServiceEntryResponse>), AppError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO service_entries (customer_id, phone, address, call_for, status, amount, notes)
         VALUES ($1, $2, $3, $4, $5, $6::FLOAT8, $7)
         RETURNING id",
    )
    .bind(req.customer)
    .bind(&req.phone)
    .bind(&req.address)
    .bind(&req.call_for)
    .bind(&req.status)
    .bind(req.amount)
    .bind(&req.notes)
    .fetch_one(&db_pool)
    .await?;

    let entry = fetch_entry(&db_pool, id).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

// PUT /services/:id - full update, same payload as create
pub async fn update_service(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ServiceEntryRequest>,
) -> Result<Json<ServiceEntryResponse>, AppError> {
    let result = sqlx::query(
        "UPDATE service_entries SET
            customer_id = $2, phone = $3, address = $4, call_for = $5,
            status = $6, amount = $7::FLOAT8, notes = $8
         WHERE id = $1",
    )
    .bind(id)
    .bind(req.customer)
    .bind(&req.phone)
    .bind(&req.address)
    .bind(&req.call_for)
    .bind(&req.status)
    .bind(req.amount)
    .bind(&req.notes)
    .execute(&db_pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Service entry not found"));
    }

    fetch_entry(&db_pool, id).await.map(Json)
}

// DELETE /services/:id
pub async fn delete_service(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM service_entries WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Service entry not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}

// POST /services/bulk_create - all-or-nothing insert of a batch of entries
pub async fn bulk_create(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<Vec<ServiceEntryRequest>>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    if payload.is_empty() {
        return Err(AppError::validation("Expected a non-empty list of service entries"));
    }

    let mut tx = db_pool.begin().await?;

    for req in &payload {
        sqlx::query(
            "INSERT INTO service_entries (customer_id, phone, address, call_for, status, amount, notes)
             VALUES ($1, $2, $3, $4, $5, $6::FLOAT8, $7)",
        )
        .bind(req.customer)
        .bind(&req.phone)
        .bind(&req.address)
        .bind(&req.call_for)
        .bind(&req.status)
        .bind(req.amount)
        .bind(&req.notes)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("{} services created successfully", payload.len()),
        }),
    ))
}
