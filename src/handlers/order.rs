// src/handlers/order.rs
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::dtos::order::{OrderPlacedResponse, OrderResponse, PlaceOrderRequest};
use crate::error::AppError;
use crate::models::order::StoreOrder;
use crate::state::AppState;

// POST /orders - e-commerce intake; line items stored verbatim as JSON text
pub async fn place_order(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderPlacedResponse>), AppError> {
    if req.customer_name.trim().is_empty() {
        return Err(AppError::validation("Customer name is required"));
    }

    let items_json = serde_json::to_string(&req.items)
        .map_err(|e| AppError::internal(format!("Failed to encode order items: {e}")))?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO store_orders (customer_name, customer_phone, address, total_amount, items_json)
         VALUES ($1, $2, $3, $4::FLOAT8, $5)
         RETURNING id",
    )
    .bind(req.customer_name.trim())
    .bind(&req.customer_phone)
    .bind(&req.address)
    .bind(req.total_amount)
    .bind(&items_json)
    .fetch_one(&db_pool)
    .await?;

    info!(order_id = id, "Order received from storefront");

    Ok((
        StatusCode::CREATED,
        Json(OrderPlacedResponse {
            status: "success",
            message: "Order synced with backend".to_string(),
            order_id: id,
        }),
    ))
}

// GET /orders - newest first
pub async fn list_orders(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = sqlx::query_as::<_, StoreOrder>(
        "SELECT id, customer_name, customer_phone, address,
                (total_amount)::FLOAT8 AS total_amount, items_json, status, created_at
         FROM store_orders
         ORDER BY id DESC",
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
