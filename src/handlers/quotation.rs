// src/handlers/quotation.rs
use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dtos::quotation::{
    CreateQuotationRequest, QuotationCreatedResponse, QuotationItemResponse, QuotationResponse,
};
use crate::error::AppError;
use crate::models::quotation::{QuotationItemDetail, QuotationWithCustomer};
use crate::state::AppState;

const QUOTATION_COLUMNS: &str = "q.id, q.customer_id, c.name AS customer_name,
        (q.total_amount)::FLOAT8 AS total_amount, q.created_at";

const ITEM_COLUMNS: &str = "qi.quotation_id, qi.product_id, p.product_name,
        (qi.quantity)::FLOAT8 AS quantity, (qi.price)::FLOAT8 AS price";

// POST /quotations - quotation + items in one transaction; prices snapshotted
// from the product at quote time; no stock movement
pub async fn create_quotation(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<CreateQuotationRequest>,
) -> Result<(StatusCode, Json<QuotationCreatedResponse>), AppError> {
    if req.items.is_empty() {
        return Err(AppError::validation("Quotation must contain at least one item"));
    }

    let mut tx = db_pool.begin().await?;

    let quotation_id: i64 = sqlx::query_scalar(
        "INSERT INTO quotations (customer_id, total_amount)
         VALUES ($1, $2::FLOAT8)
         RETURNING id",
    )
    .bind(req.customer)
    .bind(req.total_amount)
    .fetch_one(&mut *tx)
    .await?;

    for item in &req.items {
        if !item.quantity.is_finite() || item.quantity <= 0.0 {
            return Err(AppError::validation(format!(
                "Invalid quantity for product {}",
                item.product
            )));
        }

        let price: f64 = sqlx::query_scalar(
            "SELECT (selling_price_include_tax)::FLOAT8 FROM products WHERE id = $1",
        )
        .bind(item.product)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", item.product)))?;

        sqlx::query(
            "INSERT INTO quotation_items (quotation_id, product_id, quantity, price)
             VALUES ($1, $2, $3::FLOAT8, $4::FLOAT8)",
        )
        .bind(quotation_id)
        .bind(item.product)
        .bind(item.quantity)
        .bind(price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(QuotationCreatedResponse {
            message: "Quotation saved with items".to_string(),
            id: quotation_id,
        }),
    ))
}

// GET /quotations - newest first, items nested
pub async fn list_quotations(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<Vec<QuotationResponse>>, AppError> {
    let quotations = sqlx::query_as::<_, QuotationWithCustomer>(&format!(
        "SELECT {QUOTATION_COLUMNS}
         FROM quotations q
         LEFT JOIN customers c ON q.customer_id = c.id
         ORDER BY q.id DESC"
    ))
    .fetch_all(&db_pool)
    .await?;

    let ids: Vec<i64> = quotations.iter().map(|q| q.id).collect();
    let items = sqlx::query_as::<_, QuotationItemDetail>(&format!(
        "SELECT {ITEM_COLUMNS}
         FROM quotation_items qi
         JOIN products p ON qi.product_id = p.id
         WHERE qi.quotation_id = ANY($1)
         ORDER BY qi.id"
    ))
    .bind(&ids)
    .fetch_all(&db_pool)
    .await?;

    let mut grouped: HashMap<i64, Vec<QuotationItemResponse>> = HashMap::new();
    for item in items {
        grouped.entry(item.quotation_id).or_default().push(item.into());
    }

    Ok(Json(
        quotations
            .into_iter()
            .map(|quotation| {
                let items = grouped.remove(&quotation.id).unwrap_or_default();
                QuotationResponse::from_rows(quotation, items)
            })
            .collect(),
    ))
}

// GET /quotations/:id
pub async fn get_quotation(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<QuotationResponse>, AppError> {
    let quotation = sqlx::query_as::<_, QuotationWithCustomer>(&format!(
        "SELECT {QUOTATION_COLUMNS}
         FROM quotations q
         LEFT JOIN customers c ON q.customer_id = c.id
         WHERE q.id = $1"
    ))
    .bind(id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Quotation not found"))?;

    let items = sqlx::query_as::<_, QuotationItemDetail>(&format!(
        "SELECT {ITEM_COLUMNS}
         FROM quotation_items qi
         JOIN products p ON qi.product_id = p.id
         WHERE qi.quotation_id = $1
         ORDER BY qi.id"
    ))
    .bind(id)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(QuotationResponse::from_rows(
        quotation,
        items.into_iter().map(QuotationItemResponse::from).collect(),
    )))
}
