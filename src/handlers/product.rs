// src/handlers/product.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::Error as SqlxError;
use tracing::{error, instrument};

use crate::dtos::product::{
    BulkImportProduct, CreateProductRequest, ProductResponse, UpdateProductRequest,
};
use crate::dtos::MessageResponse;
use crate::error::AppError;
use crate::models::product::Product;
use crate::state::AppState;

const PRODUCT_COLUMNS: &str = "id, product_id, product_name,
        (selling_price_include_tax)::FLOAT8 AS selling_price_include_tax,
        (mrp)::FLOAT8 AS mrp,
        (gst_percent)::FLOAT8 AS gst_percent,
        (stock_qty)::FLOAT8 AS stock_qty,
        unit_of_measurement";

fn map_unique_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            AppError::conflict(message)
        }
        other => other.into(),
    }
}

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    match sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY product_name"
    ))
    .fetch_all(&state.db_pool)
    .await
    {
        Ok(products) => {
            let response = products.into_iter().map(ProductResponse::from).collect();
            Ok(Json(response))
        }
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e.into())
        }
    }
}

// GET /products/:id - Get single product
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    if payload.product_name.trim().is_empty() {
        return Err(AppError::validation("Product name is required"));
    }
    if payload.stock_qty < 0.0 {
        return Err(AppError::validation("Stock quantity cannot be negative"));
    }

    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products
            (product_id, product_name, selling_price_include_tax, mrp, gst_percent, stock_qty, unit_of_measurement)
         VALUES ($1, $2, $3::FLOAT8, $4::FLOAT8, $5::FLOAT8, $6::FLOAT8, $7)
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&payload.product_id)
    .bind(payload.product_name.trim())
    .bind(payload.selling_price_include_tax)
    .bind(payload.mrp)
    .bind(payload.gst_percent)
    .bind(payload.stock_qty)
    .bind(&payload.unit_of_measurement)
    .fetch_one(&state.db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "Product ID already exists"))?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PUT /products/:id - Update product
#[instrument(skip(state, payload), fields(id))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    if let Some(stock) = payload.stock_qty {
        if stock < 0.0 {
            return Err(AppError::validation("Stock quantity cannot be negative"));
        }
    }

    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET
            product_id = COALESCE($1, product_id),
            product_name = COALESCE($2, product_name),
            selling_price_include_tax = COALESCE($3::FLOAT8, selling_price_include_tax),
            mrp = COALESCE($4::FLOAT8, mrp),
            gst_percent = COALESCE($5::FLOAT8, gst_percent),
            stock_qty = COALESCE($6::FLOAT8, stock_qty),
            unit_of_measurement = COALESCE($7, unit_of_measurement)
         WHERE id = $8
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(payload.product_id)
    .bind(payload.product_name)
    .bind(payload.selling_price_include_tax)
    .bind(payload.mrp)
    .bind(payload.gst_percent)
    .bind(payload.stock_qty)
    .bind(payload.unit_of_measurement)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "Product ID already exists"))?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/:id - Delete product
#[instrument(skip(state), fields(id))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}

// POST /products/bulk_import - Upsert a spreadsheet of products keyed on product_id
#[instrument(skip(state, payload))]
pub async fn bulk_import(
    State(state): State<AppState>,
    Json(payload): Json<Vec<BulkImportProduct>>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    if payload.is_empty() {
        return Err(AppError::validation("Expected a non-empty list of products"));
    }

    let mut tx = state.db_pool.begin().await?;

    for item in &payload {
        if item.product_id.trim().is_empty() {
            return Err(AppError::validation("Product ID is required for bulk import"));
        }

        sqlx::query(
            "INSERT INTO products
                (product_id, product_name, selling_price_include_tax, mrp, gst_percent, stock_qty, unit_of_measurement)
             VALUES ($1, $2, $3::FLOAT8, $4::FLOAT8, $5::FLOAT8, $6::FLOAT8, $7)
             ON CONFLICT (product_id) DO UPDATE SET
                product_name = EXCLUDED.product_name,
                selling_price_include_tax = EXCLUDED.selling_price_include_tax,
                mrp = EXCLUDED.mrp,
                gst_percent = EXCLUDED.gst_percent,
                stock_qty = EXCLUDED.stock_qty,
                unit_of_measurement = EXCLUDED.unit_of_measurement",
        )
        .bind(item.product_id.trim())
        .bind(&item.product_name)
        .bind(item.selling_price_include_tax.unwrap_or(0.0))
        .bind(item.mrp.unwrap_or(0.0))
        .bind(item.gst_percent.unwrap_or(0.0))
        .bind(item.stock_qty.unwrap_or(0.0))
        .bind(&item.unit_of_measurement)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("{} products imported successfully", payload.len()),
        }),
    ))
}
