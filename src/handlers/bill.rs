// src/handlers/bill.rs
use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::billing::{post_bill, BillHeader, BillLine, PgBillingStore};
use crate::dtos::bill::{BillCreatedResponse, BillItemResponse, BillResponse, CreateBillRequest};
use crate::error::AppError;
use crate::models::bill::{BillItemDetail, BillWithCustomer};
use crate::state::AppState;

const BILL_COLUMNS: &str = "b.id, b.bill_no, b.customer_id,
        c.name AS customer_name, c.address, c.phone,
        (b.total_amount)::FLOAT8 AS total_amount, b.payment_mode, b.created_at";

const ITEM_COLUMNS: &str = "bi.bill_id, p.product_name, p.product_id AS hsn_code,
        (bi.qty)::FLOAT8 AS qty, (bi.price)::FLOAT8 AS price,
        (bi.gst_percent)::FLOAT8 AS gst_percent";

// POST /bills - the billing transaction: bill + items + stock decrement, all or nothing
pub async fn create_bill(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<BillCreatedResponse>), AppError> {
    let header = BillHeader {
        bill_no: req.bill_no,
        customer_id: req.customer,
        total_amount: req.total_amount,
        payment_mode: req.payment_mode.unwrap_or_else(|| "CASH".to_string()),
    };
    let lines: Vec<BillLine> = req
        .items
        .iter()
        .map(|item| BillLine {
            product_id: item.product_id,
            qty: item.qty,
            price: item.price,
            gst_percent: item.gst_percent.unwrap_or(0.0),
        })
        .collect();

    let mut tx = db_pool.begin().await?;
    let result = {
        let mut store = PgBillingStore::new(&mut tx);
        post_bill(&mut store, &header, &lines).await
    };

    match result {
        Ok(id) => {
            tx.commit().await?;
            info!(bill_no = %header.bill_no, id, "Bill saved");
            Ok((
                StatusCode::CREATED,
                Json(BillCreatedResponse {
                    message: "Bill saved".to_string(),
                    id,
                }),
            ))
        }
        Err(e) => {
            tx.rollback().await?;
            Err(e.into())
        }
    }
}

// GET /bills - newest first, items nested
pub async fn list_bills(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<Vec<BillResponse>>, AppError> {
    let bills = sqlx::query_as::<_, BillWithCustomer>(&format!(
        "SELECT {BILL_COLUMNS}
         FROM billing_history b
         LEFT JOIN customers c ON b.customer_id = c.id
         ORDER BY b.id DESC"
    ))
    .fetch_all(&db_pool)
    .await?;

    let ids: Vec<i64> = bills.iter().map(|b| b.id).collect();
    let items = sqlx::query_as::<_, BillItemDetail>(&format!(
        "SELECT {ITEM_COLUMNS}
         FROM bill_items bi
         JOIN products p ON bi.product_id = p.id
         WHERE bi.bill_id = ANY($1)
         ORDER BY bi.id"
    ))
    .bind(&ids)
    .fetch_all(&db_pool)
    .await?;

    let mut grouped: HashMap<i64, Vec<BillItemResponse>> = HashMap::new();
    for item in items {
        grouped.entry(item.bill_id).or_default().push(item.into());
    }

    Ok(Json(
        bills
            .into_iter()
            .map(|bill| {
                let items = grouped.remove(&bill.id).unwrap_or_default();
                BillResponse::from_rows(bill, items)
            })
            .collect(),
    ))
}

// GET /bills/:id
pub async fn get_bill(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BillResponse>, AppError> {
    let bill = sqlx::query_as::<_, BillWithCustomer>(&format!(
        "SELECT {BILL_COLUMNS}
         FROM billing_history b
         LEFT JOIN customers c ON b.customer_id = c.id
         WHERE b.id = $1"
    ))
    .bind(id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Bill not found"))?;

    let items = sqlx::query_as::<_, BillItemDetail>(&format!(
        "SELECT {ITEM_COLUMNS}
         FROM bill_items bi
         JOIN products p ON bi.product_id = p.id
         WHERE bi.bill_id = $1
         ORDER BY bi.id"
    ))
    .bind(id)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(BillResponse::from_rows(
        bill,
        items.into_iter().map(BillItemResponse::from).collect(),
    )))
}

// DELETE /bills/:id - cascade removes the items; sold stock is not restored
pub async fn delete_bill(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM billing_history WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Bill not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
