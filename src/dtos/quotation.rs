// src/dtos/quotation.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::quotation::{QuotationItemDetail, QuotationWithCustomer};

#[derive(Debug, Deserialize)]
pub struct CreateQuotationRequest {
    pub customer: Option<i64>,
    pub total_amount: f64,
    pub items: Vec<QuotationItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct QuotationItemRequest {
    pub product: i64,
    pub quantity: f64,
}

#[derive(Debug, Serialize)]
pub struct QuotationCreatedResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct QuotationResponse {
    pub id: i64,
    pub customer: Option<i64>,
    pub customer_name: Option<String>,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
    pub items: Vec<QuotationItemResponse>,
}

#[derive(Debug, Serialize)]
pub struct QuotationItemResponse {
    pub product: i64,
    pub product_name: String,
    pub quantity: f64,
    pub price: f64,
}

impl QuotationResponse {
    pub fn from_rows(quotation: QuotationWithCustomer, items: Vec<QuotationItemResponse>) -> Self {
        Self {
            id: quotation.id,
            customer: quotation.customer_id,
            customer_name: quotation.customer_name,
            total_amount: quotation.total_amount,
            created_at: quotation.created_at,
            items,
        }
    }
}

impl From<QuotationItemDetail> for QuotationItemResponse {
    fn from(item: QuotationItemDetail) -> Self {
        Self {
            product: item.product_id,
            product_name: item.product_name,
            quantity: item.quantity,
            price: item.price,
        }
    }
}
