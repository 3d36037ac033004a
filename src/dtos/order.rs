// src/dtos/order.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::order::StoreOrder;

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub total_amount: f64,
    /// Line items as submitted by the storefront; stored verbatim.
    pub items: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct OrderPlacedResponse {
    pub status: &'static str,
    pub message: String,
    pub order_id: i64,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub total_amount: f64,
    pub items: serde_json::Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoreOrder> for OrderResponse {
    fn from(order: StoreOrder) -> Self {
        let items = serde_json::from_str(&order.items_json)
            .unwrap_or(serde_json::Value::Null);
        Self {
            id: order.id,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            address: order.address,
            total_amount: order.total_amount,
            items,
            status: order.status,
            created_at: order.created_at,
        }
    }
}
