use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct QuotationWithCustomer {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct QuotationItemDetail {
    pub quotation_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub price: f64,
}
