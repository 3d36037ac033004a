use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct StoreOrder {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub total_amount: f64,
    pub items_json: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
