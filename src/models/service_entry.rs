use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct ServiceEntryWithCustomer {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub call_for: Option<String>,
    pub status: String,
    pub amount: f64,
    pub notes: Option<String>,
    pub created_on: DateTime<Utc>,
}
