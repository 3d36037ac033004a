use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Bill header joined with its (optional) customer, as read for history views.
#[derive(Debug, FromRow)]
pub struct BillWithCustomer {
    pub id: i64,
    pub bill_no: String,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub total_amount: f64,
    pub payment_mode: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct BillItemDetail {
    pub bill_id: i64,
    pub product_name: String,
    pub hsn_code: Option<String>,
    pub qty: f64,
    pub price: f64,
    pub gst_percent: f64,
}
