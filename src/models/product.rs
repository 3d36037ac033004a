use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Product {
    pub id: i64,
    pub product_id: Option<String>,
    pub product_name: String,
    pub selling_price_include_tax: f64,
    pub mrp: f64,
    pub gst_percent: f64,
    pub stock_qty: f64,
    pub unit_of_measurement: Option<String>,
}
