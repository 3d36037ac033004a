// src/billing/store.rs
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Bill number '{0}' already exists")]
    DuplicateBillNumber(String),
    #[error("Product {0} not found")]
    ProductNotFound(i64),
    #[error("Insufficient stock for {product_name}")]
    InsufficientStock { product_name: String },
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Bill header as submitted by the caller. `total_amount` is taken as given and
/// not recomputed from the lines.
#[derive(Debug, Clone)]
pub struct BillHeader {
    pub bill_no: String,
    pub customer_id: Option<i64>,
    pub total_amount: f64,
    pub payment_mode: String,
}

/// One requested line. `price` and `gst_percent` are snapshots supplied at sale
/// time, not re-read from the product.
#[derive(Debug, Clone)]
pub struct BillLine {
    pub product_id: i64,
    pub qty: f64,
    pub price: f64,
    pub gst_percent: f64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductStock {
    pub id: i64,
    pub product_name: String,
    pub stock_qty: f64,
}

/// Storage operations the bill transaction needs. Every method runs inside the
/// caller's transaction scope; nothing is visible to other requests until the
/// caller commits.
#[async_trait]
pub trait BillingStore {
    /// Inserts the bill header and returns its id. A `bill_no` uniqueness
    /// violation surfaces as `DuplicateBillNumber`.
    async fn insert_bill(&mut self, header: &BillHeader) -> Result<i64, BillingError>;

    /// Reads a product's name and current stock, holding it against concurrent
    /// writers for the rest of the transaction.
    async fn product_for_sale(&mut self, product_id: i64)
        -> Result<Option<ProductStock>, BillingError>;

    async fn insert_bill_item(&mut self, bill_id: i64, line: &BillLine)
        -> Result<(), BillingError>;

    async fn update_product_stock(&mut self, product_id: i64, stock_qty: f64)
        -> Result<(), BillingError>;
}
