// src/billing/pg.rs
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};

use super::store::{BillHeader, BillLine, BillingError, BillingStore, ProductStock};

/// `BillingStore` backed by a live Postgres transaction. The handler owns the
/// transaction and decides commit or rollback after the whole bill is processed.
pub struct PgBillingStore<'a, 'c> {
    tx: &'a mut Transaction<'c, Postgres>,
}

impl<'a, 'c> PgBillingStore<'a, 'c> {
    pub fn new(tx: &'a mut Transaction<'c, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl BillingStore for PgBillingStore<'_, '_> {
    async fn insert_bill(&mut self, header: &BillHeader) -> Result<i64, BillingError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO billing_history (bill_no, customer_id, total_amount, payment_mode)
             VALUES ($1, $2, $3::FLOAT8, $4)
             RETURNING id",
        )
        .bind(&header.bill_no)
        .bind(header.customer_id)
        .bind(header.total_amount)
        .bind(&header.payment_mode)
        .fetch_one(&mut **self.tx)
        .await
        .map_err(|e| {
            let code = e
                .as_database_error()
                .and_then(|db| db.code().map(|c| c.to_string()));
            match code.as_deref() {
                Some("23505") => BillingError::DuplicateBillNumber(header.bill_no.clone()),
                Some("23503") => {
                    BillingError::Validation("Referenced customer does not exist".into())
                }
                _ => BillingError::Store(e),
            }
        })?;

        Ok(id)
    }

    async fn product_for_sale(
        &mut self,
        product_id: i64,
    ) -> Result<Option<ProductStock>, BillingError> {
        // FOR UPDATE holds the row so a concurrent bill on the same product
        // waits until this transaction commits or rolls back.
        let product = sqlx::query_as::<_, ProductStock>(
            "SELECT id, product_name, (stock_qty)::FLOAT8 AS stock_qty
             FROM products
             WHERE id = $1
             FOR UPDATE",
        )
        .bind(product_id)
        .fetch_optional(&mut **self.tx)
        .await?;

        Ok(product)
    }

    async fn insert_bill_item(&mut self, bill_id: i64, line: &BillLine) -> Result<(), BillingError> {
        sqlx::query(
            "INSERT INTO bill_items (bill_id, product_id, qty, price, gst_percent)
             VALUES ($1, $2, $3::FLOAT8, $4::FLOAT8, $5::FLOAT8)",
        )
        .bind(bill_id)
        .bind(line.product_id)
        .bind(line.qty)
        .bind(line.price)
        .bind(line.gst_percent)
        .execute(&mut **self.tx)
        .await?;

        Ok(())
    }

    async fn update_product_stock(
        &mut self,
        product_id: i64,
        stock_qty: f64,
    ) -> Result<(), BillingError> {
        sqlx::query("UPDATE products SET stock_qty = $2::FLOAT8 WHERE id = $1")
            .bind(product_id)
            .bind(stock_qty)
            .execute(&mut **self.tx)
            .await?;

        Ok(())
    }
}
