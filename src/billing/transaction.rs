// src/billing/transaction.rs
use super::store::{BillHeader, BillLine, BillingError, BillingStore};

/// Runs the bill creation transaction against `store`: insert the header, then
/// process each line strictly in input order (product lookup, stock check,
/// line insert, stock write-back). The write-back happens per line so a later
/// line on the same product sees the stock already taken by an earlier one.
///
/// The caller owns the transaction scope: commit on `Ok`, roll back on `Err`.
/// Nothing is retried and no partial result is reported; the first failure
/// aborts the whole bill.
pub async fn post_bill<S>(
    store: &mut S,
    header: &BillHeader,
    lines: &[BillLine],
) -> Result<i64, BillingError>
where
    S: BillingStore + Send,
{
    if lines.is_empty() {
        return Err(BillingError::Validation(
            "Bill must contain at least one item".into(),
        ));
    }

    let bill_id = store.insert_bill(header).await?;

    for line in lines {
        if !line.qty.is_finite() || line.qty <= 0.0 {
            return Err(BillingError::Validation(format!(
                "Invalid quantity for product {}",
                line.product_id
            )));
        }

        let product = store
            .product_for_sale(line.product_id)
            .await?
            .ok_or(BillingError::ProductNotFound(line.product_id))?;

        if line.qty > product.stock_qty {
            return Err(BillingError::InsufficientStock {
                product_name: product.product_name,
            });
        }

        store.insert_bill_item(bill_id, line).await?;
        store
            .update_product_stock(line.product_id, product.stock_qty - line.qty)
            .await?;
    }

    Ok(bill_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::store::ProductStock;
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, Default)]
    struct MemDb {
        products: BTreeMap<i64, ProductStock>,
        bills: Vec<StoredBill>,
        items: Vec<StoredItem>,
    }

    #[derive(Debug, Clone)]
    struct StoredBill {
        id: i64,
        bill_no: String,
    }

    #[derive(Debug, Clone)]
    struct StoredItem {
        bill_id: i64,
        product_id: i64,
        qty: f64,
    }

    /// Mirrors `pool.begin()` / `tx.commit()`: the transaction mutates a copy
    /// of the database and only overwrites the real state on commit. Dropping
    /// the transaction without committing discards every change.
    struct MemTx {
        db: MemDb,
    }

    impl MemDb {
        fn with_product(mut self, id: i64, name: &str, stock: f64) -> Self {
            self.products.insert(
                id,
                ProductStock {
                    id,
                    product_name: name.into(),
                    stock_qty: stock,
                },
            );
            self
        }

        fn begin(&self) -> MemTx {
            MemTx { db: self.clone() }
        }

        fn stock(&self, id: i64) -> f64 {
            self.products[&id].stock_qty
        }
    }

    impl MemTx {
        fn commit(self, db: &mut MemDb) {
            *db = self.db;
        }
    }

    #[async_trait]
    impl BillingStore for MemTx {
        async fn insert_bill(&mut self, header: &BillHeader) -> Result<i64, BillingError> {
            if self.db.bills.iter().any(|b| b.bill_no == header.bill_no) {
                return Err(BillingError::DuplicateBillNumber(header.bill_no.clone()));
            }
            let id = self.db.bills.len() as i64 + 1;
            self.db.bills.push(StoredBill {
                id,
                bill_no: header.bill_no.clone(),
            });
            Ok(id)
        }

        async fn product_for_sale(
            &mut self,
            product_id: i64,
        ) -> Result<Option<ProductStock>, BillingError> {
            Ok(self.db.products.get(&product_id).cloned())
        }

        async fn insert_bill_item(
            &mut self,
            bill_id: i64,
            line: &BillLine,
        ) -> Result<(), BillingError> {
            self.db.items.push(StoredItem {
                bill_id,
                product_id: line.product_id,
                qty: line.qty,
            });
            Ok(())
        }

        async fn update_product_stock(
            &mut self,
            product_id: i64,
            stock_qty: f64,
        ) -> Result<(), BillingError> {
            self.db
                .products
                .get_mut(&product_id)
                .expect("stock update for product that was never read")
                .stock_qty = stock_qty;
            Ok(())
        }
    }

    fn header(bill_no: &str) -> BillHeader {
        BillHeader {
            bill_no: bill_no.into(),
            customer_id: None,
            total_amount: 100.0,
            payment_mode: "CASH".into(),
        }
    }

    fn line(product_id: i64, qty: f64) -> BillLine {
        BillLine {
            product_id,
            qty,
            price: 10.0,
            gst_percent: 0.0,
        }
    }

    /// Handler-shaped driver: commit on success, drop the transaction (and all
    /// of its changes) on failure.
    async fn run(
        db: &mut MemDb,
        header: &BillHeader,
        lines: &[BillLine],
    ) -> Result<i64, BillingError> {
        let mut tx = db.begin();
        let id = post_bill(&mut tx, header, lines).await?;
        tx.commit(db);
        Ok(id)
    }

    #[tokio::test]
    async fn exact_stock_sells_out_to_zero() {
        let mut db = MemDb::default().with_product(1, "Ceiling Fan", 10.0);

        let id = run(&mut db, &header("INV-1"), &[line(1, 10.0)]).await.unwrap();

        assert_eq!(id, 1);
        assert_eq!(db.stock(1), 0.0);
        assert_eq!(db.bills.len(), 1);
        assert_eq!(db.bills[0].id, id);
        assert_eq!(db.items.len(), 1);
        assert_eq!(db.items[0].qty, 10.0);
    }

    #[tokio::test]
    async fn oversell_fails_and_persists_nothing() {
        let mut db = MemDb::default().with_product(1, "Ceiling Fan", 5.0);

        let err = run(&mut db, &header("INV-1"), &[line(1, 6.0)]).await.unwrap_err();

        assert_eq!(err.to_string(), "Insufficient stock for Ceiling Fan");
        assert_eq!(db.stock(1), 5.0);
        assert!(db.bills.is_empty());
        assert!(db.items.is_empty());
    }

    #[tokio::test]
    async fn unknown_product_aborts_even_after_valid_lines() {
        let mut db = MemDb::default().with_product(1, "Ceiling Fan", 10.0);

        let err = run(&mut db, &header("INV-1"), &[line(1, 2.0), line(99, 1.0)])
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::ProductNotFound(99)));
        assert_eq!(db.stock(1), 10.0);
        assert!(db.bills.is_empty());
        assert!(db.items.is_empty());
    }

    #[tokio::test]
    async fn second_line_sees_first_lines_decrement() {
        // stock covers q1 + q2 exactly
        let mut db = MemDb::default().with_product(1, "Ceiling Fan", 7.0);
        run(&mut db, &header("INV-1"), &[line(1, 3.0), line(1, 4.0)])
            .await
            .unwrap();
        assert_eq!(db.stock(1), 0.0);

        // one unit short: the second line must fail and take the first down with it
        let mut db = MemDb::default().with_product(1, "Ceiling Fan", 6.0);
        let err = run(&mut db, &header("INV-2"), &[line(1, 3.0), line(1, 4.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, BillingError::InsufficientStock { .. }));
        assert_eq!(db.stock(1), 6.0);
        assert!(db.items.is_empty());
    }

    #[tokio::test]
    async fn duplicate_bill_no_has_no_side_effects() {
        let mut db = MemDb::default().with_product(1, "Ceiling Fan", 10.0);
        run(&mut db, &header("INV-1"), &[line(1, 2.0)]).await.unwrap();

        let err = run(&mut db, &header("INV-1"), &[line(1, 2.0)]).await.unwrap_err();

        assert!(matches!(err, BillingError::DuplicateBillNumber(_)));
        assert_eq!(db.stock(1), 8.0);
        assert_eq!(db.bills.len(), 1);
        assert_eq!(db.items.len(), 1);
    }

    #[tokio::test]
    async fn items_persist_in_input_order() {
        let mut db = MemDb::default()
            .with_product(1, "Ceiling Fan", 10.0)
            .with_product(2, "Table Lamp", 10.0);

        run(&mut db, &header("INV-1"), &[line(2, 1.0), line(1, 1.0)])
            .await
            .unwrap();

        let order: Vec<i64> = db.items.iter().map(|i| i.product_id).collect();
        assert_eq!(order, vec![2, 1]);
        assert!(db.items.iter().all(|i| i.bill_id == 1));
    }

    #[tokio::test]
    async fn empty_bill_is_rejected() {
        let mut db = MemDb::default();

        let err = run(&mut db, &header("INV-1"), &[]).await.unwrap_err();

        assert!(matches!(err, BillingError::Validation(_)));
        assert!(db.bills.is_empty());
    }

    #[tokio::test]
    async fn nonpositive_quantity_is_rejected() {
        let mut db = MemDb::default().with_product(1, "Ceiling Fan", 10.0);

        for bad_qty in [0.0, -1.0, f64::NAN] {
            let err = run(&mut db, &header("INV-1"), &[line(1, bad_qty)])
                .await
                .unwrap_err();
            assert!(matches!(err, BillingError::Validation(_)));
        }

        assert_eq!(db.stock(1), 10.0);
        assert!(db.bills.is_empty());
    }
}
