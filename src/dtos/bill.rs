// src/dtos/bill.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::bill::{BillItemDetail, BillWithCustomer};

#[derive(Debug, Deserialize)]
pub struct CreateBillRequest {
    pub bill_no: String,
    pub customer: Option<i64>,
    pub total_amount: f64,
    /// Falls back to "CASH" when absent or null.
    #[serde(default)]
    pub payment_mode: Option<String>,
    pub items: Vec<BillItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct BillItemRequest {
    pub product_id: i64,
    pub qty: f64,
    pub price: f64,
    #[serde(default)]
    pub gst_percent: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct BillCreatedResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct BillResponse {
    pub id: i64,
    pub bill_no: String,
    pub customer: Option<i64>,
    pub customer_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub total_amount: f64,
    pub payment_mode: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<BillItemResponse>,
}

#[derive(Debug, Serialize)]
pub struct BillItemResponse {
    pub product_name: String,
    pub hsn_code: Option<String>,
    pub qty: f64,
    pub price: f64,
    pub gst_percent: f64,
}

impl BillResponse {
    pub fn from_rows(bill: BillWithCustomer, items: Vec<BillItemResponse>) -> Self {
        Self {
            id: bill.id,
            bill_no: bill.bill_no,
            customer: bill.customer_id,
            customer_name: bill.customer_name,
            address: bill.address,
            phone: bill.phone,
            total_amount: bill.total_amount,
            payment_mode: bill.payment_mode,
            created_at: bill.created_at,
            items,
        }
    }
}

impl From<BillItemDetail> for BillItemResponse {
    fn from(item: BillItemDetail) -> Self {
        Self {
            product_name: item.product_name,
            hsn_code: item.hsn_code,
            qty: item.qty,
            price: item.price,
            gst_percent: item.gst_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_mode_and_gst_default_when_absent() {
        let req: CreateBillRequest = serde_json::from_str(
            r#"{
                "bill_no": "INV-1",
                "total_amount": 250.0,
                "items": [{"product_id": 1, "qty": 2, "price": 125.0}]
            }"#,
        )
        .unwrap();

        assert_eq!(req.payment_mode, None);
        assert_eq!(req.customer, None);
        assert_eq!(req.items[0].gst_percent, None);
    }

    #[test]
    fn explicit_nulls_are_accepted() {
        let req: CreateBillRequest = serde_json::from_str(
            r#"{
                "bill_no": "INV-2",
                "customer": null,
                "total_amount": 100.0,
                "payment_mode": null,
                "items": [{"product_id": 3, "qty": 1, "price": 100.0, "gst_percent": null}]
            }"#,
        )
        .unwrap();

        assert_eq!(req.payment_mode, None);
        assert_eq!(req.items[0].gst_percent, None);
    }
}
