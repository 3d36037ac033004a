// src/dtos/product.rs
use serde::{Deserialize, Serialize};

use crate::models::product::Product;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(default)]
    pub selling_price_include_tax: f64,
    #[serde(default)]
    pub mrp: f64,
    #[serde(default)]
    pub gst_percent: f64,
    #[serde(default)]
    pub stock_qty: f64,
    pub unit_of_measurement: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub selling_price_include_tax: Option<f64>,
    pub mrp: Option<f64>,
    pub gst_percent: Option<f64>,
    pub stock_qty: Option<f64>,
    pub unit_of_measurement: Option<String>,
}

/// One row of a spreadsheet import. Accepts both snake_case keys and the
/// column headers the front end forwards straight from the sheet.
#[derive(Debug, Deserialize)]
pub struct BulkImportProduct {
    #[serde(alias = "Product ID")]
    pub product_id: String,
    #[serde(alias = "Product Name")]
    pub product_name: String,
    #[serde(default, alias = "Sell Price", alias = "Selling Price")]
    pub selling_price_include_tax: Option<f64>,
    #[serde(default, alias = "MRP")]
    pub mrp: Option<f64>,
    #[serde(default, alias = "Tax %", alias = "GST%")]
    pub gst_percent: Option<f64>,
    #[serde(default, alias = "Stock Qty")]
    pub stock_qty: Option<f64>,
    #[serde(default, alias = "Unit of Measurement")]
    pub unit_of_measurement: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub product_id: Option<String>,
    pub product_name: String,
    pub selling_price_include_tax: f64,
    pub mrp: f64,
    pub gst_percent: f64,
    pub stock_qty: f64,
    pub unit_of_measurement: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            product_id: product.product_id,
            product_name: product.product_name,
            selling_price_include_tax: product.selling_price_include_tax,
            mrp: product.mrp,
            gst_percent: product.gst_percent,
            stock_qty: product.stock_qty,
            unit_of_measurement: product.unit_of_measurement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_import_accepts_spreadsheet_headers() {
        let row: BulkImportProduct = serde_json::from_str(
            r#"{
                "Product ID": "FAN-52",
                "Product Name": "Ceiling Fan 52in",
                "Sell Price": 1850.0,
                "Tax %": 18.0,
                "Stock Qty": 40
            }"#,
        )
        .unwrap();

        assert_eq!(row.product_id, "FAN-52");
        assert_eq!(row.selling_price_include_tax, Some(1850.0));
        assert_eq!(row.gst_percent, Some(18.0));
        assert_eq!(row.stock_qty, Some(40.0));
        assert_eq!(row.mrp, None);
    }
}
