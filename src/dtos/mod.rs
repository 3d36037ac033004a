pub mod bill;
pub mod customer;
pub mod order;
pub mod product;
pub mod quotation;
pub mod service_entry;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
