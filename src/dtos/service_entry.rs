// src/dtos/service_entry.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::service_entry::ServiceEntryWithCustomer;

#[derive(Debug, Deserialize)]
pub struct ServiceEntryRequest {
    pub customer: Option<i64>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub call_for: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub amount: f64,
    pub notes: Option<String>,
}

fn default_status() -> String {
    "Followup".to_string()
}

#[derive(Debug, Serialize)]
pub struct ServiceEntryResponse {
    pub id: i64,
    pub customer: Option<i64>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub call_for: Option<String>,
    pub status: String,
    pub amount: f64,
    pub notes: Option<String>,
    pub created_on: DateTime<Utc>,
}

impl From<ServiceEntryWithCustomer> for ServiceEntryResponse {
    fn from(entry: ServiceEntryWithCustomer) -> Self {
        Self {
            id: entry.id,
            customer: entry.customer_id,
            customer_name: entry.customer_name,
            phone: entry.phone,
            address: entry.address,
            call_for: entry.call_for,
            status: entry.status,
            amount: entry.amount,
            notes: entry.notes,
            created_on: entry.created_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_followup() {
        let req: ServiceEntryRequest =
            serde_json::from_str(r#"{"customer": 4, "call_for": "AC installation"}"#).unwrap();

        assert_eq!(req.status, "Followup");
        assert_eq!(req.amount, 0.0);
    }
}
