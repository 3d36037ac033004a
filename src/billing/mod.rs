// src/billing/mod.rs
//
// Bill creation is the one multi-row transaction in the system: the bill header,
// its line items, and the stock decrements must land together or not at all.
// The logic lives behind the `BillingStore` trait so it runs the same against a
// live Postgres transaction and against the in-memory double used in tests.

pub mod pg;
pub mod store;
pub mod transaction;

pub use pg::PgBillingStore;
pub use store::{BillHeader, BillLine, BillingError, BillingStore, ProductStock};
pub use transaction::post_bill;
