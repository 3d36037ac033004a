use axum::{routing::get, Router};
use crate::handlers::bill::{create_bill, delete_bill, get_bill, list_bills};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bills", get(list_bills).post(create_bill))
        .route("/bills/{id}", get(get_bill).delete(delete_bill))
}
