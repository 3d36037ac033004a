use axum::{routing::get, Router};
use crate::handlers::quotation::{create_quotation, get_quotation, list_quotations};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quotations", get(list_quotations).post(create_quotation))
        .route("/quotations/{id}", get(get_quotation))
}
