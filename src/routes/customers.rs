use axum::{routing::get, Router};
use crate::handlers::customer::{
    create_customer, delete_customer, get_customer, list_customers, update_customer,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}
