use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers::service_entry::{
    bulk_create, create_service, delete_service, get_service, list_services, update_service,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services).post(create_service))
        .route("/services/bulk_create", post(bulk_create))
        .route(
            "/services/{id}",
            get(get_service).put(update_service).delete(delete_service),
        )
}
