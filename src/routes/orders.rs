use axum::{routing::get, Router};
use crate::handlers::order::{list_orders, place_order};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/orders", get(list_orders).post(place_order))
}
