pub mod bills;
pub mod customers;
pub mod orders;
pub mod products;
pub mod quotations;
pub mod services;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(customers::routes())
        .merge(bills::routes())
        .merge(quotations::routes())
        .merge(services::routes())
        .merge(orders::routes())
}
