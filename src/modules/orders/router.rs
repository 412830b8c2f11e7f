use axum::{Router, middleware, routing::post};

use crate::middleware::auth::authenticate;
use crate::state::AppState;

use super::controller::{create_order, get_orders};

pub fn init_orders_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_order).get(get_orders))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
