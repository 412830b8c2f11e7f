use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::auth::authenticate;
use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{
    create_product, delete_product, get_all_products, get_product, update_product,
};

/// Catalog reads are public; mutations require an authenticated admin.
pub fn init_products_router(state: AppState) -> Router<AppState> {
    // Layers run last-added first, so `authenticate` always precedes the gate.
    let admin_routes = Router::new()
        .route("/", post(create_product))
        .route("/{id}", put(update_product).delete(delete_product))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .route("/", get(get_all_products))
        .route("/{id}", get(get_product))
        .merge(admin_routes)
}
