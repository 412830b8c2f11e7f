use axum::{Json, extract::State, http::StatusCode};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateOrderRequest, OrderWithItems};
use super::service::OrderService;

/// Place an order for the current caller
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order stored with its items", body = OrderWithItems),
        (status = 401, description = "Missing or invalid token", body = crate::modules::auth::controller::ErrorResponse),
        (status = 422, description = "The order has no items", body = crate::modules::auth::controller::ErrorResponse),
        (status = 500, description = "Store error", body = crate::modules::auth::controller::ErrorResponse)
    ),
    tag = "Orders",
    security(("bearer_auth" = []))
)]
pub async fn create_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderWithItems>), AppError> {
    let order = OrderService::create_order(&state.supabase, &current_user, dto).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders visible to the current caller
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Own orders for customers, all orders for admins", body = Vec<OrderWithItems>),
        (status = 401, description = "Missing or invalid token", body = crate::modules::auth::controller::ErrorResponse),
        (status = 500, description = "Store error", body = crate::modules::auth::controller::ErrorResponse)
    ),
    tag = "Orders",
    security(("bearer_auth" = []))
)]
pub async fn get_orders(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<OrderWithItems>>, AppError> {
    let orders = OrderService::get_orders(&state.supabase, &current_user).await?;
    Ok(Json(orders))
}
