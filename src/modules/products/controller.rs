use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateProductDto, Product, UpdateProductDto};
use super::service::ProductService;

/// List the product catalog
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "All products, lowest id first", body = Vec<Product>),
        (status = 500, description = "Store error", body = crate::modules::auth::controller::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_all_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductService::get_all_products(&state.supabase).await?;
    Ok(Json(products))
}

/// Fetch a single product
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product details", body = Product),
        (status = 404, description = "Product not found", body = crate::modules::auth::controller::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    let product = ProductService::get_product(&state.supabase, id).await?;
    Ok(Json(product))
}

/// Create a product (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 401, description = "Missing or invalid token", body = crate::modules::auth::controller::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::modules::auth::controller::ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateProductDto>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = ProductService::create_product(&state.supabase, dto).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product (admin only)
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 401, description = "Missing or invalid token", body = crate::modules::auth::controller::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::modules::auth::controller::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::modules::auth::controller::ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateProductDto>,
) -> Result<Json<Product>, AppError> {
    let product = ProductService::update_product(&state.supabase, id, dto).await?;
    Ok(Json(product))
}

/// Delete a product (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Missing or invalid token", body = crate::modules::auth::controller::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::modules::auth::controller::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::modules::auth::controller::ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    ProductService::delete_product(&state.supabase, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
