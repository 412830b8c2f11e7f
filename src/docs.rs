use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, MeResponse, Profile, RegisterRequest, SessionResponse, UserRole,
};
use crate::modules::health::controller::HealthResponse;
use crate::modules::orders::model::{
    CreateOrderRequest, Order, OrderItem, OrderItemInput, OrderWithItems, ShippingInfo,
};
use crate::modules::products::model::{CreateProductDto, Product, UpdateProductDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::me,
        crate::modules::products::controller::get_all_products,
        crate::modules::products::controller::get_product,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
        crate::modules::orders::controller::create_order,
        crate::modules::orders::controller::get_orders,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            LoginRequest,
            RegisterRequest,
            SessionResponse,
            MeResponse,
            Profile,
            UserRole,
            Product,
            CreateProductDto,
            UpdateProductDto,
            Order,
            OrderItem,
            OrderItemInput,
            ShippingInfo,
            CreateOrderRequest,
            OrderWithItems,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Auth", description = "Login, registration and caller identity"),
        (name = "Products", description = "Product catalog management"),
        (name = "Orders", description = "Customer orders"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
