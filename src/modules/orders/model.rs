use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An order row from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    pub user_id: Uuid,
    pub total: f64,
    pub shipping_name: Option<String>,
    pub shipping_email: Option<String>,
    pub shipping_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A line inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    /// Product id, when the line still references a catalog entry.
    pub product_id: Option<i64>,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

/// An order with its lines attached.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Cart line as submitted by the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemInput {
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
    pub qty: i32,
}

/// Shipping details captured at checkout.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ShippingInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "La orden debe tener items"))]
    pub items: Vec<OrderItemInput>,
    pub shipping: Option<ShippingInfo>,
}

/// Order row as sent to the store.
#[derive(Debug, Serialize)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub total: f64,
    pub shipping_name: Option<String>,
    pub shipping_email: Option<String>,
    pub shipping_address: Option<String>,
}

/// Order line as sent to the store.
#[derive(Debug, Serialize)]
pub struct NewOrderItem {
    pub order_id: i64,
    pub product_id: Option<i64>,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}
