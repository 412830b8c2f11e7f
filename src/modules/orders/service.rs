use std::collections::HashMap;

use tracing::{debug, error, info, instrument};

use crate::middleware::auth::CurrentUser;
use crate::modules::orders::model::{
    CreateOrderRequest, NewOrder, NewOrderItem, Order, OrderItem, OrderItemInput, OrderWithItems,
};
use crate::supabase::SupabaseClient;
use crate::utils::errors::AppError;

pub struct OrderService;

impl OrderService {
    /// Store a new order with its lines for `user`.
    #[instrument(skip(supabase, dto), fields(user.id = %user.id, items = dto.items.len()))]
    pub async fn create_order(
        supabase: &SupabaseClient,
        user: &CurrentUser,
        dto: CreateOrderRequest,
    ) -> Result<OrderWithItems, AppError> {
        let total = order_total(&dto.items);
        debug!(total = %total, "Creating order");

        let shipping = dto.shipping.unwrap_or_default();
        let new_order = NewOrder {
            user_id: user.id,
            total,
            shipping_name: shipping.name,
            shipping_email: shipping.email,
            shipping_address: shipping.address,
        };

        let order: Order = supabase
            .insert_returning("orders", &new_order)
            .await
            .map_err(|e| {
                error!(error = %e, "Store error creating order");
                AppError::internal(anyhow::anyhow!("Error creando orden"))
            })?;

        let rows: Vec<NewOrderItem> = dto
            .items
            .into_iter()
            .map(|item| NewOrderItem {
                order_id: order.id,
                product_id: item.id,
                name: item.name,
                price: item.price,
                quantity: item.qty,
            })
            .collect();

        let items: Vec<OrderItem> = supabase
            .insert_many_returning("order_items", &rows)
            .await
            .map_err(|e| {
                error!(order.id = %order.id, error = %e, "Order stored but item insert failed");
                AppError::internal(anyhow::anyhow!("Orden creada, pero fallo al guardar items"))
            })?;

        info!(order.id = %order.id, total = %order.total, "Order created");

        Ok(OrderWithItems { order, items })
    }

    /// Orders visible to `user`: admins see every order, customers only
    /// their own.
    #[instrument(skip(supabase, user), fields(user.id = %user.id, user.role = %user.role))]
    pub async fn get_orders(
        supabase: &SupabaseClient,
        user: &CurrentUser,
    ) -> Result<Vec<OrderWithItems>, AppError> {
        let user_filter = format!("eq.{}", user.id);
        let mut query: Vec<(&str, &str)> = vec![("select", "*"), ("order", "created_at.desc")];
        if !user.is_admin() {
            query.push(("user_id", user_filter.as_str()));
        }

        let orders: Vec<Order> = supabase.select("orders", &query).await.map_err(|e| {
            error!(error = %e, "Store error fetching orders");
            AppError::internal(anyhow::anyhow!("Error obteniendo órdenes"))
        })?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        // One bulk fetch for the lines of every visible order.
        let ids = orders
            .iter()
            .map(|order| order.id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let id_filter = format!("in.({ids})");

        let items: Vec<OrderItem> = supabase
            .select(
                "order_items",
                &[("select", "*"), ("order_id", id_filter.as_str())],
            )
            .await
            .map_err(|e| {
                error!(error = %e, "Store error fetching order items");
                AppError::internal(anyhow::anyhow!("Error obteniendo items de órdenes"))
            })?;

        let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for item in items {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let result: Vec<OrderWithItems> = orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, items }
            })
            .collect();

        debug!(count = result.len(), "Orders fetched");

        Ok(result)
    }
}

/// Total of a cart: Σ price × quantity.
pub(crate) fn order_total(items: &[OrderItemInput]) -> f64 {
    items
        .iter()
        .map(|item| item.price * f64::from(item.qty))
        .sum()
}
