//! Role gate for routes restricted to specific roles.
//!
//! Runs after the credential resolver and decides purely on the resolved
//! identity; there are no remote calls here. Roles are matched exactly:
//! `admin` does not satisfy a `customer` gate or vice versa.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::warn;

use crate::middleware::auth::CurrentUser;
use crate::modules::auth::model::UserRole;
use crate::utils::errors::AppError;

/// Allow the request iff the resolved identity holds one of `allowed_roles`.
///
/// # Usage with axum::middleware::from_fn
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/products", post(create_product))
///     .route_layer(middleware::from_fn(require_admin))
///     .route_layer(middleware::from_fn_with_state(state, authenticate));
/// ```
pub async fn require_roles(
    req: Request,
    next: Next,
    allowed_roles: Vec<UserRole>,
) -> Result<Response, AppError> {
    let Some(user) = req.extensions().get::<CurrentUser>() else {
        // The resolver did not run; a router wiring problem, not a client error.
        warn!("Role gate reached without a resolved identity");
        return Err(AppError::unauthorized("No autenticado"));
    };

    check_any_role(user, &allowed_roles)?;

    Ok(next.run(req).await)
}

/// Gate for admin-only routes.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    require_roles(req, next, vec![UserRole::Admin]).await
}

/// Membership predicate behind the gate.
pub fn check_any_role(user: &CurrentUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    if !allowed_roles.contains(&user.role) {
        return Err(AppError::forbidden("No tienes permisos para esta operación"));
    }

    Ok(())
}
