use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::modules::auth::model::UserRole;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::supabase::SupabaseError;
use crate::utils::errors::AppError;

/// Identity resolved for the current request.
///
/// Built once per request and immutable afterwards. The role always comes
/// from the caller's durable profile record, never from anything the client
/// sent.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Resolve the caller behind the `Authorization: Bearer <token>` header.
///
/// Two sequential remote calls: the identity provider validates the token,
/// then the `profiles` table supplies the authoritative role. Either step
/// failing ends the request here; nothing is retried.
async fn resolve_current_user(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<CurrentUser, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Token no enviado"))?;

    let subject = state.supabase.get_user(token).await.map_err(|e| {
        warn!(error = %e, "Identity provider rejected the bearer token");
        AppError::unauthorized("Token inválido")
    })?;

    let profile = match AuthService::fetch_profile(&state.supabase, subject.id).await {
        Ok(profile) => profile,
        Err(SupabaseError::NotFound(_)) => {
            // Valid credential but no access-control record yet.
            warn!(user.id = %subject.id, "No profile record for authenticated subject");
            return Err(AppError::forbidden("Perfil no encontrado"));
        }
        Err(e) => {
            error!(user.id = %subject.id, error = %e, "Failed to load profile during authorization");
            return Err(AppError::internal(anyhow::anyhow!("Error interno")));
        }
    };

    Ok(CurrentUser {
        id: profile.id,
        email: profile.email,
        role: profile.role,
    })
}

/// Middleware that resolves the caller identity before the inner service
/// runs. On success the identity is stored in the request extensions, where
/// role gates and the [`CurrentUser`] extractor find it.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = resolve_current_user(req.headers(), &state).await?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Reuse the identity when the middleware already ran.
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user = resolve_current_user(&parts.headers, state).await?;
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
