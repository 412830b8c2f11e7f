use axum::{Json, extract::State, http::StatusCode};
use utoipa::ToSchema;

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, MeResponse, RegisterRequest, SessionResponse};
use super::service::AuthService;

/// Error envelope shared by every endpoint.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "No profile record for the account", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let response = AuthService::login(&state.supabase, dto).await?;
    Ok(Json(response))
}

/// Register a new customer account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "The identity provider refused the signup", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let response = AuthService::register(&state.supabase, dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Identity of the current caller
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Resolved caller identity", body = MeResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "No profile record for the account", body = ErrorResponse)
    ),
    tag = "Auth",
    security(("bearer_auth" = []))
)]
pub async fn me(current_user: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: current_user.id,
        email: current_user.email,
        role: current_user.role,
    })
}
