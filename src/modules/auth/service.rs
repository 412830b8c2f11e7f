use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::modules::auth::model::{
    LoginRequest, NewProfile, Profile, RegisterRequest, SessionResponse, UserRole,
};
use crate::supabase::{SupabaseClient, SupabaseError};
use crate::utils::errors::AppError;

pub struct AuthService;

impl AuthService {
    /// Load the access-control record for `user_id` from the store.
    ///
    /// This is the only place a caller's role may come from.
    pub async fn fetch_profile(
        supabase: &SupabaseClient,
        user_id: Uuid,
    ) -> Result<Profile, SupabaseError> {
        let id_filter = format!("eq.{user_id}");

        supabase
            .select_single(
                "profiles",
                &[("select", "id,email,role,name"), ("id", id_filter.as_str())],
            )
            .await
    }

    /// Sign the caller in against the identity provider and attach the
    /// durable profile record.
    #[instrument(skip(supabase, dto), fields(user.email = %dto.email))]
    pub async fn login(
        supabase: &SupabaseClient,
        dto: LoginRequest,
    ) -> Result<SessionResponse, AppError> {
        debug!("Signing in against the identity provider");

        let session = supabase
            .sign_in_with_password(&dto.email, &dto.password)
            .await
            .map_err(|e| {
                warn!(error = %e, "Identity provider rejected the credentials");
                AppError::unauthorized("Credenciales inválidas")
            })?;

        let profile = match Self::fetch_profile(supabase, session.user.id).await {
            Ok(profile) => profile,
            Err(SupabaseError::NotFound(_)) => {
                warn!(user.id = %session.user.id, "Valid credentials but no profile record");
                return Err(AppError::forbidden("Perfil no encontrado"));
            }
            Err(e) => {
                error!(user.id = %session.user.id, error = %e, "Failed to load profile during login");
                return Err(AppError::internal(anyhow::anyhow!("Error interno en login")));
            }
        };

        info!(user.id = %profile.id, user.role = %profile.role, "Login successful");

        Ok(SessionResponse {
            token: session.access_token,
            user: profile,
        })
    }

    /// Create the identity with the provider, store the `customer` profile
    /// and hand back a session.
    #[instrument(skip(supabase, dto), fields(user.email = %dto.email))]
    pub async fn register(
        supabase: &SupabaseClient,
        dto: RegisterRequest,
    ) -> Result<SessionResponse, AppError> {
        debug!("Creating identity with the provider");

        let signup = supabase
            .sign_up(&dto.email, &dto.password)
            .await
            .map_err(|e| {
                warn!(error = %e, "Identity provider refused the signup");
                AppError::bad_request(anyhow::anyhow!("No se pudo crear el usuario"))
            })?;

        let subject_id = signup.user().id;

        // New accounts always start as customers; promotion happens in the
        // store, never through this API.
        let new_profile = NewProfile {
            id: subject_id,
            email: dto.email.clone(),
            role: UserRole::Customer,
            name: dto.name,
        };

        let profile: Profile = supabase
            .insert_returning("profiles", &new_profile)
            .await
            .map_err(|e| {
                error!(user.id = %subject_id, error = %e, "Identity created but profile insert failed");
                AppError::internal(anyhow::anyhow!("Usuario creado, pero fallo al guardar perfil"))
            })?;

        // Some provider configurations withhold the session until the email
        // is confirmed; fall back to a fresh password sign-in.
        let token = match signup.access_token() {
            Some(token) => token.to_string(),
            None => {
                supabase
                    .sign_in_with_password(&dto.email, &dto.password)
                    .await
                    .map_err(|e| {
                        error!(user.id = %subject_id, error = %e, "No session after registration");
                        AppError::internal(anyhow::anyhow!("Usuario creado, pero sin sesión"))
                    })?
                    .access_token
            }
        };

        info!(user.id = %profile.id, "Registration successful");

        Ok(SessionResponse {
            token,
            user: profile,
        })
    }
}
