//! Identity provider endpoints.
//!
//! The provider owns the whole credential lifecycle; this service only hands
//! tokens back and forth. Token validation is a remote call, there is no
//! local signature check.

use serde::Deserialize;
use uuid::Uuid;

use super::{SupabaseClient, SupabaseError};

/// Subject descriptor returned by the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
}

/// A session issued by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: AuthenticatedUser,
}

/// Response of a signup call.
///
/// The provider returns a full session when email confirmation is disabled
/// and a bare user while confirmation is pending.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    UserOnly(AuthenticatedUser),
}

impl SignUpResponse {
    pub fn user(&self) -> &AuthenticatedUser {
        match self {
            Self::Session(session) => &session.user,
            Self::UserOnly(user) => user,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        match self {
            Self::Session(session) => Some(&session.access_token),
            Self::UserOnly(_) => None,
        }
    }
}

/// Error body shapes the provider uses across endpoints.
#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl SupabaseClient {
    /// Exchange email/password credentials for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SupabaseError> {
        let response = self
            .http()
            .post(self.auth_url("/token"))
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::handle_auth_response(response).await
    }

    /// Create a new identity with the provider.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignUpResponse, SupabaseError> {
        let response = self
            .http()
            .post(self.auth_url("/signup"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::handle_auth_response(response).await
    }

    /// Validate an opaque bearer token, returning the subject it belongs to.
    pub async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, SupabaseError> {
        let response = self
            .http()
            .get(self.auth_url("/user"))
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::handle_auth_response(response).await
    }

    async fn handle_auth_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<AuthErrorBody>()
            .await
            .ok()
            .and_then(|body| body.msg.or(body.message).or(body.error_description))
            .unwrap_or_else(|| status.to_string());

        if status.is_client_error() {
            return Err(SupabaseError::Unauthorized);
        }

        Err(SupabaseError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_response_with_session() {
        let raw = serde_json::json!({
            "access_token": "tok-1",
            "token_type": "bearer",
            "user": { "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "email": "ana@test.com" }
        });

        let parsed: SignUpResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.access_token(), Some("tok-1"));
        assert_eq!(parsed.user().email, "ana@test.com");
    }

    #[test]
    fn signup_response_with_pending_confirmation() {
        let raw = serde_json::json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "aud": "authenticated",
            "email": "ana@test.com"
        });

        let parsed: SignUpResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.access_token(), None);
        assert_eq!(parsed.user().email, "ana@test.com");
    }
}
