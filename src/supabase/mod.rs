//! Typed client for the hosted Supabase platform.
//!
//! Identity lives in the platform's auth service (`/auth/v1`), data in its
//! REST layer over Postgres (`/rest/v1`). This module owns the single shared
//! [`reqwest::Client`] and the error taxonomy; the endpoint calls live in
//! [`auth`] and [`rest`].
//!
//! # Authentication
//!
//! Every request carries the project `apikey` header. Store requests
//! additionally authenticate as the service role, which bypasses row-level
//! security; token-validation requests authenticate as the caller instead.
//!
//! # Example
//!
//! ```rust,ignore
//! let supabase = SupabaseClient::new(&config)?;
//!
//! let subject = supabase.get_user(token).await?;
//! let profile: Profile = supabase
//!     .select_single("profiles", &[("id", "eq.<uuid>")])
//!     .await?;
//! ```

pub mod auth;
pub mod rest;

pub use auth::{AuthenticatedUser, Session, SignUpResponse};

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::config::supabase::SupabaseConfig;

/// Errors that can occur when talking to the hosted platform.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The identity provider rejected the presented credential.
    #[error("Unauthorized: credential rejected")]
    Unauthorized,

    /// A singular query matched no row.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to build a request.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Handle to the hosted platform, cheap to clone.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

#[derive(Debug)]
struct SupabaseClientInner {
    http: reqwest::Client,
    base_url: String,
    service_role_key: SecretString,
}

impl SupabaseClient {
    /// Create a client from the project settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the key is not
    /// a valid header value.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let mut headers = HeaderMap::new();

        let mut api_key = HeaderValue::from_str(config.service_role_key.expose_secret())
            .map_err(|e| SupabaseError::Parse(format!("invalid service role key: {e}")))?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                http,
                base_url: config.url.clone(),
                service_role_key: config.service_role_key.clone(),
            }),
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.inner.base_url, path)
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.inner.base_url, table)
    }

    pub(crate) fn service_role_key(&self) -> &str {
        self.inner.service_role_key.expose_secret()
    }
}
