//! Connection settings for the hosted Supabase project.
//!
//! # Environment Variables
//!
//! - `SUPABASE_URL`: base URL of the project (required)
//! - `SUPABASE_SERVICE_ROLE_KEY`: service-role API key (required)
//!
//! The service-role key bypasses row-level security and grants full access
//! to the store. It must stay on the backend and never reach a client.
//!
//! # Panics
//!
//! [`SupabaseConfig::from_env`] panics when either variable is missing, so a
//! misconfigured deployment fails at startup instead of at the first request.

use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: SecretString,
}

impl SupabaseConfig {
    pub fn from_env() -> Self {
        let url = env::var("SUPABASE_URL").expect("SUPABASE_URL must be set");
        let service_role_key =
            env::var("SUPABASE_SERVICE_ROLE_KEY").expect("SUPABASE_SERVICE_ROLE_KEY must be set");

        Self {
            url: url.trim_end_matches('/').to_string(),
            service_role_key: SecretString::from(service_role_key),
        }
    }
}
