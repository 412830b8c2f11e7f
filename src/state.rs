use crate::config::cors::CorsConfig;
use crate::config::supabase::SupabaseConfig;
use crate::supabase::SupabaseClient;

/// Shared application state, cheap to clone into every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub supabase: SupabaseClient,
    pub cors_config: CorsConfig,
}

pub fn init_app_state() -> AppState {
    let supabase_config = SupabaseConfig::from_env();

    AppState {
        supabase: SupabaseClient::new(&supabase_config)
            .expect("Failed to build the Supabase client"),
        cors_config: CorsConfig::from_env(),
    }
}
