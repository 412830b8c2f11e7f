//! # lvlup API
//!
//! REST backend for the lvlup gamer store, built with Rust and Axum on top
//! of a hosted Supabase project. Identity (signup, login, token validation)
//! lives in the platform's auth service; data lives in its REST layer over
//! Postgres. The backend's own job is authorization: resolving the caller
//! behind a bearer token and gating mutating routes by role.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/           # Environment-driven configuration (server, CORS, Supabase)
//! ├── supabase/         # Typed client for the hosted platform (auth + store)
//! ├── middleware/       # Credential resolver and role gate
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login, registration, caller identity
//! │   ├── health/      # Liveness endpoint
//! │   ├── products/    # Public catalog, admin-gated mutations
//! │   └── orders/      # Order creation and role-scoped listing
//! └── utils/           # Shared utilities (error envelope)
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: business logic against the hosted store
//! - `model.rs`: data models and DTOs
//! - `router.rs`: Axum router configuration
//!
//! ## Authorization
//!
//! Every protected route runs two ordered steps before its handler:
//!
//! 1. **Credential resolver** — validates the `Authorization: Bearer <token>`
//!    header with the identity provider, then loads the caller's durable
//!    profile record (`profiles` table) for the authoritative role.
//! 2. **Role gate** (where declared) — allows the request iff the resolved
//!    role is in the route's required set. Roles are `customer` and `admin`,
//!    matched exactly with no hierarchy.
//!
//! Either step failing answers immediately with `{ "error": <message> }`
//! (401 for credential problems, 403 for missing or insufficient role) and
//! the handler never runs.
//!
//! ## Environment Variables
//!
//! ```bash
//! SUPABASE_URL=https://<project>.supabase.co
//! SUPABASE_SERVICE_ROLE_KEY=<service-role-key>
//! PORT=3001
//! ALLOWED_ORIGINS=http://localhost:5173,http://localhost:3000
//! ```
//!
//! ## API Documentation
//!
//! When the server is running, API documentation is available at:
//!
//! - Swagger UI: `http://localhost:3001/swagger-ui`
//! - Scalar: `http://localhost:3001/scalar`
//!
//! ## Security Considerations
//!
//! - The service-role key bypasses the store's row-level security; it stays
//!   on the backend and is wrapped in a [`secrecy`] secret.
//! - Roles are only ever read from the `profiles` table; nothing the client
//!   sends can influence the resolved role.
//! - Admin accounts are promoted directly in the store, never through this
//!   API.

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod supabase;
pub mod utils;
pub mod validator;
