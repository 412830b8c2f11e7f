//! Middleware for request processing.
//!
//! # Modules
//!
//! - [`auth`]: credential resolver — turns a bearer token into a [`auth::CurrentUser`]
//! - [`role`]: role gate — restricts routes to a declared set of roles
//!
//! # Authorization flow
//!
//! 1. Client sends a request with an `Authorization: Bearer <token>` header
//! 2. [`auth::authenticate`] asks the identity provider to validate the token
//!    and loads the caller's profile record for the authoritative role
//! 3. [`role::require_roles`] (where declared) checks the resolved role
//!    against the route's required set
//! 4. The handler runs only if every step passed; any failure answers
//!    immediately with the `{ "error": ... }` envelope

pub mod auth;
pub mod role;
