//! Authentication module: login, registration and the caller identity
//! endpoint.
//!
//! Credentials live entirely with the identity provider; this module only
//! orchestrates the remote calls and keeps the `profiles` record in step.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
