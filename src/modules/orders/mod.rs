//! Orders module.
//!
//! Creating an order stores the order row and its lines; listing aggregates
//! the lines back onto each order. Customers only ever see their own orders,
//! admins see everything.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
