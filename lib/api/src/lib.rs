//! HTTP surface for platewise.
//!
//! The recommender is built before the server starts and shared read-only
//! across workers.

pub mod rest;

pub use rest::{configure_routes, RestApi};
