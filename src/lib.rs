// ============================================================================
// kitstore - jersey storefront backend
// ============================================================================
//
// REST backend for a football-jersey storefront: a public catalog, user
// order placement backed by an atomic stock-decrement transaction against a
// document store, and an admin surface for catalog management, order status
// transitions and sales analytics.
//
// ============================================================================

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod models;
pub mod store;
