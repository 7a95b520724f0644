// ============================================================================
// Admin Domain - product CRUD, order status transitions, analytics
// ============================================================================

pub mod service;

pub use service::*;
