// ============================================================================
// User Domain - profile registration and lookup
// ============================================================================

pub mod service;

pub use service::*;
