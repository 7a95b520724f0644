// ============================================================================
// Product Domain - public catalog reads
// ============================================================================

pub mod service;

pub use service::*;
