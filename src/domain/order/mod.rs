// ============================================================================
// Order Domain - placement transaction and order reads
// ============================================================================

pub mod errors;
pub mod service;

// Re-export for convenience
pub use errors::*;
pub use service::*;
