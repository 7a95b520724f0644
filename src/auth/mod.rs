// ============================================================================
// Auth - delegated identity verification and route guards
// ============================================================================
//
// Identity lives with an external provider; this module only verifies the
// bearer token it issued and looks up the caller's role in the `users`
// collection. The verified principal is threaded into handlers as an
// explicit extractor argument, never as ambient state.
//
// ============================================================================

pub mod guard;
pub mod verifier;

pub use guard::{AdminUser, AuthUser};
pub use verifier::{AuthError, JwtVerifier, Principal, TokenVerifier};
