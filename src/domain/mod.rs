// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// One subdirectory per area of the storefront:
// - order:   the order placement transaction and user-scoped order reads
// - product: public catalog reads
// - admin:   product CRUD, order status transitions, sales analytics
// - user:    profile registration and lookup
//
// Each area ships a service over the shared document store plus its own
// error enum. The store infrastructure lives in `crate::store`.
//
// ============================================================================

pub mod admin;
pub mod order;
pub mod product;
pub mod user;
