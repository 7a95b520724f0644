use crate::models::{Size, Variant};
use crate::store::StoreError;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order must contain at least one item")]
    EmptyItems,

    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: u32 },

    #[error("Product {0} does not exist")]
    ProductNotFound(String),

    #[error(
        "Insufficient stock for {name} ({variant}, {size}): requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: String,
        name: String,
        variant: Variant,
        size: Size,
        requested: u32,
        available: u32,
    },

    #[error("Order {0} does not exist")]
    OrderNotFound(String),

    #[error("Order {0} belongs to another user")]
    NotOwner(String),

    #[error("Order could not be committed")]
    Transaction(#[source] StoreError),
}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        OrderError::Transaction(e)
    }
}
