use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::metrics::Metrics;
use crate::models::{Order, OrderItem, OrderStatus, Product, ResolvedOrderItem, Stored};
use crate::store::{DocumentStore, TxError, ORDERS, PRODUCTS};

use super::errors::OrderError;

// ============================================================================
// Order Service - placement transaction and user-scoped reads
// ============================================================================

/// Order submission payload, validated before any store access.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub shipping_address: serde_json::Value,
    pub items: Vec<OrderItem>,
}

pub struct OrderService {
    store: Arc<DocumentStore>,
    metrics: Arc<Metrics>,
}

impl OrderService {
    pub fn new(store: Arc<DocumentStore>, metrics: Arc<Metrics>) -> Self {
        Self { store, metrics }
    }

    /// Place an order for `user_id` as one atomic unit: validate every line
    /// item against committed state, decrement stock, compute the total and
    /// persist the order with status `pending`. All effects become visible
    /// together or not at all. Under contention the store's optimistic
    /// commit decides: first committed wins, the loser re-validates against
    /// the new state.
    ///
    /// Known limitation: a client that times out waiting for the response
    /// cannot roll back a commit that already happened server-side. The
    /// request/response boundary is at-most-once-commit over at-least-once
    /// request delivery.
    pub async fn place_order(
        &self,
        user_id: &str,
        request: CreateOrderRequest,
    ) -> Result<String, OrderError> {
        self.validate(&request)?;

        let started = Instant::now();
        let order_id = Uuid::new_v4().to_string();

        let result = self.store.run_transaction(|tx| {
            let mut total_amount = 0.0;
            let mut resolved_items = Vec::with_capacity(request.items.len());

            // Line items are checked in request order: the first violation
            // aborts the whole transaction.
            for item in &request.items {
                let mut product: Product = tx
                    .get(PRODUCTS, &item.product_id)?
                    .ok_or_else(|| OrderError::ProductNotFound(item.product_id.clone()))?;

                let available = product.stock.available(item.variant_type, item.size);
                if available < item.quantity {
                    return Err(OrderError::InsufficientStock {
                        product_id: item.product_id.clone(),
                        name: product.name.clone(),
                        variant: item.variant_type,
                        size: item.size,
                        requested: item.quantity,
                        available,
                    });
                }

                product
                    .stock
                    .set(item.variant_type, item.size, available - item.quantity);
                product.updated_at = Utc::now();
                tx.set(PRODUCTS, &item.product_id, &product)?;

                // Total from request-supplied prices, not current product
                // price; the display name is frozen at purchase time.
                total_amount += f64::from(item.quantity) * item.price;
                resolved_items.push(ResolvedOrderItem {
                    item: item.clone(),
                    product_name: product.name,
                });
            }

            let order = Order {
                user_id: user_id.to_string(),
                status: OrderStatus::Pending,
                total_amount,
                items: resolved_items,
                shipping_address: request.shipping_address.clone(),
                created_at: Utc::now(),
            };
            tx.set(ORDERS, &order_id, &order)?;

            Ok(())
        });

        let elapsed = started.elapsed().as_secs_f64();
        self.metrics.order_placement_duration.observe(elapsed);

        match result {
            Ok(()) => {
                self.metrics.orders_placed.inc();
                tracing::info!(
                    order_id = %order_id,
                    user_id = %user_id,
                    item_count = request.items.len(),
                    "✅ Order placed"
                );
                Ok(order_id)
            }
            Err(TxError::Aborted(e)) => {
                self.metrics.record_order_rejected(rejection_reason(&e));
                tracing::info!(user_id = %user_id, error = %e, "Order rejected");
                Err(e)
            }
            Err(TxError::Store(e)) => {
                self.metrics.record_order_rejected("transaction");
                // Store internals go to the log, not to the caller.
                tracing::error!(user_id = %user_id, error = %e, "Order transaction failed");
                Err(OrderError::Transaction(e))
            }
        }
    }

    /// The caller's orders, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Stored<Order>>, OrderError> {
        let mut orders: Vec<Stored<Order>> = self
            .store
            .list::<Order>(ORDERS)?
            .into_iter()
            .filter(|(_, order)| order.user_id == user_id)
            .map(|(id, doc)| Stored { id, doc })
            .collect();

        orders.sort_by(|a, b| b.doc.created_at.cmp(&a.doc.created_at));
        Ok(orders)
    }

    /// One order, visible only to its owner.
    pub async fn get(&self, order_id: &str, user_id: &str) -> Result<Stored<Order>, OrderError> {
        let order: Order = self
            .store
            .get(ORDERS, order_id)?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;

        if order.user_id != user_id {
            return Err(OrderError::NotOwner(order_id.to_string()));
        }

        Ok(Stored {
            id: order_id.to_string(),
            doc: order,
        })
    }

    /// Request-shape checks that run before any store access.
    fn validate(&self, request: &CreateOrderRequest) -> Result<(), OrderError> {
        if request.items.is_empty() {
            return Err(OrderError::EmptyItems);
        }
        for item in &request.items {
            if item.quantity == 0 {
                return Err(OrderError::InvalidQuantity {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                });
            }
        }
        Ok(())
    }
}

fn rejection_reason(e: &OrderError) -> &'static str {
    match e {
        OrderError::EmptyItems | OrderError::InvalidQuantity { .. } => "validation",
        OrderError::ProductNotFound(_) => "product_not_found",
        OrderError::InsufficientStock { .. } => "insufficient_stock",
        OrderError::OrderNotFound(_) | OrderError::NotOwner(_) => "not_available",
        OrderError::Transaction(_) => "transaction",
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
