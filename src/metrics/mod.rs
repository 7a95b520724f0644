use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::models::OrderStatus;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Counters and histograms for the storefront's hot paths:
// - order placement (success, rejections by reason, duration)
// - catalog administration
//
// All metrics are registered with Prometheus and scraped via /metrics.
//
// ============================================================================

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    // Order Placement Metrics
    pub orders_placed: IntCounter,
    pub orders_rejected: IntCounterVec,
    pub order_placement_duration: Histogram,
    pub order_status_updates: IntCounterVec,

    // Catalog Metrics
    pub products_created: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_placed = IntCounter::new("orders_placed_total", "Total orders committed")?;
        registry.register(Box::new(orders_placed.clone()))?;

        let orders_rejected = IntCounterVec::new(
            Opts::new("orders_rejected_total", "Total rejected order requests"),
            &["reason"],
        )?;
        registry.register(Box::new(orders_rejected.clone()))?;

        let order_placement_duration = Histogram::with_opts(
            HistogramOpts::new(
                "order_placement_duration_seconds",
                "Order placement transaction duration",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        )?;
        registry.register(Box::new(order_placement_duration.clone()))?;

        let order_status_updates = IntCounterVec::new(
            Opts::new(
                "order_status_updates_total",
                "Administrative order status transitions",
            ),
            &["status"],
        )?;
        registry.register(Box::new(order_status_updates.clone()))?;

        let products_created =
            IntCounter::new("products_created_total", "Total products created")?;
        registry.register(Box::new(products_created.clone()))?;

        Ok(Self {
            registry,
            orders_placed,
            orders_rejected,
            order_placement_duration,
            order_status_updates,
            products_created,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        Ok(encoder.encode_to_string(&self.registry.gather())?)
    }

    /// Helper to record a rejected order request
    pub fn record_order_rejected(&self, reason: &str) {
        self.orders_rejected.with_label_values(&[reason]).inc();
    }

    /// Helper to record an administrative status transition
    pub fn record_status_update(&self, status: OrderStatus) {
        let label = match status {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        self.order_status_updates.with_label_values(&[label]).inc();
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(!metrics.registry.gather().is_empty());
    }

    #[test]
    fn test_record_order_outcomes() {
        let metrics = Metrics::new().unwrap();
        metrics.orders_placed.inc();
        metrics.record_order_rejected("insufficient_stock");
        metrics.record_order_rejected("insufficient_stock");

        let gathered = metrics.registry.gather();
        let placed = gathered
            .iter()
            .find(|m| m.name() == "orders_placed_total")
            .unwrap();
        assert_eq!(placed.metric[0].counter.value, Some(1.0));

        let rejected = gathered
            .iter()
            .find(|m| m.name() == "orders_rejected_total")
            .unwrap();
        assert_eq!(rejected.metric[0].counter.value, Some(2.0));
    }

    #[test]
    fn test_render_text_format() {
        let metrics = Metrics::new().unwrap();
        metrics.record_status_update(OrderStatus::Shipped);

        let text = metrics.render().unwrap();
        assert!(text.contains("order_status_updates_total"));
    }
}
