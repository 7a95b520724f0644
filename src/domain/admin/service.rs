use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metrics::Metrics;
use crate::models::{Order, OrderStatus, Product, ProductVariant, Size, Stock, Stored};
use crate::store::{DocumentStore, StoreError, TxError, ORDERS, PRODUCTS};

// ============================================================================
// Admin Service - catalog management and storefront reporting
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Variants must carry public image URLs")]
    InvalidImages,

    #[error("Product {0} not found")]
    ProductNotFound(String),

    #[error("Order {0} not found")]
    OrderNotFound(String),

    #[error("Admin operation failed")]
    Store(StoreError),
}

impl From<StoreError> for AdminError {
    fn from(e: StoreError) -> Self {
        AdminError::Store(e)
    }
}

/// Payload for creating a product. Slug and timestamps are server-assigned.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub club: String,
    #[serde(default)]
    pub season: Option<String>,
    pub variants: Vec<ProductVariant>,
    pub sizes: Vec<Size>,
    pub stock: Stock,
}

/// Partial product update; absent fields are left as stored.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub club: Option<String>,
    pub season: Option<String>,
    pub variants: Option<Vec<ProductVariant>>,
    pub sizes: Option<Vec<Size>>,
    pub stock: Option<Stock>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TopProduct {
    pub name: String,
    pub quantity: u32,
}

/// Read-only fold over historical orders.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub total_sold_products: u32,
    #[serde(rename = "top5Products")]
    pub top5_products: Vec<TopProduct>,
}

pub struct AdminService {
    store: Arc<DocumentStore>,
    metrics: Arc<Metrics>,
}

impl AdminService {
    pub fn new(store: Arc<DocumentStore>, metrics: Arc<Metrics>) -> Self {
        Self { store, metrics }
    }

    /// Create a product. Every variant must carry at least one public image
    /// URL; the slug is generated from the name.
    pub async fn create_product(&self, dto: NewProduct) -> Result<String, AdminError> {
        if dto
            .variants
            .iter()
            .any(|v| v.images.is_empty() || v.images.iter().any(|url| !url.starts_with("http")))
        {
            return Err(AdminError::InvalidImages);
        }

        let now = Utc::now();
        let product = Product {
            slug: slugify(&dto.name),
            name: dto.name,
            description: dto.description,
            price: dto.price,
            club: dto.club,
            season: dto.season,
            variants: dto.variants,
            sizes: dto.sizes,
            stock: dto.stock,
            created_at: now,
            updated_at: now,
        };

        let id = Uuid::new_v4().to_string();
        self.store.insert(PRODUCTS, &id, &product)?;
        self.metrics.products_created.inc();

        tracing::info!(product_id = %id, slug = %product.slug, "✅ Product created");
        Ok(id)
    }

    /// Apply a partial update. Runs as a transaction so concurrent stock
    /// decrements from order placement are never overwritten blindly.
    pub async fn update_product(&self, id: &str, update: ProductUpdate) -> Result<(), AdminError> {
        let result = self.store.run_transaction(|tx| {
            let mut product: Product = tx
                .get(PRODUCTS, id)?
                .ok_or_else(|| AdminError::ProductNotFound(id.to_string()))?;

            let u = update.clone();
            if let Some(name) = u.name {
                product.name = name;
            }
            if let Some(description) = u.description {
                product.description = description;
            }
            if let Some(price) = u.price {
                product.price = price;
            }
            if let Some(club) = u.club {
                product.club = club;
            }
            if let Some(season) = u.season {
                product.season = Some(season);
            }
            if let Some(variants) = u.variants {
                product.variants = variants;
            }
            if let Some(sizes) = u.sizes {
                product.sizes = sizes;
            }
            if let Some(stock) = u.stock {
                product.stock = stock;
            }
            product.updated_at = Utc::now();

            tx.set(PRODUCTS, id, &product)?;
            Ok(())
        });

        match result {
            Ok(()) => {
                tracing::info!(product_id = %id, "Product updated");
                Ok(())
            }
            Err(TxError::Aborted(e)) => Err(e),
            Err(TxError::Store(e)) => Err(AdminError::Store(e)),
        }
    }

    /// Delete a product. Past orders keep their frozen name and price.
    pub async fn delete_product(&self, id: &str) -> Result<(), AdminError> {
        let existed = self.store.remove(PRODUCTS, id);
        tracing::info!(product_id = %id, existed, "Product deleted");
        Ok(())
    }

    /// Every order in the store, newest first.
    pub async fn list_orders(&self) -> Result<Vec<Stored<Order>>, AdminError> {
        let mut orders: Vec<Stored<Order>> = self
            .store
            .list::<Order>(ORDERS)?
            .into_iter()
            .map(|(id, doc)| Stored { id, doc })
            .collect();

        orders.sort_by(|a, b| b.doc.created_at.cmp(&a.doc.created_at));
        Ok(orders)
    }

    /// Administrative status transition.
    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<(), AdminError> {
        let result = self.store.run_transaction(|tx| {
            let mut order: Order = tx
                .get(ORDERS, id)?
                .ok_or_else(|| AdminError::OrderNotFound(id.to_string()))?;
            order.status = status;
            tx.set(ORDERS, id, &order)?;
            Ok(())
        });

        match result {
            Ok(()) => {
                self.metrics.record_status_update(status);
                tracing::info!(order_id = %id, ?status, "Order status updated");
                Ok(())
            }
            Err(TxError::Aborted(e)) => Err(e),
            Err(TxError::Store(e)) => Err(AdminError::Store(e)),
        }
    }

    /// Fold over all orders: counts, revenue, and the five best-selling
    /// name/size combinations. Grouping key is `"{name}-{size}"`, matching
    /// the storefront's reporting format.
    pub async fn analytics(&self) -> Result<Analytics, AdminError> {
        let orders = self.store.list::<Order>(ORDERS)?;

        let total_orders = orders.len();
        let mut total_revenue = 0.0;
        let mut total_sold_products = 0u32;
        let mut by_key: HashMap<String, u32> = HashMap::new();

        for (_, order) in &orders {
            total_revenue += order.total_amount;
            for line in &order.items {
                total_sold_products += line.item.quantity;
                let key = format!("{}-{}", line.product_name, line.item.size);
                *by_key.entry(key).or_insert(0) += line.item.quantity;
            }
        }

        let mut top: Vec<TopProduct> = by_key
            .into_iter()
            .map(|(name, quantity)| TopProduct { name, quantity })
            .collect();
        top.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name)));
        top.truncate(5);

        Ok(Analytics {
            total_orders,
            total_revenue: (total_revenue * 100.0).round() / 100.0,
            total_sold_products,
            top5_products: top,
        })
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================
