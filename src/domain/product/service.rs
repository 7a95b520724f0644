use std::sync::Arc;

use crate::models::{Product, Stored};
use crate::store::{DocumentStore, StoreError, PRODUCTS};

// ============================================================================
// Product Service - public catalog reads
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(String),

    #[error("Catalog read failed")]
    Store(#[from] StoreError),
}

pub struct ProductService {
    store: Arc<DocumentStore>,
}

impl ProductService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// All products, optionally filtered by club.
    pub async fn list(&self, club: Option<&str>) -> Result<Vec<Stored<Product>>, ProductError> {
        let mut products: Vec<Stored<Product>> = self
            .store
            .list::<Product>(PRODUCTS)?
            .into_iter()
            .filter(|(_, product)| club.map_or(true, |c| product.club == c))
            .map(|(id, doc)| Stored { id, doc })
            .collect();

        products.sort_by(|a, b| a.doc.name.cmp(&b.doc.name));
        Ok(products)
    }

    pub async fn get(&self, id: &str) -> Result<Stored<Product>, ProductError> {
        let product: Product = self
            .store
            .get(PRODUCTS, id)?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        Ok(Stored {
            id: id.to_string(),
            doc: product,
        })
    }

    /// First product whose slug matches.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Stored<Product>, ProductError> {
        self.store
            .list::<Product>(PRODUCTS)?
            .into_iter()
            .find(|(_, product)| product.slug == slug)
            .map(|(id, doc)| Stored { id, doc })
            .ok_or_else(|| ProductError::NotFound(slug.to_string()))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Size, Stock, Variant};
    use chrono::Utc;

    fn seed(store: &DocumentStore, id: &str, name: &str, club: &str) {
        let now = Utc::now();
        let mut stock = Stock::new();
        stock.set(Variant::Home, Size::M, 1);
        let product = Product {
            name: name.to_string(),
            description: String::new(),
            price: 80.0,
            club: club.to_string(),
            season: Some("24/25".into()),
            variants: vec![],
            sizes: vec![Size::M],
            stock,
            slug: name.to_lowercase().replace(' ', "-"),
            created_at: now,
            updated_at: now,
        };
        store.insert(PRODUCTS, id, &product).unwrap();
    }

    #[tokio::test]
    async fn test_list_unfiltered_and_by_club() {
        let store = Arc::new(DocumentStore::new());
        seed(&store, "p1", "Alpha Home", "Alpha FC");
        seed(&store, "p2", "Beta Home", "Beta FC");
        let service = ProductService::new(store);

        assert_eq!(service.list(None).await.unwrap().len(), 2);

        let filtered = service.list(Some("Beta FC")).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].doc.name, "Beta Home");

        assert!(service.list(Some("Gamma FC")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_and_missing() {
        let store = Arc::new(DocumentStore::new());
        seed(&store, "p1", "Alpha Home", "Alpha FC");
        let service = ProductService::new(store);

        let found = service.get("p1").await.unwrap();
        assert_eq!(found.id, "p1");
        assert_eq!(found.doc.club, "Alpha FC");

        assert!(matches!(
            service.get("nope").await.unwrap_err(),
            ProductError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_get_by_slug() {
        let store = Arc::new(DocumentStore::new());
        seed(&store, "p1", "Alpha Home", "Alpha FC");
        let service = ProductService::new(store);

        let found = service.get_by_slug("alpha-home").await.unwrap();
        assert_eq!(found.id, "p1");

        assert!(matches!(
            service.get_by_slug("missing-slug").await.unwrap_err(),
            ProductError::NotFound(_)
        ));
    }
}
