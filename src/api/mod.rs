pub mod error;

mod admin;
mod auth;
mod orders;
mod products;

use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};

use crate::auth::TokenVerifier;
use crate::domain::admin::AdminService;
use crate::domain::order::OrderService;
use crate::domain::product::ProductService;
use crate::domain::user::UserService;
use crate::metrics::Metrics;
use crate::store::DocumentStore;

use error::ApiError;

// ============================================================================
// API - route wiring and shared application state
// ============================================================================

/// Shared state handed to every handler. Cheap to clone: everything is Arc'd.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn TokenVerifier>,
    pub metrics: Arc<Metrics>,
    pub orders: Arc<OrderService>,
    pub products: Arc<ProductService>,
    pub admin: Arc<AdminService>,
    pub users: Arc<UserService>,
}

impl AppState {
    pub fn new(
        store: Arc<DocumentStore>,
        verifier: Arc<dyn TokenVerifier>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            orders: Arc::new(OrderService::new(Arc::clone(&store), Arc::clone(&metrics))),
            products: Arc::new(ProductService::new(Arc::clone(&store))),
            admin: Arc::new(AdminService::new(Arc::clone(&store), Arc::clone(&metrics))),
            users: Arc::new(UserService::new(store)),
            verifier,
            metrics,
        }
    }
}

/// Wire every route of the service onto an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/products")
                    .route("", web::get().to(products::list))
                    .route("/slug/{slug}", web::get().to(products::get_by_slug))
                    .route("/{id}", web::get().to(products::get)),
            )
            .service(
                web::scope("/orders")
                    .route("", web::post().to(orders::create))
                    .route("", web::get().to(orders::list))
                    .route("/{id}", web::get().to(orders::get)),
            )
            .service(
                web::scope("/auth")
                    .route("/profile", web::get().to(auth::profile))
                    .route("/register-initial", web::post().to(auth::register_initial)),
            )
            .service(
                web::scope("/admin")
                    .route("/products", web::post().to(admin::create_product))
                    .route("/products/{id}", web::put().to(admin::update_product))
                    .route("/products/{id}", web::delete().to(admin::delete_product))
                    .route("/orders", web::get().to(admin::list_orders))
                    .route("/orders/{id}/status", web::put().to(admin::update_order_status))
                    .route("/analytics", web::get().to(admin::analytics)),
            ),
    )
    .route("/health", web::get().to(health))
    .route("/metrics", web::get().to(metrics));
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "kitstore",
    }))
}

async fn metrics(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let body = state
        .metrics
        .render()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body))
}

// ============================================================================
// Handler Tests
// ============================================================================
