use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AdminUser;
use crate::domain::admin::{NewProduct, ProductUpdate};
use crate::models::OrderStatus;

use super::error::ApiError;
use super::AppState;

// ============================================================================
// Admin endpoints - gated on the admin role
// ============================================================================

pub async fn create_product(
    state: web::Data<AppState>,
    _admin: AdminUser,
    body: web::Json<NewProduct>,
) -> Result<HttpResponse, ApiError> {
    let id = state.admin.create_product(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "id": id,
        "message": "Product created successfully.",
    })))
}

pub async fn update_product(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<ProductUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    state.admin.update_product(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "id": id,
        "message": "Product updated.",
    })))
}

pub async fn delete_product(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state.admin.delete_product(&path).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Product deleted successfully.",
    })))
}

pub async fn list_orders(
    state: web::Data<AppState>,
    _admin: AdminUser,
) -> Result<HttpResponse, ApiError> {
    let orders = state.admin.list_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    status: OrderStatus,
}

pub async fn update_order_status(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    state.admin.update_order_status(&id, body.status).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Order {id} status updated."),
    })))
}

pub async fn analytics(
    state: web::Data<AppState>,
    _admin: AdminUser,
) -> Result<HttpResponse, ApiError> {
    let analytics = state.admin.analytics().await?;
    Ok(HttpResponse::Ok().json(analytics))
}
