use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::auth::AuthUser;
use crate::domain::order::CreateOrderRequest;

use super::error::ApiError;
use super::AppState;

// ============================================================================
// Authenticated order endpoints
// ============================================================================

pub async fn create(
    state: web::Data<AppState>,
    AuthUser(principal): AuthUser,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    let order_id = state
        .orders
        .place_order(&principal.uid, body.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": order_id,
        "message": "Order placed successfully.",
    })))
}

pub async fn list(
    state: web::Data<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<HttpResponse, ApiError> {
    let orders = state.orders.list_for_user(&principal.uid).await?;
    Ok(HttpResponse::Ok().json(orders))
}

pub async fn get(
    state: web::Data<AppState>,
    AuthUser(principal): AuthUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let order = state.orders.get(&path, &principal.uid).await?;
    Ok(HttpResponse::Ok().json(order))
}
