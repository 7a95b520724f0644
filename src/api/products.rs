use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::error::ApiError;
use super::AppState;

// ============================================================================
// Public catalog endpoints
// ============================================================================

#[derive(Deserialize)]
pub struct CatalogQuery {
    club: Option<String>,
}

pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, ApiError> {
    let products = state.products.list(query.club.as_deref()).await?;
    Ok(HttpResponse::Ok().json(products))
}

pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let product = state.products.get(&path).await?;
    Ok(HttpResponse::Ok().json(product))
}

pub async fn get_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let product = state.products.get_by_slug(&path).await?;
    Ok(HttpResponse::Ok().json(product))
}
