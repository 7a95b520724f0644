use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::auth::AuthUser;

use super::error::ApiError;
use super::AppState;

// ============================================================================
// Authenticated profile endpoints
// ============================================================================

pub async fn profile(
    state: web::Data<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<HttpResponse, ApiError> {
    let profile = state.users.profile(&principal.uid).await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub async fn register_initial(
    state: web::Data<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<HttpResponse, ApiError> {
    let created = state.users.register_initial(&principal).await?;
    let message = if created {
        "Profile created."
    } else {
        "Profile already exists."
    };
    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}
