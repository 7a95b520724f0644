use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::models::Role;

use super::verifier::{AuthError, Principal};

// ============================================================================
// Route Guards - extractors for authenticated and admin callers
// ============================================================================

/// Any caller carrying a valid bearer token.
pub struct AuthUser(pub Principal);

/// A caller whose `users` document carries the `admin` role.
pub struct AdminUser(pub Principal);

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

async fn authenticate(state: Option<web::Data<AppState>>, token: Option<String>) -> Result<(web::Data<AppState>, Principal), ApiError> {
    let state =
        state.ok_or_else(|| ApiError::Internal("Application state not configured".into()))?;
    let token = token.ok_or(AuthError::MissingToken).map_err(ApiError::from)?;
    let principal = state.verifier.verify(&token).await?;
    Ok((state, principal))
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, ApiError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let (_, principal) = authenticate(state, token).await?;
            Ok(AuthUser(principal))
        })
    }
}

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, ApiError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let (state, principal) = authenticate(state, token).await?;

            match state.users.role(&principal.uid).await? {
                Some(Role::Admin) => Ok(AdminUser(principal)),
                Some(_) => Err(ApiError::Forbidden("Administrator role required".into())),
                None => Err(ApiError::Forbidden("User profile not found".into())),
            }
        })
    }
}
