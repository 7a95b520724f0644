use std::sync::Arc;

use chrono::Utc;

use crate::auth::Principal;
use crate::models::{Role, UserProfile};
use crate::store::{DocumentStore, StoreError, TxError, USERS};

// ============================================================================
// User Service - profile documents keyed by identity-provider uid
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User profile not found")]
    ProfileNotFound,

    #[error("User profile could not be saved")]
    Store(#[from] StoreError),
}

pub struct UserService {
    store: Arc<DocumentStore>,
}

impl UserService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Create the caller's profile document with the default `user` role.
    /// Idempotent: an existing profile (and its role) is left untouched.
    /// Returns whether a profile was created.
    pub async fn register_initial(&self, principal: &Principal) -> Result<bool, UserError> {
        let uid = principal.uid.clone();
        let profile = UserProfile {
            email: principal.email.clone(),
            display_name: principal
                .display_name
                .clone()
                .unwrap_or_else(|| principal.email.clone()),
            role: Role::User,
            created_at: Utc::now(),
        };

        // Transactional create-if-absent: two concurrent first logins cannot
        // both insert, so an admin role granted in between is never clobbered.
        let created = self
            .store
            .run_transaction(|tx| {
                if tx.get::<UserProfile>(USERS, &uid)?.is_some() {
                    return Ok(false);
                }
                tx.set(USERS, &uid, &profile)?;
                Ok(true)
            })
            .map_err(|e| match e {
                TxError::Aborted(e) | TxError::Store(e) => UserError::Store(e),
            })?;

        if created {
            tracing::info!(uid = %principal.uid, "✅ User profile created");
        }
        Ok(created)
    }

    pub async fn profile(&self, uid: &str) -> Result<UserProfile, UserError> {
        self.store
            .get::<UserProfile>(USERS, uid)?
            .ok_or(UserError::ProfileNotFound)
    }

    /// Role lookup for the admin guard. A missing profile has no role.
    pub async fn role(&self, uid: &str) -> Result<Option<Role>, UserError> {
        Ok(self
            .store
            .get::<UserProfile>(USERS, uid)?
            .map(|profile| profile.role))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
