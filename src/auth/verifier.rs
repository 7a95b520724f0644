use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

// ============================================================================
// Token Verification
// ============================================================================

/// The authenticated caller as asserted by the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Verifies bearer tokens issued by the external identity provider.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}

#[derive(Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    #[serde(default)]
    name: Option<String>,
    exp: usize,
}

/// HS256 JWT verification against a shared secret.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "token verification failed");
            AuthError::InvalidToken
        })?;

        Ok(Principal {
            uid: data.claims.sub,
            email: data.claims.email,
            display_name: data.claims.name,
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &[u8] = b"test-secret";

    fn token_for(uid: &str, exp_offset_secs: i64) -> String {
        let claims = Claims {
            sub: uid.to_string(),
            email: format!("{uid}@example.com"),
            name: Some("Fan".to_string()),
            exp: (chrono::Utc::now().timestamp() + exp_offset_secs) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_yields_principal() {
        let verifier = JwtVerifier::new(SECRET);
        let principal = verifier.verify(&token_for("u1", 3600)).await.unwrap();

        assert_eq!(principal.uid, "u1");
        assert_eq!(principal.email, "u1@example.com");
        assert_eq!(principal.display_name.as_deref(), Some("Fan"));
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let verifier = JwtVerifier::new(SECRET);
        let err = verifier.verify(&token_for("u1", -3600)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_wrong_secret_rejected() {
        let verifier = JwtVerifier::new(b"other-secret");
        let err = verifier.verify(&token_for("u1", 3600)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let verifier = JwtVerifier::new(SECRET);
        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
