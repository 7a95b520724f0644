use std::env;

// ============================================================================
// Configuration - environment-driven, with development defaults
// ============================================================================

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_JWT_SECRET: &str = "dev-secret";
const DEFAULT_TX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to. `KITSTORE_BIND`.
    pub bind_addr: String,
    /// HS256 secret shared with the identity provider. `KITSTORE_JWT_SECRET`.
    pub jwt_secret: String,
    /// Retry budget for conflicting store transactions. `KITSTORE_TX_ATTEMPTS`.
    pub tx_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = env::var("KITSTORE_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

        let jwt_secret = match env::var("KITSTORE_JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                tracing::warn!(
                    "KITSTORE_JWT_SECRET not set, using the development default"
                );
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let tx_max_attempts = env::var("KITSTORE_TX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TX_ATTEMPTS);

        Self {
            bind_addr,
            jwt_secret,
            tx_max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Env vars are process-global; only assert the defaults used when
        // nothing relevant is exported in the test environment.
        let config = Config::from_env();
        assert!(!config.bind_addr.is_empty());
        assert!(config.tx_max_attempts >= 1);
    }
}
