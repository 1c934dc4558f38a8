use std::net::SocketAddr;

/// Runtime configuration, read once at startup.
///
/// The front-end owns no data of its own: everything it needs is the
/// address of the backend REST service, the secret used to sign the
/// session cookie, and where to listen.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_secret: String,
    pub bind_addr: SocketAddr,
    pub environment: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let session_secret = std::env::var("SESSION_SECRET")
            .map_err(|_| "SESSION_SECRET must be set".to_string())?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| format!("invalid BIND_ADDR: {}", e))?;

        let environment = std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string());

        let config = Self {
            api_base_url,
            session_secret,
            bind_addr,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        // The cookie signing key is derived from this value and needs
        // enough entropy to be worth signing with at all.
        if self.session_secret.len() < 32 {
            return Err("SESSION_SECRET must be at least 32 bytes".to_string());
        }
        if self.api_base_url.trim().is_empty() {
            return Err("API_BASE_URL cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            api_base_url: "http://localhost:8080".to_string(),
            session_secret: "0123456789abcdef0123456789abcdef".to_string(),
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            environment: "development".to_string(),
        }
    }

    #[test]
    fn accepts_a_32_byte_secret() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_a_short_secret() {
        let mut config = base_config();
        config.session_secret = "too-short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_flag_follows_environment() {
        let mut config = base_config();
        assert!(!config.is_production());
        config.environment = "production".to_string();
        assert!(config.is_production());
    }
}
