//! Gateway configuration.

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP listen address
    pub http_addr: String,

    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,

    /// Service version
    pub version: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http_addr: "127.0.0.1:8080".to_string(),
            max_body_bytes: 1024 * 1024,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl GatewayConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("GATEWAY_HTTP_ADDR") {
            config.http_addr = addr;
        }

        if let Ok(max) = std::env::var("GATEWAY_MAX_BODY_BYTES") {
            if let Ok(n) = max.parse() {
                config.max_body_bytes = n;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.http_addr, "127.0.0.1:8080");
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert!(!config.version.is_empty());
    }
}
