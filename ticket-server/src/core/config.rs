/// Server configuration
///
/// # Environment Variables
///
/// Every field can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | Runtime environment |
/// | DEFAULT_PAGE_LIMIT | 20 | Page size when a list query omits `limit` |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout in milliseconds |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | Graceful shutdown grace period |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 ENVIRONMENT=production cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Page size applied when a list query omits `limit`
    pub default_page_limit: u32,
    /// Per-request timeout (milliseconds)
    pub request_timeout_ms: u64,
    /// Graceful shutdown grace period (milliseconds)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            default_page_limit: std::env::var("DEFAULT_PAGE_LIMIT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(20),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// Override the port, keeping everything else from the environment
    ///
    /// Mostly used in tests.
    pub fn with_port(http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
