use std::time::Duration;

use url::Url;

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://sc-trade.tools/best-buyer";
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Configuration for a lookup: where to go and how long to wait.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Results page that accepts the `q` query parameter.
    pub base_url: String,
    /// Upper bound for navigation to settle.
    pub navigation_timeout: Duration,
    /// Extra wait after navigation for client-side rendering.
    pub settle_delay: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl LookupConfig {
    /// Read configuration from environment variables.
    ///
    /// - `HAUL_BASE_URL` (optional, defaults to the SC Trade Tools best-buyer page)
    /// - `HAUL_NAV_TIMEOUT_SECS` (optional, defaults to 60)
    /// - `HAUL_SETTLE_DELAY_MS` (optional, defaults to 5000)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(raw) = var("HAUL_BASE_URL") {
            config = config.with_base_url(&raw)?;
        }

        if let Some(raw) = var("HAUL_NAV_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid HAUL_NAV_TIMEOUT_SECS '{raw}': must be a positive integer"
                ))
            })?;
            if secs == 0 {
                return Err(AppError::ConfigError(
                    "HAUL_NAV_TIMEOUT_SECS must be at least 1".into(),
                ));
            }
            config.navigation_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = var("HAUL_SETTLE_DELAY_MS") {
            let ms: u64 = raw.parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid HAUL_SETTLE_DELAY_MS '{raw}': must be a non-negative integer"
                ))
            })?;
            config.settle_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Point lookups at a different results page. Only http(s) URLs are accepted.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, AppError> {
        let parsed = Url::parse(raw)
            .map_err(|e| AppError::ConfigError(format!("Invalid base URL '{raw}': {e}")))?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(AppError::ConfigError(format!(
                    "Base URL scheme '{scheme}' is not allowed (only http/https)"
                )));
            }
        }
        self.base_url = raw.to_string();
        Ok(self)
    }

    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}
