use std::time::Duration;

use crate::core::errors::{AppError, AppResult};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Values injected by the hosting page. They are opaque to the core: nothing
/// here is validated except that the binary needs an API URL to fetch from.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub api_url: String,
    pub business_slug: String,
    pub csrf_token: String,
    pub request_timeout: Duration,
}

impl SiteConfig {
    pub fn new(
        api_url: impl Into<String>,
        business_slug: impl Into<String>,
        csrf_token: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            business_slug: business_slug.into(),
            csrf_token: csrf_token.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> AppResult<Self> {
        let api_url = std::env::var("TABLESITE_API_URL").unwrap_or_default();
        if api_url.trim().is_empty() {
            return Err(AppError::Config("TABLESITE_API_URL is not set".to_string()));
        }
        let mut config = Self::new(
            api_url.trim(),
            std::env::var("TABLESITE_BUSINESS_SLUG").unwrap_or_default(),
            std::env::var("TABLESITE_CSRF_TOKEN").unwrap_or_default(),
        );
        if let Some(secs) = std::env::var("TABLESITE_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            config.request_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Path of the public reservation endpoint, relative to the site origin.
    pub fn reservation_path(&self) -> String {
        format!("/api/public/business/{}/reservations/", self.business_slug)
    }
}
