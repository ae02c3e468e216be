use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::core::{
    config::SiteConfig,
    errors::{AppError, AppResult},
    types::{PageSnapshot, ReservationRequest},
};

pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Clone)]
pub struct SiteApiClient {
    http: reqwest::Client,
    config: SiteConfig,
}

impl SiteApiClient {
    pub fn new(config: SiteConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| AppError::Network(err.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// GETs the page payload. Anything but a 2xx JSON body that parses into a
    /// [`PageSnapshot`] is an error.
    pub async fn fetch_page(&self) -> AppResult<PageSnapshot> {
        let response = self.http.get(&self.config.api_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "page data request failed");
            return Err(match status {
                StatusCode::NOT_FOUND => AppError::NotFound(format!("page data at {}", self.config.api_url)),
                _ => AppError::InvalidResponse(format!("status {status} body {body}")),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| AppError::InvalidResponse(err.to_string()))?;
        let snapshot = PageSnapshot::from_value(body)?;
        tracing::info!(
            tables = snapshot.tables.len(),
            categories = snapshot.menu.len(),
            has_layout = snapshot.layout.is_some(),
            "page data loaded"
        );
        Ok(snapshot)
    }

    /// The reservation endpoint lives on the same origin as the page API.
    pub fn reservation_endpoint(&self) -> AppResult<Url> {
        let base = Url::parse(&self.config.api_url)
            .map_err(|err| AppError::Config(format!("api url {}: {err}", self.config.api_url)))?;
        base.join(&self.config.reservation_path())
            .map_err(|err| AppError::Config(format!("reservation url: {err}")))
    }

    /// POSTs a reservation. A non-2xx reply comes back as
    /// [`AppError::Rejected`] carrying the parsed error body; a reply whose
    /// body is not JSON is an [`AppError::InvalidResponse`].
    pub async fn submit_reservation(&self, request: &ReservationRequest) -> AppResult<()> {
        let endpoint = self.reservation_endpoint()?;
        let response = self
            .http
            .post(endpoint)
            .header(CSRF_HEADER, &self.config.csrf_token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(%status, table = %request.table, "reservation accepted");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let body: Value = serde_json::from_str(&text).map_err(|err| {
            AppError::InvalidResponse(format!("status {status} with non-JSON body: {err}"))
        })?;
        tracing::info!(%status, "reservation rejected");
        Err(AppError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
