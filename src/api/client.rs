//! HTTP client for the platform API, one method per consumed endpoint

use crate::api::ApiError;
use crate::config::Config;
use crate::models::{
    Application, ApplicationsResponse, Farmer, Fpo, KycRecord, ProofOfAddress, ProofOfIdentity,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Client for the platform's read-only admin endpoints.
///
/// The bearer token is passed in explicitly through [`Config`]; farmer-detail
/// endpoints require it, the FPO directory does not.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// List FPOs. The directory is fetched as one fixed page.
    pub async fn list_fpos(&self, skip: usize, limit: usize) -> Result<Vec<Fpo>, ApiError> {
        let url = format!("{}/fpos/?skip={}&limit={}", self.base_url, skip, limit);
        self.get_json(&url, false).await
    }

    /// Fetch one farmer by record id. Requires the bearer token.
    pub async fn fetch_farmer(&self, id: &str) -> Result<Farmer, ApiError> {
        let url = format!("{}/farmers/{}/", self.base_url, id);
        self.get_json(&url, true).await
    }

    /// Fetch the KYC history entry for a farmer. Requires the bearer token.
    pub async fn fetch_kyc_history(&self, farmer_id: &str) -> Result<KycRecord, ApiError> {
        let url = format!("{}/kyc-histories/{}", self.base_url, farmer_id);
        self.get_json(&url, true).await
    }

    /// Fetch a proof-of-identity document by version id.
    pub async fn fetch_poi(&self, version_id: &str) -> Result<ProofOfIdentity, ApiError> {
        let url = format!("{}/poi-versions/{}", self.base_url, version_id);
        self.get_json(&url, true).await
    }

    /// Fetch a proof-of-address document by version id.
    pub async fn fetch_poa(&self, version_id: &str) -> Result<ProofOfAddress, ApiError> {
        let url = format!("{}/poa-versions/{}", self.base_url, version_id);
        self.get_json(&url, true).await
    }

    /// List a farmer's applications. This endpoint wraps its payload in a
    /// `{ "data": [...] }` envelope; the others do not.
    pub async fn list_applications(
        &self,
        farmer_id: &str,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Application>, ApiError> {
        let url = format!(
            "{}/applications/{}?skip={}&limit={}",
            self.base_url, farmer_id, skip, limit
        );
        let response: ApplicationsResponse = self.get_json(&url, false).await?;
        Ok(response.data)
    }

    /// Issue a GET and decode the JSON body. With `authed`, the configured
    /// bearer token is attached; its absence fails before any request goes out.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, authed: bool) -> Result<T, ApiError> {
        let mut request = self.client.get(url).header("Accept", "application/json");

        if authed {
            let token = self.token.as_deref().ok_or(ApiError::MissingToken)?;
            request = request.bearer_auth(token);
        }

        debug!("GET {}", url);
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
