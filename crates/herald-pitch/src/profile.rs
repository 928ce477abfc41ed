//! Company profile fetch from the profile-data provider.

use crate::error::PitchError;
use async_trait::async_trait;
use herald_types::CompanyProfile;
use serde::Deserialize;
use tracing::debug;

/// Marker substring in the provider's error description when the URL points
/// at an individual rather than a company.
const PERSON_URL_MARKER: &str = "LinkedIn Person URLs";

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetches the structured company record behind a profile URL.
    async fn fetch_company(&self, url: &str) -> Result<CompanyProfile, PitchError>;
}

/// Profile fetch against a Proxycurl-style company endpoint.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ProfileClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ProfileSource for ProfileClient {
    async fn fetch_company(&self, url: &str) -> Result<CompanyProfile, PitchError> {
        let response = self
            .http
            .get(format!("{}/api/linkedin/company", self.base_url))
            .query(&[
                ("url", url),
                ("resolve_numeric_id", "false"),
                ("use_cache", "if-present"),
            ])
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let profile: CompanyProfile = response.json().await?;
            debug!(company = profile.name.as_deref().unwrap_or("<unnamed>"), "fetched company profile");
            return Ok(profile);
        }

        let description = response
            .json::<ProviderError>()
            .await
            .map(|body| body.description)
            .unwrap_or_else(|_| format!("provider returned {status}"));
        Err(classify_provider_error(&description))
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    description: String,
}

/// Distinguishes a personal-profile URL (user-correctable) from generic
/// provider failures.
fn classify_provider_error(description: &str) -> PitchError {
    if description.contains(PERSON_URL_MARKER) {
        PitchError::InvalidInputUrl
    } else {
        PitchError::Profile(description.to_string())
    }
}
