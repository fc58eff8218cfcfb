use crate::ports::outbound::{GemLicenseMetadata, LicenseRepository};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://rubygems.org";

/// Minimum spacing between requests (~10 requests per second)
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of a failed request attempt
enum AttemptError {
    /// Transport failures, 5xx and 429; worth another attempt
    Transient(anyhow::Error),
    /// Other 4xx statuses and unparseable bodies
    Permanent(anyhow::Error),
}

#[derive(Debug, Deserialize)]
struct RubyGemsVersionInfo {
    #[serde(default)]
    licenses: Option<Vec<String>>,
}

/// RubyGemsLicenseRepository adapter for the RubyGems.org versions API
///
/// Queries `GET /api/v2/rubygems/<name>/versions/<version>.json`. A 404 means
/// the registry does not know the release and is not retried.
pub struct RubyGemsLicenseRepository {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    last_request: Mutex<Option<Instant>>,
}

impl RubyGemsLicenseRepository {
    /// Creates a new RubyGems.org license repository with default configuration
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a repository against another RubyGems-compatible host
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let user_agent = format!("bundle-sbom/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 3,
            last_request: Mutex::new(None),
        })
    }

    /// Validates package name and version for URL safety
    fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
        if component.is_empty() {
            anyhow::bail!("{} is empty", component_type);
        }

        if component.contains('/') || component.contains('\\') {
            anyhow::bail!(
                "Security: {} contains path separators which are not allowed",
                component_type
            );
        }

        if component.contains("..") {
            anyhow::bail!(
                "Security: {} contains '..' which is not allowed",
                component_type
            );
        }

        if component.contains('#') || component.contains('?') || component.contains('@') {
            anyhow::bail!("Security: {} contains URL-unsafe characters", component_type);
        }

        Ok(())
    }

    fn version_url(&self, package_name: &str, version: &str) -> Result<String> {
        Self::validate_url_component(package_name, "Package name")?;
        Self::validate_url_component(version, "Version")?;

        Ok(format!(
            "{}/api/v2/rubygems/{}/versions/{}.json",
            self.base_url,
            urlencoding::encode(package_name),
            urlencoding::encode(version)
        ))
    }

    fn parse_response(body: &str) -> Result<GemLicenseMetadata> {
        let info: RubyGemsVersionInfo = serde_json::from_str(body)?;
        Ok((None, info.licenses.unwrap_or_default()))
    }

    /// Waits until the minimum request interval has passed
    async fn throttle(&self) {
        let wait = {
            let mut last = match self.last_request.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let now = Instant::now();
            let wait = last
                .map(|previous| MIN_REQUEST_INTERVAL.saturating_sub(now.duration_since(previous)))
                .unwrap_or_default();
            *last = Some(now + wait);
            wait
        };

        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }

    fn is_retryable_status(status: reqwest::StatusCode) -> bool {
        status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS
    }

    async fn fetch_from_rubygems(
        &self,
        url: &str,
    ) -> std::result::Result<Option<GemLicenseMetadata>, AttemptError> {
        self.throttle().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AttemptError::Transient(e.into()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let error = anyhow::anyhow!("RubyGems API returned status code {}", status);
            return Err(if Self::is_retryable_status(status) {
                AttemptError::Transient(error)
            } else {
                AttemptError::Permanent(error)
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Transient(e.into()))?;
        Self::parse_response(&body)
            .map(Some)
            .map_err(AttemptError::Permanent)
    }

    /// Fetches with retry logic; only transport errors, 5xx and 429 are retried
    async fn fetch_with_retry(&self, url: &str) -> Result<Option<GemLicenseMetadata>> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.fetch_from_rubygems(url).await {
                Ok(result) => return Ok(result),
                Err(AttemptError::Permanent(e)) => return Err(e),
                Err(AttemptError::Transient(e)) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No request was attempted for {}", url)))
    }
}

#[async_trait]
impl LicenseRepository for RubyGemsLicenseRepository {
    async fn fetch_license_info(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<Option<GemLicenseMetadata>> {
        let url = self.version_url(package_name, version)?;
        self.fetch_with_retry(&url).await
    }
}
