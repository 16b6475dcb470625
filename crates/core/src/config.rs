//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the HTTP clients.
//! Nothing in this module reads environment variables; binaries read them and hand the raw
//! values to [`ClientConfig::from_env_values`].

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::{CoreError, CoreResult};
use api_shared::{ANALYZE_GENE_SEQUENCE_PATH, UPLOAD_MRI_PATH};
use reqwest::Url;
use std::time::Duration;

/// Endpoint addresses and transport settings for both workflow phases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    upload_url: Url,
    analyze_url: Url,
    request_timeout: Duration,
}

impl ClientConfig {
    /// Create a config whose endpoints are the standard paths under `api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidUrl`] if `api_base_url` is not an absolute http(s) URL, and
    /// [`CoreError::InvalidInput`] if `request_timeout` is zero.
    pub fn new(api_base_url: &str, request_timeout: Duration) -> CoreResult<Self> {
        if request_timeout.is_zero() {
            return Err(CoreError::InvalidInput(
                "request timeout must be greater than zero".into(),
            ));
        }

        let base = api_base_url.trim().trim_end_matches('/');
        Ok(Self {
            upload_url: parse_http_url(&format!("{base}{UPLOAD_MRI_PATH}"))?,
            analyze_url: parse_http_url(&format!("{base}{ANALYZE_GENE_SEQUENCE_PATH}"))?,
            request_timeout,
        })
    }

    /// Point the prediction phase at a different address.
    pub fn with_upload_url(mut self, url: &str) -> CoreResult<Self> {
        self.upload_url = parse_http_url(url)?;
        Ok(self)
    }

    /// Point the analysis phase at a different address.
    pub fn with_analyze_url(mut self, url: &str) -> CoreResult<Self> {
        self.analyze_url = parse_http_url(url)?;
        Ok(self)
    }

    /// Build a config from optional raw values, as read from the environment.
    ///
    /// Missing or blank values fall back to [`DEFAULT_API_BASE_URL`] and
    /// [`DEFAULT_REQUEST_TIMEOUT_SECS`]. Per-endpoint URLs, when given, replace the address
    /// derived from the base URL.
    pub fn from_env_values(
        api_base_url: Option<String>,
        upload_url: Option<String>,
        analyze_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> CoreResult<Self> {
        let api_base_url = non_blank(api_base_url).unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
        let timeout_secs = match non_blank(timeout_secs) {
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
            Some(v) => v.parse::<u64>().map_err(|e| {
                CoreError::InvalidInput(format!("invalid request timeout '{v}': {e}"))
            })?,
        };

        let mut cfg = Self::new(&api_base_url, Duration::from_secs(timeout_secs))?;
        if let Some(url) = non_blank(upload_url) {
            cfg = cfg.with_upload_url(&url)?;
        }
        if let Some(url) = non_blank(analyze_url) {
            cfg = cfg.with_analyze_url(&url)?;
        }
        Ok(cfg)
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_http_url(raw: &str) -> CoreResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| CoreError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(CoreError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}
