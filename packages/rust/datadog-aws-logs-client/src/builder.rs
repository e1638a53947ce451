//! Builder for [`AwsLogsClient`].

use std::env;

use reqwest::Client as ReqwestClient;
use url::Url;

use crate::{AwsLogsApiError, AwsLogsClient, AWS_LOGS_INTEGRATION_PATH, DEFAULT_SITE};

/// Builder for configuring and creating an [`AwsLogsClient`].
///
/// Credentials and the target site can be provided explicitly or picked up
/// from the conventional Datadog environment variables (`DD_API_KEY`,
/// `DD_APP_KEY`, `DD_SITE`) at build time.
#[derive(Debug, Default)]
pub struct AwsLogsClientBuilder {
    http: Option<ReqwestClient>,
    api_key: Option<String>,
    application_key: Option<String>,
    site: Option<String>,
}

impl AwsLogsClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the underlying HTTP client. A default client is created when
    /// none is provided.
    pub fn with_http_client(mut self, http: ReqwestClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the Datadog API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the Datadog application key.
    pub fn with_application_key(mut self, application_key: impl Into<String>) -> Self {
        self.application_key = Some(application_key.into());
        self
    }

    /// Sets the Datadog site.
    ///
    /// Accepts either a full base URL (`https://api.datadoghq.eu`) or a bare
    /// site domain (`datadoghq.eu`), which is expanded to `https://api.<site>`.
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    /// Builds the client with the configured parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key or application key is missing (after
    /// consulting the environment) or the site does not parse as a URL.
    pub fn build(self) -> Result<AwsLogsClient, AwsLogsApiError> {
        let api_key = self
            .api_key
            .or_else(|| env::var("DD_API_KEY").ok())
            .ok_or(AwsLogsApiError::MissingApiKey)?;
        let application_key = self
            .application_key
            .or_else(|| env::var("DD_APP_KEY").ok())
            .ok_or(AwsLogsApiError::MissingApplicationKey)?;

        let site = self
            .site
            .or_else(|| env::var("DD_SITE").ok())
            .unwrap_or_else(|| DEFAULT_SITE.to_string());
        let base = if site.starts_with("http://") || site.starts_with("https://") {
            site.clone()
        } else {
            format!("https://api.{}", site)
        };
        let endpoint = Url::parse(&base)
            .and_then(|url| url.join(AWS_LOGS_INTEGRATION_PATH))
            .map_err(|_| AwsLogsApiError::InvalidSite { site })?;

        let http = self.http.unwrap_or_default();

        Ok(AwsLogsClient::new(http, endpoint, api_key, application_key))
    }
}
