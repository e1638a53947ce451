//! Error type for the AWS logs integration client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced when building or using an
/// [`AwsLogsClient`](crate::AwsLogsClient).
#[derive(Error, Debug)]
pub enum AwsLogsApiError {
    #[error("Datadog API key not provided")]
    MissingApiKey,

    #[error("Datadog application key not provided")]
    MissingApplicationKey,

    #[error("invalid Datadog site `{site}`")]
    InvalidSite { site: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Datadog API returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("failed to deserialize response body: {source}")]
    Deserialize {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl AwsLogsApiError {
    /// HTTP status and body of the failed response, when the error carries
    /// one. Transport and builder errors return `None`.
    pub fn http_context(&self) -> Option<(StatusCode, &str)> {
        match self {
            Self::Api { status, body } => Some((*status, body.as_str())),
            _ => None,
        }
    }
}
