//! Bindings to the Datadog AWS Logs Integration API.
//!
//! This crate covers the three endpoints that manage the log collection
//! Lambdas attached to an AWS integration account: attaching a Lambda ARN,
//! listing the current AWS logs integrations, and detaching a Lambda ARN.
//! All three operate on the same resource path and authenticate with a
//! Datadog API key and application key.
//!
//! The [`AwsLogsIntegrationApi`] trait is the seam consumers should depend
//! on: [`AwsLogsClient`] is the reqwest-backed implementation, and tests can
//! substitute a fake without touching the network.
//!
//! # Example
//!
//! ```no_run
//! use datadog_aws_logs_client::{
//!     AwsAccountAndLambdaRequest, AwsLogsClientBuilder, AwsLogsIntegrationApi,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AwsLogsClientBuilder::new()
//!         .with_api_key("api-key")
//!         .with_application_key("app-key")
//!         .with_site("datadoghq.eu")
//!         .build()?;
//!
//!     let request = AwsAccountAndLambdaRequest::new(
//!         "123456789012",
//!         "arn:aws:lambda:us-east-1:123456789012:function:datadog-forwarder",
//!     );
//!     client.create_aws_lambda_arn(&request).await?;
//!
//!     for integration in client.list_aws_logs_integrations().await? {
//!         println!("{:?}", integration.account_id);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method};
use tracing::instrument;
use url::Url;

mod builder;
mod error;
mod models;

pub use builder::AwsLogsClientBuilder;
pub use error::AwsLogsApiError;
pub use models::{ApiResponse, AwsAccountAndLambdaRequest, AwsLogsLambda, AwsLogsListEntry};
pub use reqwest::StatusCode;

/// Default Datadog API base URL.
pub const DEFAULT_SITE: &str = "https://api.datadoghq.com";

/// Resource path shared by all three AWS logs integration endpoints.
pub const AWS_LOGS_INTEGRATION_PATH: &str = "/api/v1/integration/aws/logs";

/// Header carrying the Datadog API key.
pub const API_KEY_HEADER: &str = "DD-API-KEY";

/// Header carrying the Datadog application key.
pub const APPLICATION_KEY_HEADER: &str = "DD-APPLICATION-KEY";

/// Client-side view of the Datadog AWS Logs Integration API.
///
/// The three operations map one-to-one onto HTTP calls against
/// [`AWS_LOGS_INTEGRATION_PATH`]: `POST` to attach, `GET` to list, `DELETE`
/// to detach. Attach and detach return a schemaless object, surfaced as an
/// [`ApiResponse`] so callers can inspect the application-level `status`
/// field the API embeds in otherwise-successful responses.
#[async_trait]
pub trait AwsLogsIntegrationApi: Send + Sync {
    /// Attaches a Lambda ARN to the AWS integration account named in the
    /// request.
    async fn create_aws_lambda_arn(
        &self,
        request: &AwsAccountAndLambdaRequest,
    ) -> Result<ApiResponse, AwsLogsApiError>;

    /// Lists every AWS logs integration on the Datadog account, including
    /// the Lambdas attached to each.
    async fn list_aws_logs_integrations(&self) -> Result<Vec<AwsLogsListEntry>, AwsLogsApiError>;

    /// Detaches a Lambda ARN from the AWS integration account named in the
    /// request.
    async fn delete_aws_lambda_arn(
        &self,
        request: &AwsAccountAndLambdaRequest,
    ) -> Result<ApiResponse, AwsLogsApiError>;
}

#[async_trait]
impl<T: AwsLogsIntegrationApi + ?Sized> AwsLogsIntegrationApi for Arc<T> {
    async fn create_aws_lambda_arn(
        &self,
        request: &AwsAccountAndLambdaRequest,
    ) -> Result<ApiResponse, AwsLogsApiError> {
        (**self).create_aws_lambda_arn(request).await
    }

    async fn list_aws_logs_integrations(&self) -> Result<Vec<AwsLogsListEntry>, AwsLogsApiError> {
        (**self).list_aws_logs_integrations().await
    }

    async fn delete_aws_lambda_arn(
        &self,
        request: &AwsAccountAndLambdaRequest,
    ) -> Result<ApiResponse, AwsLogsApiError> {
        (**self).delete_aws_lambda_arn(request).await
    }
}

/// Reqwest-backed implementation of [`AwsLogsIntegrationApi`].
///
/// Construct through [`AwsLogsClientBuilder`]. The client is cheap to clone
/// and safe to share across tasks.
#[derive(Clone)]
pub struct AwsLogsClient {
    http: ReqwestClient,
    endpoint: Url,
    api_key: String,
    application_key: String,
}

impl Debug for AwsLogsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsLogsClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("application_key", &"<redacted>")
            .finish()
    }
}

impl AwsLogsClient {
    pub(crate) fn new(
        http: ReqwestClient,
        endpoint: Url,
        api_key: String,
        application_key: String,
    ) -> Self {
        Self {
            http,
            endpoint,
            api_key,
            application_key,
        }
    }

    /// Creates a builder for configuring a client.
    pub fn builder() -> AwsLogsClientBuilder {
        AwsLogsClientBuilder::new()
    }

    /// Resolved URL of the AWS logs integration endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn execute(
        &self,
        method: Method,
        body: Option<&AwsAccountAndLambdaRequest>,
    ) -> Result<(StatusCode, String), AwsLogsApiError> {
        let mut request = self
            .http
            .request(method, self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .header(APPLICATION_KEY_HEADER, &self.application_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                body = %body,
                "Datadog API request failed"
            );
            return Err(AwsLogsApiError::Api { status, body });
        }

        Ok((status, body))
    }
}

fn parse_object_response(status: StatusCode, body: String) -> Result<ApiResponse, AwsLogsApiError> {
    // Attach/detach return a schemaless object; an empty body counts as {}.
    let value = if body.trim().is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_str(&body).map_err(|source| AwsLogsApiError::Deserialize {
            source,
            body: body.clone(),
        })?
    };

    Ok(ApiResponse {
        status,
        body,
        value,
    })
}

#[async_trait]
impl AwsLogsIntegrationApi for AwsLogsClient {
    #[instrument(skip_all, fields(
        http.method = "POST",
        http.url = %self.endpoint,
        aws.account_id = %request.account_id,
    ))]
    async fn create_aws_lambda_arn(
        &self,
        request: &AwsAccountAndLambdaRequest,
    ) -> Result<ApiResponse, AwsLogsApiError> {
        tracing::debug!(lambda_arn = %request.lambda_arn, "attaching Lambda ARN");
        let (status, body) = self.execute(Method::POST, Some(request)).await?;
        parse_object_response(status, body)
    }

    #[instrument(skip_all, fields(http.method = "GET", http.url = %self.endpoint))]
    async fn list_aws_logs_integrations(&self) -> Result<Vec<AwsLogsListEntry>, AwsLogsApiError> {
        let (_, body) = self.execute(Method::GET, None).await?;
        serde_json::from_str(&body)
            .map_err(|source| AwsLogsApiError::Deserialize { source, body })
    }

    #[instrument(skip_all, fields(
        http.method = "DELETE",
        http.url = %self.endpoint,
        aws.account_id = %request.account_id,
    ))]
    async fn delete_aws_lambda_arn(
        &self,
        request: &AwsAccountAndLambdaRequest,
    ) -> Result<ApiResponse, AwsLogsApiError> {
        tracing::debug!(lambda_arn = %request.lambda_arn, "detaching Lambda ARN");
        let (status, body) = self.execute(Method::DELETE, Some(request)).await?;
        parse_object_response(status, body)
    }
}
