//! Error type for the Lambda ARN attachment resource.

use datadog_aws_logs_client::{AwsLogsApiError, StatusCode};
use thiserror::Error;

/// Errors surfaced by the attachment lifecycle operations.
///
/// Every remote failure is terminal for the invocation that hit it; nothing
/// here is retried. A missing attachment during read is not an error; see
/// [`AwsLambdaArnResource::read`](crate::AwsLambdaArnResource::read).
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A remote call failed. The operation description says what was being
    /// attempted; the source keeps the HTTP response context when there is
    /// one.
    #[error("error {operation}: {source}")]
    Api {
        operation: &'static str,
        #[source]
        source: AwsLogsApiError,
    },

    /// The attach call came back 2xx but the body carried
    /// `"status": "error"`.
    #[error("error attaching Lambda ARN to AWS integration account: {body}")]
    AttachRejected { body: String },

    /// The persisted identifier did not split into an account ID and a
    /// Lambda ARN.
    #[error("error extracting account ID and Lambda ARN from id `{id}`: expected `<account_id> <lambda_arn>`")]
    MalformedId { id: String },

    /// The attach call succeeded but a clean read-back did not surface the
    /// attachment.
    #[error("AWS integration Lambda ARN with account id `{account_id}` and lambda arn `{lambda_arn}` not found after creation")]
    NotFoundAfterCreation {
        account_id: String,
        lambda_arn: String,
    },

    /// A configuration attribute failed schema validation.
    #[error("invalid value for `{field}`: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// The list response contained fields the client model could not place.
    #[error("AWS logs integration response contains unparsed fields: {fields}")]
    Unparsed { fields: String },
}

impl ResourceError {
    pub(crate) fn api(operation: &'static str, source: AwsLogsApiError) -> Self {
        Self::Api { operation, source }
    }

    /// HTTP status and body from the underlying API failure, when present.
    pub fn http_context(&self) -> Option<(StatusCode, &str)> {
        match self {
            Self::Api { source, .. } => source.http_context(),
            _ => None,
        }
    }
}
