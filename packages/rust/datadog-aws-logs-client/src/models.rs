//! Request and response models for the AWS logs integration endpoints.
//!
//! The list models carry a flattened `additional_properties` map: any field
//! the remote returns that the model does not know lands there instead of
//! being silently dropped, so callers can detect schema drift between this
//! crate and the API.

use std::collections::HashMap;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body shared by the attach and detach calls: the AWS account and the
/// Lambda ARN the operation applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsAccountAndLambdaRequest {
    /// AWS account ID, without dashes.
    pub account_id: String,
    /// ARN of the log collection Lambda.
    pub lambda_arn: String,
}

impl AwsAccountAndLambdaRequest {
    pub fn new(account_id: impl Into<String>, lambda_arn: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            lambda_arn: lambda_arn.into(),
        }
    }
}

/// A Lambda attached to an AWS logs integration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwsLogsLambda {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(flatten)]
    pub additional_properties: HashMap<String, Value>,
}

/// One entry of the AWS logs integration list: an account, its attached
/// Lambdas, and the AWS services log collection is enabled for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwsLogsListEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lambdas: Vec<AwsLogsLambda>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
    #[serde(flatten)]
    pub additional_properties: HashMap<String, Value>,
}

impl AwsLogsListEntry {
    /// Names of the fields, on this entry or its Lambdas, that did not map
    /// onto the model. Empty when the entry parsed cleanly.
    pub fn unparsed_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self
            .additional_properties
            .keys()
            .map(String::as_str)
            .collect();
        for lambda in &self.lambdas {
            fields.extend(lambda.additional_properties.keys().map(String::as_str));
        }
        fields.sort_unstable();
        fields
    }
}

/// Outcome of an attach or detach call.
///
/// These endpoints return a schemaless object, so the raw body is kept next
/// to the parsed value: the API reports some logical failures inside a 2xx
/// response, and callers surfacing those need the body verbatim.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// Raw response body text.
    pub body: String,
    /// Body parsed as JSON; an empty body parses as `{}`.
    pub value: Value,
}

impl ApiResponse {
    /// True when the response embeds `"status": "error"` despite the
    /// successful HTTP status.
    pub fn is_application_error(&self) -> bool {
        self.value.get("status").and_then(Value::as_str) == Some("error")
    }
}
