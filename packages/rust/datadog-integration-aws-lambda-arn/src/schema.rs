//! Declarative schema surface of the attachment resource.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ResourceError;
use crate::resource::AttachmentConfig;

/// The resource is deprecated upstream; new configurations should manage
/// Lambda ARNs through the AWS integration account resource instead.
pub const DEPRECATION_MESSAGE: &str = "This resource is deprecated - use the \
`datadog_integration_aws_account` resource instead";

/// Metadata for one resource attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// Changing the attribute replaces the resource; the remote API has no
    /// update call for attachments.
    pub force_new: bool,
}

const ATTRIBUTES: [AttributeSchema; 2] = [
    AttributeSchema {
        name: "account_id",
        description: "Your AWS Account ID without dashes.",
        required: true,
        force_new: true,
    },
    AttributeSchema {
        name: "lambda_arn",
        description: "The ARN of the Datadog forwarder Lambda.",
        required: true,
        force_new: true,
    },
];

/// Descriptors for the two attributes of the resource.
pub fn attributes() -> &'static [AttributeSchema] {
    &ATTRIBUTES
}

lazy_static! {
    static ref AWS_ACCOUNT_ID: Regex = Regex::new(r"^\d{12}$").expect("valid account id regex");
}

/// Validates an AWS account ID: exactly twelve digits, no dashes.
pub fn validate_aws_account_id(value: &str) -> Result<(), ResourceError> {
    if AWS_ACCOUNT_ID.is_match(value) {
        Ok(())
    } else {
        Err(ResourceError::Validation {
            field: "account_id",
            reason: format!("`{}` must be a 12-digit AWS account ID without dashes", value),
        })
    }
}

/// Validates a configuration against the schema before it reaches the
/// remote API.
pub fn validate(config: &AttachmentConfig) -> Result<(), ResourceError> {
    validate_aws_account_id(&config.account_id)?;
    if config.lambda_arn.is_empty() {
        return Err(ResourceError::Validation {
            field: "lambda_arn",
            reason: "a Lambda ARN is required".to_string(),
        });
    }
    Ok(())
}
