//! Composite attachment identifier.

use std::fmt;
use std::str::FromStr;

use crate::error::ResourceError;

/// The locally persisted identity of an attachment: the AWS account ID and
/// the Lambda ARN joined by a single space.
///
/// `Display` produces the persisted form; `FromStr` splits it back on the
/// first space, so the ARN half may itself contain spaces. The pair uniquely
/// identifies the attachment in the remote account; no further local
/// uniqueness is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttachmentId {
    account_id: String,
    lambda_arn: String,
}

impl AttachmentId {
    pub fn new(account_id: impl Into<String>, lambda_arn: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            lambda_arn: lambda_arn.into(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn lambda_arn(&self) -> &str {
        &self.lambda_arn
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.account_id, self.lambda_arn)
    }
}

impl FromStr for AttachmentId {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ' ');
        match (parts.next(), parts.next()) {
            (Some(account_id), Some(lambda_arn))
                if !account_id.is_empty() && !lambda_arn.is_empty() =>
            {
                Ok(Self::new(account_id, lambda_arn))
            }
            _ => Err(ResourceError::MalformedId { id: s.to_string() }),
        }
    }
}
