//! Lifecycle operations for the Lambda ARN attachment resource.

use datadog_aws_logs_client::{
    AwsAccountAndLambdaRequest, AwsLogsIntegrationApi, AwsLogsListEntry,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ResourceError;
use crate::id::AttachmentId;
use crate::lock::IntegrationAwsLock;
use crate::schema;

/// User-supplied configuration for an attachment. Both fields are required
/// and force replacement when changed (see [`crate::schema::attributes`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentConfig {
    /// AWS account ID, without dashes.
    pub account_id: String,
    /// ARN of the Datadog forwarder Lambda.
    pub lambda_arn: String,
}

impl AttachmentConfig {
    pub fn new(account_id: impl Into<String>, lambda_arn: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            lambda_arn: lambda_arn.into(),
        }
    }
}

/// Attachment state as read back from the Datadog account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LambdaArnAttachment {
    pub account_id: String,
    pub lambda_arn: String,
}

impl LambdaArnAttachment {
    /// The composite identifier to persist for this attachment.
    pub fn id(&self) -> AttachmentId {
        AttachmentId::new(&self.account_id, &self.lambda_arn)
    }
}

/// Manages Lambda ARN attachments on a Datadog AWS integration account.
///
/// The resource supports create, read, delete, and identifier-passthrough
/// import; the remote API has no update call, so field changes replace the
/// attachment. Both collaborators are injected: the API client (anything
/// implementing [`AwsLogsIntegrationApi`]) and the [`IntegrationAwsLock`]
/// shared with the sibling AWS integration account resource.
#[derive(Debug)]
pub struct AwsLambdaArnResource<C> {
    api: C,
    integration_aws_lock: IntegrationAwsLock,
}

impl<C: AwsLogsIntegrationApi> AwsLambdaArnResource<C> {
    pub fn new(api: C, integration_aws_lock: IntegrationAwsLock) -> Self {
        Self {
            api,
            integration_aws_lock,
        }
    }

    /// Attaches the configured Lambda ARN and reads the attachment back.
    ///
    /// The shared lock is held for the whole operation, read-back included,
    /// so no other mutation of the account record can interleave. A 2xx
    /// response embedding `"status": "error"` fails with the raw body; a
    /// clean read-back that does not surface the attachment fails with
    /// [`ResourceError::NotFoundAfterCreation`].
    #[instrument(skip_all, fields(account_id = %config.account_id))]
    pub async fn create(
        &self,
        config: &AttachmentConfig,
    ) -> Result<LambdaArnAttachment, ResourceError> {
        schema::validate(config)?;

        // Shared with the AWS integration account resource.
        let _guard = self.integration_aws_lock.acquire().await;

        let request = AwsAccountAndLambdaRequest::new(&config.account_id, &config.lambda_arn);
        let response = self
            .api
            .create_aws_lambda_arn(&request)
            .await
            .map_err(|e| ResourceError::api("attaching Lambda ARN to AWS integration account", e))?;
        if response.is_application_error() {
            return Err(ResourceError::AttachRejected {
                body: response.body,
            });
        }

        let id = AttachmentId::new(&config.account_id, &config.lambda_arn);
        tracing::debug!(id = %id, "Lambda ARN attached, reading back");

        match self.read_parsed(&id).await? {
            Some(attachment) => Ok(attachment),
            None => Err(ResourceError::NotFoundAfterCreation {
                account_id: config.account_id.clone(),
                lambda_arn: config.lambda_arn.clone(),
            }),
        }
    }

    /// Refreshes the attachment named by a persisted identifier.
    ///
    /// Returns `Ok(None)` when the remote account no longer carries the
    /// attachment. That is drift detection, not an error; the caller should clear
    /// its record. A malformed identifier fails with
    /// [`ResourceError::MalformedId`].
    #[instrument(skip(self))]
    pub async fn read(&self, id: &str) -> Result<Option<LambdaArnAttachment>, ResourceError> {
        let id: AttachmentId = id.parse()?;
        self.read_parsed(&id).await
    }

    async fn read_parsed(
        &self,
        id: &AttachmentId,
    ) -> Result<Option<LambdaArnAttachment>, ResourceError> {
        let integrations = self
            .api
            .list_aws_logs_integrations()
            .await
            .map_err(|e| ResourceError::api("getting AWS log integrations for Datadog account", e))?;
        check_for_unparsed(&integrations)?;

        for integration in &integrations {
            if integration.account_id.as_deref() != Some(id.account_id()) {
                continue;
            }
            for lambda in &integration.lambdas {
                if lambda.arn.as_deref() == Some(id.lambda_arn()) {
                    return Ok(Some(LambdaArnAttachment {
                        account_id: integration
                            .account_id
                            .clone()
                            .unwrap_or_else(|| id.account_id().to_string()),
                        lambda_arn: lambda
                            .arn
                            .clone()
                            .unwrap_or_else(|| id.lambda_arn().to_string()),
                    }));
                }
            }
        }

        tracing::debug!(id = %id, "Lambda ARN attachment not present in remote account");
        Ok(None)
    }

    /// Detaches the Lambda ARN named by a persisted identifier.
    ///
    /// Always issues the remote call, whatever the prior local state;
    /// remote errors are surfaced with operation context.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ResourceError> {
        // Shared with the AWS integration account resource.
        let _guard = self.integration_aws_lock.acquire().await;

        let id: AttachmentId = id.parse()?;
        let request = AwsAccountAndLambdaRequest::new(id.account_id(), id.lambda_arn());
        self.api
            .delete_aws_lambda_arn(&request)
            .await
            .map_err(|e| ResourceError::api("deleting an AWS integration Lambda ARN", e))?;

        Ok(())
    }

    /// Imports an attachment from its identifier string
    /// (`"<account_id> <lambda_arn>"`): the identifier is taken as-is and
    /// the remote account consulted, exactly as a post-import refresh would.
    pub async fn import(&self, id: &str) -> Result<Option<LambdaArnAttachment>, ResourceError> {
        self.read(id).await
    }
}

fn check_for_unparsed(integrations: &[AwsLogsListEntry]) -> Result<(), ResourceError> {
    for integration in integrations {
        let fields = integration.unparsed_fields();
        if !fields.is_empty() {
            return Err(ResourceError::Unparsed {
                fields: fields.join(", "),
            });
        }
    }
    Ok(())
}
