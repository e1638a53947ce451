//! Datadog AWS integration Lambda ARN resource.
//!
//! Declaratively manages the log collection Lambdas attached to an AWS
//! integration account: create attaches an ARN, read refreshes local state
//! against the remote account (clearing it when the attachment is gone),
//! delete detaches, and import rehydrates state from the persisted
//! identifier `"<account_id> <lambda_arn>"`. The remote API has no update
//! call, so any field change replaces the attachment.
//!
//! **Deprecated upstream**: new configurations should manage log collection
//! through the AWS integration account resource instead; see
//! [`schema::DEPRECATION_MESSAGE`].
//!
//! Both collaborators are injected rather than ambient: the API client (any
//! [`AwsLogsIntegrationApi`](datadog_aws_logs_client::AwsLogsIntegrationApi)
//! implementation) and the [`IntegrationAwsLock`] serializing mutations of
//! the account record with the sibling AWS integration account resource.
//!
//! # Example
//!
//! ```no_run
//! use datadog_aws_logs_client::AwsLogsClientBuilder;
//! use datadog_integration_aws_lambda_arn::{
//!     AttachmentConfig, AwsLambdaArnResource, IntegrationAwsLock,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AwsLogsClientBuilder::new()
//!         .with_api_key("api-key")
//!         .with_application_key("app-key")
//!         .build()?;
//!
//!     // One lock per process, shared with every resource that mutates the
//!     // same AWS integration account record.
//!     let lock = IntegrationAwsLock::new();
//!     let resource = AwsLambdaArnResource::new(client, lock);
//!
//!     let attachment = resource
//!         .create(&AttachmentConfig::new(
//!             "123456789012",
//!             "arn:aws:lambda:us-east-1:123456789012:function:datadog-forwarder",
//!         ))
//!         .await?;
//!     println!("created {}", attachment.id());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod id;
pub mod lock;
pub mod resource;
pub mod schema;

pub use error::ResourceError;
pub use id::AttachmentId;
pub use lock::IntegrationAwsLock;
pub use resource::{AttachmentConfig, AwsLambdaArnResource, LambdaArnAttachment};

#[cfg(test)]
mod tests {
    use super::*;

    use datadog_aws_logs_client::{AwsLogsClient, AwsLogsClientBuilder};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ACCOUNT_ID: &str = "123456789012";
    const LAMBDA_ARN: &str = "arn:aws:lambda:us-east-1:123456789012:function:fwd";

    fn init_test_tracing() {
        use tracing_subscriber::EnvFilter;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    fn resource_against(server: &MockServer) -> AwsLambdaArnResource<AwsLogsClient> {
        let client = AwsLogsClientBuilder::new()
            .with_api_key("test-api-key")
            .with_application_key("test-app-key")
            .with_site(server.uri())
            .build()
            .expect("failed to build client");
        AwsLambdaArnResource::new(client, IntegrationAwsLock::new())
    }

    #[tokio::test]
    async fn lifecycle_against_mock_api() {
        init_test_tracing();
        let server = MockServer::start().await;
        let resource = resource_against(&server);
        let id = format!("{} {}", ACCOUNT_ID, LAMBDA_ARN);

        // Phase 1: attach succeeds and the list reflects the attachment.
        Mock::given(method("POST"))
            .and(path("/api/v1/integration/aws/logs"))
            .and(body_json(json!({
                "account_id": ACCOUNT_ID,
                "lambda_arn": LAMBDA_ARN,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/integration/aws/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "account_id": ACCOUNT_ID,
                    "lambdas": [{"arn": LAMBDA_ARN}],
                    "services": ["s3"],
                },
            ])))
            .mount(&server)
            .await;

        let attachment = resource
            .create(&AttachmentConfig::new(ACCOUNT_ID, LAMBDA_ARN))
            .await
            .unwrap();
        assert_eq!(attachment.id().to_string(), id);

        let read_back = resource.read(&id).await.unwrap().unwrap();
        assert_eq!(read_back, attachment);

        // Phase 2: detach, after which the account lists no Lambdas.
        server.reset().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/integration/aws/logs"))
            .and(body_json(json!({
                "account_id": ACCOUNT_ID,
                "lambda_arn": LAMBDA_ARN,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/integration/aws/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "account_id": ACCOUNT_ID,
                    "lambdas": [],
                    "services": ["s3"],
                },
            ])))
            .mount(&server)
            .await;

        resource.delete(&id).await.unwrap();
        assert!(resource.read(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_fails_when_remote_never_shows_the_attachment() {
        init_test_tracing();
        let server = MockServer::start().await;
        let resource = resource_against(&server);

        Mock::given(method("POST"))
            .and(path("/api/v1/integration/aws/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        // Read-after-write lag: the list never catches up.
        Mock::given(method("GET"))
            .and(path("/api/v1/integration/aws/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = resource
            .create(&AttachmentConfig::new(ACCOUNT_ID, LAMBDA_ARN))
            .await
            .unwrap_err();

        assert!(matches!(err, ResourceError::NotFoundAfterCreation { .. }));
    }

    #[tokio::test]
    async fn import_round_trips_through_the_mock_api() {
        init_test_tracing();
        let server = MockServer::start().await;
        let resource = resource_against(&server);

        Mock::given(method("GET"))
            .and(path("/api/v1/integration/aws/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "account_id": ACCOUNT_ID,
                    "lambdas": [{"arn": LAMBDA_ARN}],
                    "services": [],
                },
            ])))
            .mount(&server)
            .await;

        let imported = resource
            .import(&format!("{} {}", ACCOUNT_ID, LAMBDA_ARN))
            .await
            .unwrap()
            .expect("import should find the attachment");

        assert_eq!(imported.account_id, ACCOUNT_ID);
        assert_eq!(imported.lambda_arn, LAMBDA_ARN);
    }
}
