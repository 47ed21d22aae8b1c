//! AWS provider client for stackenv
//!
//! Implements [`ProviderClient`] over the official AWS SDK so the resolution
//! engine can read live stack inventory and resource attributes.
//!
//! Services are dispatched by name: CloudFormation (listings) and STS
//! (account id) are always available; Lambda and RDS sit behind the `lambda`
//! and `rds` cargo features (both default), matching the engine's builtin
//! mapping tables.
//!
//! # Example
//!
//! ```rust,ignore
//! let client = stackenv_aws::AwsProviderClient::builder()
//!     .stack_name("my-stack")
//!     .region("us-east-1")
//!     .build()
//!     .await?;
//!
//! let resolved = stackenv_core::Resolver::new(&client).resolve_all(&env).await?;
//! ```

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use serde_json::Value;
use stackenv_core::{Error, ProviderClient, Result};
use tokio::sync::OnceCell;

mod cloudformation;

#[cfg(feature = "lambda")]
mod lambda;

#[cfg(feature = "rds")]
mod rds;

/// Error building an [`AwsProviderClient`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The stack name was not set on the builder.
    #[error("stack name is required")]
    MissingStackName,
}

/// Builder for [`AwsProviderClient`].
///
/// Region and profile fall back to the SDK defaults (environment variables,
/// shared config) when unset; `endpoint` overrides the endpoint URL for
/// local testing against moto/LocalStack.
#[derive(Debug, Clone, Default)]
pub struct AwsProviderClientBuilder {
    stack_name: Option<String>,
    region: Option<String>,
    profile: Option<String>,
    endpoint: Option<String>,
}

impl AwsProviderClientBuilder {
    /// Set the deployment stack name (required).
    pub fn stack_name(mut self, stack_name: impl Into<String>) -> Self {
        self.stack_name = Some(stack_name.into());
        self
    }

    /// Override the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Use a specific AWS profile.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Override the endpoint URL (for moto/LocalStack).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Load AWS configuration and build the client.
    pub async fn build(self) -> std::result::Result<AwsProviderClient, BuildError> {
        let stack_name = self.stack_name.ok_or(BuildError::MissingStackName)?;

        let mut config_loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = self.region {
            config_loader = config_loader.region(aws_config::Region::new(region));
        }
        if let Some(profile) = self.profile {
            config_loader = config_loader.profile_name(profile);
        }
        if let Some(endpoint) = self.endpoint {
            config_loader = config_loader.endpoint_url(endpoint);
        }
        let config = config_loader.load().await;

        Ok(AwsProviderClient {
            region: config
                .region()
                .map(|r| r.to_string())
                .unwrap_or_default(),
            stack_name,
            account_id: OnceCell::new(),
            cloudformation: aws_sdk_cloudformation::Client::new(&config),
            sts: aws_sdk_sts::Client::new(&config),
            #[cfg(feature = "lambda")]
            lambda: aws_sdk_lambda::Client::new(&config),
            #[cfg(feature = "rds")]
            rds: aws_sdk_rds::Client::new(&config),
        })
    }
}

/// Provider client backed by the official AWS SDK.
///
/// One client per resolution stack; service clients share the loaded SDK
/// configuration and its connection pools. The account id is fetched from
/// STS once and cached for the client's lifetime.
pub struct AwsProviderClient {
    region: String,
    stack_name: String,
    account_id: OnceCell<String>,
    cloudformation: aws_sdk_cloudformation::Client,
    sts: aws_sdk_sts::Client,
    #[cfg(feature = "lambda")]
    lambda: aws_sdk_lambda::Client,
    #[cfg(feature = "rds")]
    rds: aws_sdk_rds::Client,
}

impl AwsProviderClient {
    /// Start building a client.
    pub fn builder() -> AwsProviderClientBuilder {
        AwsProviderClientBuilder::default()
    }
}

#[async_trait]
impl ProviderClient for AwsProviderClient {
    async fn request(&self, service: &str, operation: &str, params: Value) -> Result<Value> {
        match service {
            "CloudFormation" => {
                cloudformation::dispatch(&self.cloudformation, operation, &params).await
            }
            #[cfg(feature = "lambda")]
            "Lambda" => lambda::dispatch(&self.lambda, operation, &params).await,
            #[cfg(feature = "rds")]
            "RDS" => rds::dispatch(&self.rds, operation, &params).await,
            other => Err(Error::provider(
                other,
                operation,
                "service is not supported by this client",
            )),
        }
    }

    fn region(&self) -> String {
        self.region.clone()
    }

    async fn account_id(&self) -> Result<String> {
        let account = self
            .account_id
            .get_or_try_init(|| async {
                let output = self
                    .sts
                    .get_caller_identity()
                    .send()
                    .await
                    .map_err(|e| Error::provider("STS", "GetCallerIdentity", e.to_string()))?;
                output
                    .account()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        Error::invalid_response("GetCallerIdentity", "response has no account")
                    })
            })
            .await?;
        Ok(account.clone())
    }

    fn stack_name(&self) -> String {
        self.stack_name.clone()
    }
}

/// Extract a required string parameter from a request parameter object.
pub(crate) fn require_param<'a>(
    params: &'a Value,
    name: &str,
    service: &str,
    operation: &str,
) -> Result<&'a str> {
    params.get(name).and_then(Value::as_str).ok_or_else(|| {
        Error::provider(
            service,
            operation,
            format!("missing required parameter {}", name),
        )
    })
}

/// Optional continuation token from a request parameter object.
pub(crate) fn next_token(params: &Value) -> Option<String> {
    params
        .get("NextToken")
        .and_then(Value::as_str)
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sdk_config() -> aws_config::SdkConfig {
        aws_config::SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(aws_config::Region::new("us-east-1"))
            .build()
    }

    fn client() -> AwsProviderClient {
        let config = sdk_config();
        AwsProviderClient {
            region: "us-east-1".into(),
            stack_name: "test-stack".into(),
            account_id: OnceCell::new(),
            cloudformation: aws_sdk_cloudformation::Client::new(&config),
            sts: aws_sdk_sts::Client::new(&config),
            #[cfg(feature = "lambda")]
            lambda: aws_sdk_lambda::Client::new(&config),
            #[cfg(feature = "rds")]
            rds: aws_sdk_rds::Client::new(&config),
        }
    }

    #[tokio::test]
    async fn test_builder_requires_stack_name() {
        let result = AwsProviderClient::builder().build().await;
        assert!(matches!(result, Err(BuildError::MissingStackName)));
    }

    #[tokio::test]
    async fn test_unsupported_service() {
        let client = client();
        let result = client
            .request("DynamoDB", "DescribeTable", json!({}))
            .await;
        assert!(matches!(result, Err(Error::Provider { .. })));
    }

    #[tokio::test]
    async fn test_unsupported_operation() {
        let client = client();
        let result = client
            .request("CloudFormation", "DeleteStack", json!({}))
            .await;
        assert!(matches!(result, Err(Error::Provider { .. })));
    }

    #[tokio::test]
    async fn test_list_stack_resources_requires_stack_name_param() {
        let client = client();
        let result = client
            .request("CloudFormation", "ListStackResources", json!({}))
            .await;
        assert!(matches!(result, Err(Error::Provider { .. })));
    }

    #[test]
    fn test_accessors() {
        let client = client();
        assert_eq!(client.region(), "us-east-1");
        assert_eq!(client.stack_name(), "test-stack");
    }
}
