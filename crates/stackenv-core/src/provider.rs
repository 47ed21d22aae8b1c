//! Provider client boundary
//!
//! The engine never talks to the network itself. Everything it needs from the
//! cloud provider goes through [`ProviderClient`]: a generic request channel
//! plus the handful of deployment facts (region, account, stack name) that
//! pseudo-parameters resolve to.
//!
//! The engine does not retry provider failures; throttling and auth errors
//! surface as [`Error::Provider`](crate::Error::Provider) and abort the run
//! when they hit a listing call.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Async boundary to the cloud provider.
///
/// Implementations own transport, authentication, and low-level retries.
/// `stackenv-aws` provides one backed by the official SDK; tests script one.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Issue a single read operation against a provider service.
    ///
    /// `service` is the provider service name (e.g. "CloudFormation",
    /// "Lambda"), `operation` the read operation (e.g. "ListExports"), and
    /// `params` a JSON object of request parameters. The response is returned
    /// as untyped JSON so mappings can address it with response paths.
    async fn request(&self, service: &str, operation: &str, params: Value) -> Result<Value>;

    /// The region the stack is deployed into.
    fn region(&self) -> String;

    /// The account the stack is deployed into. Typically a provider call
    /// (STS GetCallerIdentity), hence async and fallible.
    async fn account_id(&self) -> Result<String>;

    /// The configured stack name. Known locally, no provider call.
    fn stack_name(&self) -> String;
}
