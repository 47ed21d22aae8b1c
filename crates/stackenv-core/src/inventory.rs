//! Stack inventory collection
//!
//! Fetches the full list of stack resources and cross-stack exports through
//! the provider's paginated listing operations. The two listings are
//! independent and run concurrently; pagination within one listing is
//! sequential because each page depends on the previous continuation token.
//! The collected [`Inventory`] is an immutable snapshot for the rest of the
//! resolution run.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::provider::ProviderClient;

const CLOUDFORMATION: &str = "CloudFormation";
const LIST_STACK_RESOURCES: &str = "ListStackResources";
const LIST_EXPORTS: &str = "ListExports";

/// One resource deployed by the current stack.
///
/// `physical_resource_id` and `stack_id` are optional because listing pages
/// may omit them; a resource without a physical id resolves like a missing
/// resource (null plus a warning).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackResource {
    pub logical_resource_id: String,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    /// Provider-qualified type, e.g. `AWS::Lambda::Function`
    pub resource_type: String,
    #[serde(default)]
    pub stack_id: Option<String>,
}

impl StackResource {
    /// Service segment of the resource type (`AWS::Lambda::Function` → `Lambda`)
    pub fn service(&self) -> Option<&str> {
        self.resource_type.split("::").nth(1)
    }

    /// Kind segment of the resource type (`AWS::Lambda::Function` → `Function`)
    pub fn kind(&self) -> Option<&str> {
        self.resource_type.split("::").nth(2)
    }
}

/// A named value the stack's region/account publishes for cross-stack use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackExport {
    pub name: String,
    pub value: String,
}

/// Immutable snapshot of the stack's resources and exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub resources: Vec<StackResource>,
    pub exports: Vec<StackExport>,
}

impl Inventory {
    /// Collect the full inventory for the client's stack.
    ///
    /// Resource and export listings run concurrently; either failing fails
    /// the collection.
    pub async fn collect(client: &dyn ProviderClient) -> Result<Inventory> {
        let (resources, exports) =
            tokio::try_join!(list_stack_resources(client), list_exports(client))?;
        Ok(Inventory { resources, exports })
    }

    /// First resource with the given logical id.
    pub fn resource(&self, logical_id: &str) -> Option<&StackResource> {
        self.resources
            .iter()
            .find(|r| r.logical_resource_id == logical_id)
    }

    /// First export with the given name.
    pub fn export(&self, name: &str) -> Option<&StackExport> {
        self.exports.iter().find(|e| e.name == name)
    }

    /// StackId of the first collected resource. All resources of one stack
    /// share a StackId, so the first is an arbitrary but deterministic pick.
    pub fn stack_id(&self) -> Option<&str> {
        self.resources.first()?.stack_id.as_deref()
    }
}

/// Drain one paginated listing into a single sequence.
///
/// Issues `operation` repeatedly, threading `NextToken` through, until a
/// page comes back without a token. A page lacking `page_key` counts as
/// empty; the token logic still applies.
async fn paginate<T>(
    client: &dyn ProviderClient,
    operation: &str,
    base_params: serde_json::Map<String, Value>,
    page_key: &str,
) -> Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    let mut items = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
        let mut params = base_params.clone();
        if let Some(token) = &next_token {
            params.insert("NextToken".into(), Value::String(token.clone()));
        }

        let response = client
            .request(CLOUDFORMATION, operation, Value::Object(params))
            .await?;

        if let Some(page) = response.get(page_key).and_then(Value::as_array) {
            for item in page {
                let parsed = serde_json::from_value(item.clone())
                    .map_err(|e| Error::invalid_response(operation, e.to_string()))?;
                items.push(parsed);
            }
        }

        next_token = response
            .get("NextToken")
            .and_then(Value::as_str)
            .map(String::from);
        if next_token.is_none() {
            break;
        }
    }

    Ok(items)
}

async fn list_stack_resources(client: &dyn ProviderClient) -> Result<Vec<StackResource>> {
    let mut params = serde_json::Map::new();
    params.insert("StackName".into(), Value::String(client.stack_name()));
    paginate(
        client,
        LIST_STACK_RESOURCES,
        params,
        "StackResourceSummaries",
    )
    .await
}

async fn list_exports(client: &dyn ProviderClient) -> Result<Vec<StackExport>> {
    paginate(client, LIST_EXPORTS, serde_json::Map::new(), "Exports").await
}
