//! CloudFormation listing operations
//!
//! Serves the engine's two inventory listings. Responses are reshaped into
//! the provider wire form (`StackResourceSummaries`, `Exports`, `NextToken`)
//! that the collector consumes.
//!
//! `ListStackResources` summaries carry no `StackId` on the wire, so
//! `Ref: AWS::StackId` resolves to null through this client.

use aws_sdk_cloudformation::Client;
use serde_json::{json, Value};
use stackenv_core::{Error, Result};

use crate::{next_token, require_param};

const SERVICE: &str = "CloudFormation";
const LIST_STACK_RESOURCES: &str = "ListStackResources";
const LIST_EXPORTS: &str = "ListExports";

pub(crate) async fn dispatch(client: &Client, operation: &str, params: &Value) -> Result<Value> {
    match operation {
        LIST_STACK_RESOURCES => list_stack_resources(client, params).await,
        LIST_EXPORTS => list_exports(client, params).await,
        other => Err(Error::provider(
            SERVICE,
            other,
            "operation is not supported by this client",
        )),
    }
}

async fn list_stack_resources(client: &Client, params: &Value) -> Result<Value> {
    let stack_name = require_param(params, "StackName", SERVICE, LIST_STACK_RESOURCES)?;

    let output = client
        .list_stack_resources()
        .stack_name(stack_name)
        .set_next_token(next_token(params))
        .send()
        .await
        .map_err(|e| Error::provider(SERVICE, LIST_STACK_RESOURCES, e.to_string()))?;

    let summaries: Vec<Value> = output
        .stack_resource_summaries()
        .iter()
        .map(|summary| {
            json!({
                "LogicalResourceId": summary.logical_resource_id(),
                "PhysicalResourceId": summary.physical_resource_id(),
                "ResourceType": summary.resource_type(),
            })
        })
        .collect();

    let mut response = json!({ "StackResourceSummaries": summaries });
    if let Some(token) = output.next_token() {
        response["NextToken"] = json!(token);
    }
    Ok(response)
}

async fn list_exports(client: &Client, params: &Value) -> Result<Value> {
    let output = client
        .list_exports()
        .set_next_token(next_token(params))
        .send()
        .await
        .map_err(|e| Error::provider(SERVICE, LIST_EXPORTS, e.to_string()))?;

    let exports: Vec<Value> = output
        .exports()
        .iter()
        .map(|export| {
            json!({
                "Name": export.name(),
                "Value": export.value(),
            })
        })
        .collect();

    let mut response = json!({ "Exports": exports });
    if let Some(token) = output.next_token() {
        response["NextToken"] = json!(token);
    }
    Ok(response)
}
