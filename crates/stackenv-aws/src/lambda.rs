//! Lambda read operations

use aws_sdk_lambda::Client;
use serde_json::{json, Value};
use stackenv_core::{Error, Result};

use crate::require_param;

const SERVICE: &str = "Lambda";
const GET_FUNCTION_CONFIGURATION: &str = "GetFunctionConfiguration";

pub(crate) async fn dispatch(client: &Client, operation: &str, params: &Value) -> Result<Value> {
    match operation {
        GET_FUNCTION_CONFIGURATION => get_function_configuration(client, params).await,
        other => Err(Error::provider(
            SERVICE,
            other,
            "operation is not supported by this client",
        )),
    }
}

async fn get_function_configuration(client: &Client, params: &Value) -> Result<Value> {
    let function_name = require_param(params, "FunctionName", SERVICE, GET_FUNCTION_CONFIGURATION)?;

    let output = client
        .get_function_configuration()
        .function_name(function_name)
        .send()
        .await
        .map_err(|e| Error::provider(SERVICE, GET_FUNCTION_CONFIGURATION, e.to_string()))?;

    Ok(json!({
        "FunctionName": output.function_name(),
        "FunctionArn": output.function_arn(),
        "Role": output.role(),
        "Handler": output.handler(),
        "Runtime": output.runtime().map(|r| r.as_str()),
        "MemorySize": output.memory_size(),
        "Timeout": output.timeout(),
        "Version": output.version(),
        "LastModified": output.last_modified(),
    }))
}
