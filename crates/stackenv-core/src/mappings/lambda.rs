//! Lambda attribute mappings

use crate::inventory::StackResource;
use crate::mapping::{MappingRegistry, ResourceMapping};

pub(crate) fn register(registry: &mut MappingRegistry) {
    registry.register("Lambda", "Function", function);
    registry.register("Lambda", "Version", version);
}

fn function(resource: &StackResource) -> ResourceMapping {
    ResourceMapping::new("GetFunctionConfiguration")
        .with_param("FunctionName", physical_id(resource))
        .with_attribute_alias("Arn", "FunctionArn")
}

// Versions answer the same read as functions; the physical id carries the
// version qualifier.
fn version(resource: &StackResource) -> ResourceMapping {
    ResourceMapping::new("GetFunctionConfiguration")
        .with_param("FunctionName", physical_id(resource))
}

fn physical_id(resource: &StackResource) -> String {
    resource.physical_resource_id.clone().unwrap_or_default()
}
