//! RDS attribute mappings
//!
//! The RDS describe operations return a list even when queried by a single
//! identifier, so both mappings carry a `[0]` return path.

use crate::inventory::StackResource;
use crate::mapping::{MappingRegistry, ResourceMapping};

pub(crate) fn register(registry: &mut MappingRegistry) {
    registry.register("RDS", "DBCluster", cluster);
    registry.register("RDS", "DBInstance", instance);
}

fn cluster(resource: &StackResource) -> ResourceMapping {
    ResourceMapping::new("DescribeDBClusters")
        .with_param("DBClusterIdentifier", physical_id(resource))
        .with_return_path("DBClusters[0]")
}

fn instance(resource: &StackResource) -> ResourceMapping {
    ResourceMapping::new("DescribeDBInstances")
        .with_param("DBInstanceIdentifier", physical_id(resource))
        .with_return_path("DBInstances[0]")
}

fn physical_id(resource: &StackResource) -> String {
    resource.physical_resource_id.clone().unwrap_or_default()
}
