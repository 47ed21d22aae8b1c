//! RDS read operations
//!
//! Both describes are single-identifier queries, but the API answers with a
//! list; the engine's mappings index into it with a `[0]` return path.

use aws_sdk_rds::types::{DbCluster, DbInstance};
use aws_sdk_rds::Client;
use serde_json::{json, Value};
use stackenv_core::{Error, Result};

use crate::require_param;

const SERVICE: &str = "RDS";
const DESCRIBE_DB_CLUSTERS: &str = "DescribeDBClusters";
const DESCRIBE_DB_INSTANCES: &str = "DescribeDBInstances";

pub(crate) async fn dispatch(client: &Client, operation: &str, params: &Value) -> Result<Value> {
    match operation {
        DESCRIBE_DB_CLUSTERS => describe_db_clusters(client, params).await,
        DESCRIBE_DB_INSTANCES => describe_db_instances(client, params).await,
        other => Err(Error::provider(
            SERVICE,
            other,
            "operation is not supported by this client",
        )),
    }
}

async fn describe_db_clusters(client: &Client, params: &Value) -> Result<Value> {
    let identifier = require_param(params, "DBClusterIdentifier", SERVICE, DESCRIBE_DB_CLUSTERS)?;

    let output = client
        .describe_db_clusters()
        .db_cluster_identifier(identifier)
        .send()
        .await
        .map_err(|e| Error::provider(SERVICE, DESCRIBE_DB_CLUSTERS, e.to_string()))?;

    let clusters: Vec<Value> = output.db_clusters().iter().map(cluster_json).collect();
    Ok(json!({ "DBClusters": clusters }))
}

async fn describe_db_instances(client: &Client, params: &Value) -> Result<Value> {
    let identifier = require_param(params, "DBInstanceIdentifier", SERVICE, DESCRIBE_DB_INSTANCES)?;

    let output = client
        .describe_db_instances()
        .db_instance_identifier(identifier)
        .send()
        .await
        .map_err(|e| Error::provider(SERVICE, DESCRIBE_DB_INSTANCES, e.to_string()))?;

    let instances: Vec<Value> = output.db_instances().iter().map(instance_json).collect();
    Ok(json!({ "DBInstances": instances }))
}

fn cluster_json(cluster: &DbCluster) -> Value {
    json!({
        "DBClusterIdentifier": cluster.db_cluster_identifier(),
        "DBClusterArn": cluster.db_cluster_arn(),
        "Engine": cluster.engine(),
        "Endpoint": cluster.endpoint(),
        "ReaderEndpoint": cluster.reader_endpoint(),
        "Port": cluster.port(),
    })
}

fn instance_json(instance: &DbInstance) -> Value {
    json!({
        "DBInstanceIdentifier": instance.db_instance_identifier(),
        "DBInstanceArn": instance.db_instance_arn(),
        "Engine": instance.engine(),
        "Endpoint": instance.endpoint().map(|endpoint| json!({
            "Address": endpoint.address(),
            "Port": endpoint.port(),
            "HostedZoneId": endpoint.hosted_zone_id(),
        })),
    })
}
