//! stackenv-core: CloudFormation reference resolution for environment variables
//!
//! Deployment configurations declare environment variables whose values are
//! CloudFormation intrinsics rather than plain strings:
//!
//! ```yaml
//! environment:
//!   QUEUE_ARN: { Ref: MyQueue }
//!   BUCKET: { "Fn::ImportValue": SharedBucket }
//!   DB_HOST: { "Fn::GetAtt": [MyDatabase, Endpoint.Address] }
//!   ENDPOINT: { "Fn::Join": ["", ["https://", { Ref: "AWS::Region" }, ".example.com"]] }
//! ```
//!
//! This crate resolves such declarations into a flat name → value mapping by
//! querying the stack's live resource inventory. It is read-only: resources
//! are never created, mutated, or deleted.
//!
//! The provider transport is behind the [`ProviderClient`] trait; the
//! `stackenv-aws` crate implements it over the official SDK.
//!
//! # Example
//!
//! ```rust,ignore
//! use indexmap::IndexMap;
//! use serde_json::json;
//! use stackenv_core::Resolver;
//!
//! let client = stackenv_aws::AwsProviderClient::builder()
//!     .stack_name("my-stack")
//!     .build()
//!     .await?;
//!
//! let mut env = IndexMap::new();
//! env.insert("QUEUE_ARN".to_string(), json!({"Ref": "MyQueue"}));
//!
//! let resolved = Resolver::new(&client).resolve_all(&env).await?;
//! ```

pub mod error;
pub mod expression;
pub mod inventory;
pub mod mapping;
pub mod path;
pub mod provider;
pub mod resolver;

mod mappings;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};
pub use expression::{Expression, RefTarget};
pub use inventory::{Inventory, StackExport, StackResource};
pub use mapping::{MappingFn, MappingRegistry, ResourceMapping};
pub use provider::ProviderClient;
pub use resolver::{ResolvedEnvironment, Resolver, ResolverOptions};
