//! Reference resolution
//!
//! [`Resolver`] turns declared environment variables into concrete values:
//! it collects the stack inventory (resources and exports concurrently),
//! then evaluates each variable's expression tree against that snapshot.
//!
//! Unresolvable references (`Ref`/`Fn::ImportValue` with no inventory match,
//! or a `Fn::GetAtt` against an unmapped resource kind) resolve to null with
//! a warning; the run keeps going. Provider request failures are not retried
//! and abort the whole run.

use futures::future::{self, BoxFuture, FutureExt};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::expression::{Expression, RefTarget};
use crate::inventory::{Inventory, StackResource};
use crate::mapping::MappingRegistry;
use crate::path;
use crate::provider::ProviderClient;

/// Variable name → resolved value. Null marks an unresolved reference.
/// Declaration order is preserved.
pub type ResolvedEnvironment = IndexMap<String, Value>;

/// Resolution behavior knobs, passed in at construction.
#[derive(Debug, Clone, Default)]
pub struct ResolverOptions {
    /// Emit the per-variable resolution trace at info instead of debug.
    pub verbose: bool,
}

/// The resolution engine.
pub struct Resolver<'a> {
    client: &'a dyn ProviderClient,
    registry: MappingRegistry,
    options: ResolverOptions,
}

impl<'a> Resolver<'a> {
    /// Create a resolver with the builtin mapping tables.
    pub fn new(client: &'a dyn ProviderClient) -> Self {
        Self {
            client,
            registry: MappingRegistry::with_builtins(),
            options: ResolverOptions::default(),
        }
    }

    /// Replace the mapping registry.
    pub fn with_registry(mut self, registry: MappingRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set resolution options.
    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Mutable access to the mapping registry, for registering additional
    /// service/kind mappings.
    pub fn registry_mut(&mut self) -> &mut MappingRegistry {
        &mut self.registry
    }

    /// Resolve every declared environment variable.
    ///
    /// Collects the inventory once, then evaluates each variable against it,
    /// preserving declaration order in the result. Returns either the
    /// complete mapping (some values possibly null) or the first fatal
    /// error; partial results are never returned.
    pub async fn resolve_all(
        &self,
        env: &IndexMap<String, Value>,
    ) -> Result<ResolvedEnvironment> {
        let inventory = Inventory::collect(self.client).await?;

        let mut resolved = IndexMap::with_capacity(env.len());
        for (name, declared) in env {
            let expression = Expression::from_value(declared)?;
            let value = self.evaluate(&expression, &inventory).await?;
            if self.options.verbose {
                log::info!("resolved environment variable {}: {}", name, value);
            } else {
                log::debug!("resolved environment variable {}: {}", name, value);
            }
            resolved.insert(name.clone(), value);
        }

        Ok(resolved)
    }

    /// Evaluate one expression against a collected inventory.
    pub async fn evaluate(&self, expression: &Expression, inventory: &Inventory) -> Result<Value> {
        self.evaluate_boxed(expression, inventory).await
    }

    // Recursion through Join parts needs the boxed form.
    fn evaluate_boxed<'e>(
        &'e self,
        expression: &'e Expression,
        inventory: &'e Inventory,
    ) -> BoxFuture<'e, Result<Value>> {
        async move {
            match expression {
                Expression::Literal(value) => Ok(value.clone()),
                Expression::Ref(RefTarget::Region) => Ok(Value::String(self.client.region())),
                Expression::Ref(RefTarget::AccountId) => {
                    Ok(Value::String(self.client.account_id().await?))
                }
                Expression::Ref(RefTarget::StackId) => Ok(inventory
                    .stack_id()
                    .map(|id| Value::String(id.to_string()))
                    .unwrap_or(Value::Null)),
                Expression::Ref(RefTarget::StackName) => {
                    Ok(Value::String(self.client.stack_name()))
                }
                Expression::Ref(RefTarget::LogicalId(logical_id)) => {
                    let physical = inventory
                        .resource(logical_id)
                        .and_then(|r| r.physical_resource_id.clone());
                    match physical {
                        Some(id) => Ok(Value::String(id)),
                        None => {
                            log::warn!("failed to resolve reference {}", logical_id);
                            Ok(Value::Null)
                        }
                    }
                }
                Expression::ImportValue(name) => match inventory.export(name) {
                    Some(export) => Ok(Value::String(export.value.clone())),
                    None => {
                        log::warn!("failed to resolve import value {}", name);
                        Ok(Value::Null)
                    }
                },
                Expression::Join { delimiter, parts } => {
                    // Parts are independent; evaluate concurrently.
                    // try_join_all keeps positional order regardless of
                    // completion order.
                    let resolved = future::try_join_all(
                        parts.iter().map(|part| self.evaluate_boxed(part, inventory)),
                    )
                    .await?;
                    let pieces: Vec<String> = resolved.iter().map(join_piece).collect();
                    Ok(Value::String(pieces.join(delimiter)))
                }
                Expression::GetAtt {
                    logical_id,
                    attribute,
                } => {
                    let resource = match inventory.resource(logical_id) {
                        Some(resource) => resource,
                        None => {
                            log::warn!(
                                "failed to resolve attribute {}.{}: resource is not in the stack",
                                logical_id,
                                attribute
                            );
                            return Ok(Value::Null);
                        }
                    };
                    match self.resolve_attribute(resource, attribute).await {
                        Ok(value) => Ok(value),
                        Err(err) if err.is_recoverable() => {
                            log::warn!(
                                "failed to resolve attribute {}.{}: {}",
                                logical_id,
                                attribute,
                                err
                            );
                            Ok(Value::Null)
                        }
                        Err(err) => Err(err),
                    }
                }
            }
        }
        .boxed()
    }

    /// Resolve one attribute of a stack resource via its registered mapping.
    ///
    /// Fails with [`Error::UnsupportedResourceType`] when no mapping covers
    /// the resource's kind. An attribute absent from the response is not an
    /// error here; it comes back as null.
    pub async fn resolve_attribute(
        &self,
        resource: &StackResource,
        attribute: &str,
    ) -> Result<Value> {
        let unsupported = || Error::UnsupportedResourceType {
            logical_id: resource.logical_resource_id.clone(),
            resource_type: resource.resource_type.clone(),
        };

        let mapping = self.registry.get(resource).ok_or_else(unsupported)?;
        let service = resource.service().ok_or_else(unsupported)?;

        let response = self
            .client
            .request(service, &mapping.operation, Value::Object(mapping.params.clone()))
            .await?;

        let attribute_path = mapping.attribute_path(attribute);
        Ok(path::lookup(&response, &attribute_path)?
            .cloned()
            .unwrap_or(Value::Null))
    }
}

// Join stringification: strings verbatim, null empty, other scalars and
// composites through their JSON rendering.
fn join_piece(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
