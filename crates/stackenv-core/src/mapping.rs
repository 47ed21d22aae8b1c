//! Resource attribute mappings
//!
//! CloudFormation's listing API only hands back logical and physical ids, so
//! attribute lookups (`Fn::GetAtt`) need a per-kind recipe: which read
//! operation to call, with what parameters, and where in the response the
//! requested attribute lives. [`MappingRegistry`] holds those recipes, one
//! sub-table per service keyed by resource kind. Unknown kinds yield no
//! mapping; the caller treats that as "attribute cannot be resolved", not as
//! a hard failure.
//!
//! The registry is open for extension: registering a new service/kind never
//! touches the evaluator or driver.

use std::collections::HashMap;

use serde_json::Value;

use crate::inventory::StackResource;
use crate::mappings;

/// Builds the mapping for one resource kind from the concrete resource.
pub type MappingFn = fn(&StackResource) -> ResourceMapping;

/// Recipe for reading one resource kind's attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceMapping {
    /// Read operation to call on the resource's service
    pub operation: String,
    /// Request parameters, templated with the resource's physical id
    pub params: serde_json::Map<String, Value>,
    /// Sub-path into a list-shaped response (e.g. `DBInstances[0]`);
    /// some provider APIs return arrays even for a single-identifier query
    pub return_path: Option<String>,
    /// Requested attribute name → response field name (e.g. Arn → FunctionArn)
    pub attributes: HashMap<String, String>,
}

impl ResourceMapping {
    /// Create a mapping for the given read operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            params: serde_json::Map::new(),
            return_path: None,
            attributes: HashMap::new(),
        }
    }

    /// Add a request parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set the sub-path to index into a list-shaped response.
    pub fn with_return_path(mut self, path: impl Into<String>) -> Self {
        self.return_path = Some(path.into());
        self
    }

    /// Alias a requested attribute name to its response field name.
    pub fn with_attribute_alias(
        mut self,
        requested: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        self.attributes.insert(requested.into(), field.into());
        self
    }

    /// Effective response path for a requested attribute: the alias (or the
    /// attribute name verbatim when no alias exists), prefixed with the
    /// return path when one is set.
    pub fn attribute_path(&self, attribute: &str) -> String {
        let field = self
            .attributes
            .get(attribute)
            .map(String::as_str)
            .unwrap_or(attribute);
        match &self.return_path {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        }
    }
}

/// Registry of attribute mappings, one sub-table per service.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    services: HashMap<String, HashMap<String, MappingFn>>,
}

impl MappingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the builtin service tables (Lambda, RDS).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        mappings::lambda::register(&mut registry);
        mappings::rds::register(&mut registry);
        registry
    }

    /// Register a mapping for a (service, kind) pair, replacing any
    /// previous registration.
    pub fn register(&mut self, service: impl Into<String>, kind: impl Into<String>, f: MappingFn) {
        self.services
            .entry(service.into())
            .or_default()
            .insert(kind.into(), f);
    }

    /// Mapping for the resource's kind, or `None` when the service or kind
    /// is not registered (including malformed resource types).
    pub fn get(&self, resource: &StackResource) -> Option<ResourceMapping> {
        let service = resource.service()?;
        let kind = resource.kind()?;
        let f = self.services.get(service)?.get(kind)?;
        Some(f(resource))
    }
}
