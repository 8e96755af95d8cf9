use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use lodestar_core::Result;

/// One GraphQL field resolver: the `(root, args) -> result | throws`
/// convention the execution engine consumes, with `serde_json::Value` as
/// the neutral value shape on both sides.
///
/// Resolvers are stateless between invocations; any number may be in
/// flight concurrently.
#[async_trait]
pub trait FieldResolver: Send + Sync {
    async fn resolve(&self, root: &Value, args: Value) -> Result<Value>;
}

/// Field name → resolver mapping handed to the execution engine.
///
/// Built once at startup, read-only afterwards.
#[derive(Default, Clone)]
pub struct ResolverMap {
    fields: HashMap<String, Arc<dyn FieldResolver>>,
}

impl ResolverMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, resolver: Arc<dyn FieldResolver>) {
        self.fields.insert(field.into(), resolver);
    }

    pub fn get(&self, field: &str) -> Option<&Arc<dyn FieldResolver>> {
        self.fields.get(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
