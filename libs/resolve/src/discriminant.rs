//! Type-discriminant injection
//!
//! The RPC layer returns a single concrete shape, but some schema fields
//! are typed as an interface with several implementations. Until the
//! modules expose their own discriminant, the bridge tags results itself:
//! [`Tagged`] wraps a resolver and merges a `__typename` field into
//! successful object results. This is an explicit stand-in, not a
//! substitute for server-side discrimination; see DESIGN.md.

use async_trait::async_trait;
use serde_json::Value;

use lodestar_core::Result;

use crate::resolver::FieldResolver;

/// Field name the execution engine reads the concrete type from.
pub const TYPENAME_FIELD: &str = "__typename";

/// Resolver wrapper attaching a concrete-type discriminant.
///
/// Identical input contract to the wrapped resolver. On success, object
/// results gain `__typename` (existing fields untouched; an already
/// present `__typename` wins); non-object results pass through unchanged.
/// Errors propagate unchanged with no discriminant attached.
pub struct Tagged<R> {
    type_name: &'static str,
    inner: R,
}

impl<R> Tagged<R> {
    pub fn new(type_name: &'static str, inner: R) -> Self {
        Self { type_name, inner }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

#[async_trait]
impl<R: FieldResolver> FieldResolver for Tagged<R> {
    async fn resolve(&self, root: &Value, args: Value) -> Result<Value> {
        let mut value = self.inner.resolve(root, args).await?;
        if let Value::Object(map) = &mut value {
            map.entry(TYPENAME_FIELD.to_string())
                .or_insert_with(|| Value::String(self.type_name.to_string()));
        }
        Ok(value)
    }
}
