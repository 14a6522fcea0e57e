//! Objects whose methods can be routed through the method cache.

use async_trait::async_trait;
use serde_json::Value;

/// An object exposing named methods with positional JSON arguments.
///
/// Implementors list their methods explicitly instead of relying on
/// reflection; [`MethodCache::dispatch`](crate::method::MethodCache::dispatch)
/// only calls `call` for names `has_method` accepts.
#[async_trait]
pub trait CacheTarget: Send + Sync {
    /// Class name used in cache keys, namespace separators allowed.
    fn class_name(&self) -> &str;

    fn has_method(&self, method: &str) -> bool;

    /// Invokes `method` with the arguments in call order.
    async fn call(&self, method: &str, args: &[Value]) -> anyhow::Result<Value>;
}
