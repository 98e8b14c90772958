use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

/// Query-string filter of a list query, kept ordered so equal filters share a key
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListFilter(BTreeMap<String, String>);

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only active records (`activo=true`)
    pub fn activos() -> Self {
        Self::new().with("activo", "true")
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn scope(&self) -> String {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("list?{}", parts.join("&"))
    }
}

/// Cache key: the resource namespace plus what was asked of it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: String,
    pub scope: String,
}

impl QueryKey {
    pub fn list(resource: &str, filter: &ListFilter) -> Self {
        Self {
            resource: resource.to_string(),
            scope: filter.scope(),
        }
    }

    pub fn item(resource: &str, id: &str) -> Self {
        Self {
            resource: resource.to_string(),
            scope: format!("item/{}", id),
        }
    }
}

/// Results of successful queries, dropped per resource after a mutation
#[derive(Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, serde_json::Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.entries.read().await;
        let value = entries.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(data) => {
                tracing::debug!("Query cache hit: {}/{}", key.resource, key.scope);
                Some(data)
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable cache entry {}: {}", key.scope, e);
                None
            }
        }
    }

    pub async fn put<T: Serialize>(&self, key: QueryKey, data: &T) {
        match serde_json::to_value(data) {
            Ok(value) => {
                self.entries.write().await.insert(key, value);
            }
            Err(e) => tracing::warn!("Query result not cached: {}", e),
        }
    }

    /// Drops every entry of `resource`, returning how many were removed
    pub async fn invalidate_resource(&self, resource: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| key.resource != resource);
        let removed = before - entries.len();
        tracing::debug!("Invalidated {} cached queries of {}", removed, resource);
        removed
    }

    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_order_does_not_change_key() {
        let a = ListFilter::new().with("activo", "true").with("id_categoria", "c1");
        let b = ListFilter::new().with("id_categoria", "c1").with("activo", "true");
        assert_eq!(QueryKey::list("insumos", &a), QueryKey::list("insumos", &b));
        assert_ne!(
            QueryKey::list("insumos", &a),
            QueryKey::list("insumos", &ListFilter::new())
        );
    }

    #[tokio::test]
    async fn test_invalidate_only_touches_one_resource() {
        let cache = QueryCache::new();
        cache
            .put(QueryKey::list("insumos", &ListFilter::new()), &vec![1, 2])
            .await;
        cache.put(QueryKey::item("insumos", "a"), &1).await;
        cache
            .put(QueryKey::list("productos", &ListFilter::activos()), &vec![3])
            .await;

        assert_eq!(cache.invalidate_resource("insumos").await, 2);
        assert_eq!(cache.len().await, 1);
        let productos: Option<Vec<i32>> = cache
            .get(&QueryKey::list("productos", &ListFilter::activos()))
            .await;
        assert_eq!(productos, Some(vec![3]));
    }

    #[tokio::test]
    async fn test_type_mismatch_is_a_miss() {
        let cache = QueryCache::new();
        let key = QueryKey::item("usuarios", "u1");
        cache.put(key.clone(), &"texto").await;
        assert_eq!(cache.get::<i32>(&key).await, None);
        assert!(cache.contains(&key).await);
    }
}
