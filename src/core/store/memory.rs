use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{new_id, Entity, EstadoRepository, Repository, SoftDelete};
use crate::core::error::Result;
use crate::shared::types::Estado;

/// In-process store keyed by id.
///
/// Ids are UUID v7 strings, so key order is creation order.
pub struct MemoryStore<E> {
    rows: RwLock<BTreeMap<String, E>>,
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<E: Clone> MemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a row as-is, replacing any row with the same id
    pub async fn insert(&self, id: impl Into<String>, row: E) {
        self.rows.write().await.insert(id.into(), row);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    pub async fn all(&self) -> Vec<E> {
        self.rows.read().await.values().cloned().collect()
    }

    pub async fn find(&self, id: &str) -> Option<E> {
        self.rows.read().await.get(id).cloned()
    }

    /// Applies `change` to the row under the write lock and returns the result
    pub async fn modify<F>(&self, id: &str, change: F) -> Option<E>
    where
        F: FnOnce(&mut E) -> bool + Send,
    {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(id)?;
        if change(row) {
            Some(row.clone())
        } else {
            None
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryStore<E> {
    async fn list(&self, filter: &E::Filter) -> Result<Vec<E>> {
        let rows = self.rows.read().await;
        let mut listed: Vec<E> = rows.values().filter(|r| r.matches(filter)).cloned().collect();
        listed.sort_by(|a, b| a.listing_order(b));
        Ok(listed)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<E>> {
        Ok(self.find(id).await)
    }

    async fn create(&self, record: E::Record) -> Result<E> {
        let id = new_id();
        let row = E::from_record(id.clone(), record, Utc::now());
        self.rows.write().await.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: &str, record: E::Record) -> Result<Option<E>> {
        Ok(self
            .modify(id, |row| {
                if !row.accepts(&record) {
                    return false;
                }
                row.apply(record, Utc::now());
                true
            })
            .await)
    }
}

#[async_trait]
impl<E: SoftDelete> EstadoRepository<E> for MemoryStore<E> {
    async fn set_estado(&self, id: &str, estado: Estado) -> Result<Option<E>> {
        Ok(self
            .modify(id, |row| {
                row.set_estado(estado, Utc::now());
                true
            })
            .await)
    }
}
