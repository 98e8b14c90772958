//! Data access contracts shared by every catalog feature.
//!
//! Features implement [`Repository`] once against PostgreSQL; the generic
//! [`MemoryStore`] implements it for any [`Entity`], which is what the test
//! suite and `DATABASE_URL=memory` run on.

mod memory;

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::Result;
use crate::shared::types::Estado;

pub use memory::MemoryStore;

/// A persisted catalog row that can be built from, and replaced by, a
/// validated record.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Validated payload for create and full update
    type Record: Clone + Send + Sync + 'static;
    /// List filter; every field optional
    type Filter: Send + Sync;

    fn from_record(id: String, record: Self::Record, now: DateTime<Utc>) -> Self;

    /// Full replacement of every editable field
    fn apply(&mut self, record: Self::Record, now: DateTime<Utc>);

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Whether `record` may replace this row. Rows scoped by a discriminator
    /// (category family) refuse records of another scope.
    fn accepts(&self, _record: &Self::Record) -> bool {
        true
    }

    /// Order of `list` results relative to id order, matching the SQL
    /// `ORDER BY` of the feature's repository. Ties keep id order.
    fn listing_order(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }
}

/// Entities deactivated instead of deleted
pub trait SoftDelete: Entity {
    fn set_estado(&mut self, estado: Estado, now: DateTime<Utc>);
}

/// One async function per (entity, operation) pair.
///
/// Each call is a single atomic statement against the store. `None` means the
/// id does not exist.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn list(&self, filter: &E::Filter) -> Result<Vec<E>>;

    async fn get_by_id(&self, id: &str) -> Result<Option<E>>;

    async fn create(&self, record: E::Record) -> Result<E>;

    async fn update(&self, id: &str, record: E::Record) -> Result<Option<E>>;
}

#[async_trait]
pub trait EstadoRepository<E: SoftDelete>: Repository<E> {
    async fn set_estado(&self, id: &str, estado: Estado) -> Result<Option<E>>;
}

/// New server-assigned identifier (time-ordered UUID v7, as text)
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
