use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use models::{Entity, Id};

use crate::errors::ServiceError;
use crate::storage::JsonFileDb;

/// Trait abstraction for per-entity storage.
/// Business services hold an `Arc<dyn EntityStore<E>>`, so tests can swap in any backend.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn insert(&self, record: E) -> Result<E, ServiceError>;
    async fn get(&self, id: Id) -> Result<Option<E>, ServiceError>;
    async fn list(&self) -> Result<Vec<E>, ServiceError>;
    async fn update(&self, id: Id, patch: E::Patch) -> Result<Option<E>, ServiceError>;
    async fn delete(&self, id: Id) -> Result<bool, ServiceError>;
}

/// Typed view of one table in a [`JsonFileDb`].
pub struct Table<E> {
    db: Arc<JsonFileDb>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Table<E> {
    pub fn new(db: Arc<JsonFileDb>) -> Arc<Self> {
        Arc::new(Self { db, _entity: PhantomData })
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for Table<E> {
    async fn insert(&self, record: E) -> Result<E, ServiceError> { self.db.insert(record).await }
    async fn get(&self, id: Id) -> Result<Option<E>, ServiceError> { self.db.get(id).await }
    async fn list(&self) -> Result<Vec<E>, ServiceError> { self.db.list().await }
    async fn update(&self, id: Id, patch: E::Patch) -> Result<Option<E>, ServiceError> { self.db.update(id, patch).await }
    async fn delete(&self, id: Id) -> Result<bool, ServiceError> { self.db.delete::<E>(id).await }
}
