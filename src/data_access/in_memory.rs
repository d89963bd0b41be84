//! InMemoryDataAccessor - volatile, process-lifetime entity store.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio_util::sync::CancellationToken;

use super::{DataAccessError, DataAccessor, PageRequest};
use crate::entity::Entity;
use crate::paginated::Paginated;

/// Entities of a single kind, in insertion order.
struct Collection<E> {
    entities: Vec<E>,
    /// Largest identifier this collection has ever held.
    high_water: i32,
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            high_water: 0,
        }
    }
}

impl<E: Entity> Collection<E> {
    fn position(&self, id: i32) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == id)
    }

    fn push(&mut self, mut entity: E) -> Result<i32, DataAccessError> {
        let id = self
            .high_water
            .checked_add(1)
            .ok_or(DataAccessError::IdentifiersExhausted { kind: E::KIND })?;
        entity.set_id(id);
        self.high_water = id;
        self.entities.push(entity);
        Ok(id)
    }

    /// Append seed entities, keeping identifiers already set and numbering
    /// the rest after the largest one.
    fn seed(&mut self, entities: Vec<E>) -> Result<(), DataAccessError> {
        let mut taken: HashSet<i32> = self.entities.iter().map(|e| e.id()).collect();
        for entity in entities.iter().filter(|e| e.is_persisted()) {
            if !taken.insert(entity.id()) {
                return Err(DataAccessError::DuplicateId {
                    kind: E::KIND,
                    id: entity.id(),
                });
            }
            self.high_water = self.high_water.max(entity.id());
        }

        for entity in entities {
            if entity.is_persisted() {
                self.entities.push(entity);
            } else {
                self.push(entity)?;
            }
        }
        Ok(())
    }
}

/// One collection per entity kind, keyed by the kind's `TypeId`.
#[derive(Default)]
struct Store {
    collections: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Store {
    fn collection<E: Entity>(&self) -> Option<&Collection<E>> {
        self.collections
            .get(&TypeId::of::<E>())
            .and_then(|c| c.downcast_ref::<Collection<E>>())
    }

    /// Collection of kind `E`, created empty on first use.
    fn collection_mut<E: Entity>(&mut self) -> Result<&mut Collection<E>, DataAccessError> {
        let boxed = self
            .collections
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Collection::<E>::default()));
        downcast_mut(boxed)
    }

    /// Collection of kind `E`, if anything of that kind was ever stored.
    fn existing_mut<E: Entity>(&mut self) -> Result<Option<&mut Collection<E>>, DataAccessError> {
        match self.collections.get_mut(&TypeId::of::<E>()) {
            Some(boxed) => downcast_mut(boxed).map(Some),
            None => Ok(None),
        }
    }

    fn entities<E: Entity>(&self) -> &[E] {
        self.collection::<E>()
            .map(|c| c.entities.as_slice())
            .unwrap_or(&[])
    }
}

fn downcast_mut<E: Entity>(
    boxed: &mut Box<dyn Any + Send + Sync>,
) -> Result<&mut Collection<E>, DataAccessError> {
    boxed
        .downcast_mut::<Collection<E>>()
        .ok_or_else(|| DataAccessError::Storage(format!("{} collection has a foreign type", E::KIND)))
}

/// In-memory data accessor holding every entity kind in one guarded store.
///
/// Writers take an exclusive guard and readers a shared one, so identifier
/// assignment never races. Clone-friendly via Arc: clones share the store.
#[derive(Clone, Default)]
pub struct InMemoryDataAccessor {
    store: Arc<RwLock<Store>>,
}

impl InMemoryDataAccessor {
    /// Create an empty accessor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accessor pre-populated with entities of one kind.
    ///
    /// Entities keep the identifiers they carry; those without one are
    /// numbered after the largest. Two entities sharing an identifier
    /// are rejected.
    pub fn with_entities<E, I>(entities: I) -> Result<Self, DataAccessError>
    where
        E: Entity,
        I: IntoIterator<Item = E>,
    {
        let mut store = Store::default();
        store
            .collection_mut::<E>()?
            .seed(entities.into_iter().collect())?;
        tracing::debug!(kind = E::KIND, count = store.entities::<E>().len(), "store seeded");
        Ok(Self {
            store: Arc::new(RwLock::new(store)),
        })
    }

    async fn read(
        &self,
        operation: &'static str,
        cancel: &CancellationToken,
    ) -> Result<RwLockReadGuard<'_, Store>, DataAccessError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DataAccessError::Cancelled { operation }),
            guard = self.store.read() => Ok(guard),
        }
    }

    async fn write(
        &self,
        operation: &'static str,
        cancel: &CancellationToken,
    ) -> Result<RwLockWriteGuard<'_, Store>, DataAccessError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DataAccessError::Cancelled { operation }),
            guard = self.store.write() => Ok(guard),
        }
    }
}

#[async_trait]
impl DataAccessor for InMemoryDataAccessor {
    async fn add<E: Entity>(
        &self,
        entity: E,
        cancel: &CancellationToken,
    ) -> Result<i32, DataAccessError> {
        let mut store = self.write("add", cancel).await?;
        let id = store.collection_mut::<E>()?.push(entity)?;
        tracing::debug!(kind = E::KIND, id, "entity added");
        Ok(id)
    }

    async fn add_unless<E, P>(
        &self,
        entity: E,
        conflict: P,
        cancel: &CancellationToken,
    ) -> Result<Option<i32>, DataAccessError>
    where
        E: Entity,
        P: Fn(&E) -> bool + Send + Sync,
    {
        let mut store = self.write("add_unless", cancel).await?;
        let collection = store.collection_mut::<E>()?;
        if collection.entities.iter().any(|e| conflict(e)) {
            tracing::debug!(kind = E::KIND, "add skipped, conflicting entity exists");
            return Ok(None);
        }
        let id = collection.push(entity)?;
        tracing::debug!(kind = E::KIND, id, "entity added");
        Ok(Some(id))
    }

    async fn remove_by_id<E: Entity>(
        &self,
        id: i32,
        cancel: &CancellationToken,
    ) -> Result<bool, DataAccessError> {
        let mut store = self.write("remove_by_id", cancel).await?;
        let Some(collection) = store.existing_mut::<E>()? else {
            return Ok(false);
        };
        match collection.position(id) {
            Some(index) => {
                collection.entities.remove(index);
                tracing::debug!(kind = E::KIND, id, "entity removed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_by_id<E: Entity>(
        &self,
        id: i32,
        cancel: &CancellationToken,
    ) -> Result<Option<E>, DataAccessError> {
        let store = self.read("get_by_id", cancel).await?;
        Ok(store.entities::<E>().iter().find(|e| e.id() == id).cloned())
    }

    async fn update<E: Entity>(
        &self,
        id: i32,
        mut entity: E,
        cancel: &CancellationToken,
    ) -> Result<bool, DataAccessError> {
        let mut store = self.write("update", cancel).await?;
        let Some(collection) = store.existing_mut::<E>()? else {
            return Ok(false);
        };
        let Some(index) = collection.position(id) else {
            return Ok(false);
        };
        entity.set_id(id);
        collection.entities[index] = entity;
        tracing::debug!(kind = E::KIND, id, "entity updated");
        Ok(true)
    }

    async fn get_paginated<E: Entity>(
        &self,
        request: PageRequest<E>,
        cancel: &CancellationToken,
    ) -> Result<Paginated<E>, DataAccessError> {
        if request.page_size == 0 {
            return Err(DataAccessError::InvalidArgument(
                "page size must be greater than zero".into(),
            ));
        }

        let store = self.read("get_paginated", cancel).await?;
        let mut matching: Vec<&E> = store
            .entities::<E>()
            .iter()
            .filter(|e| request.matches(e))
            .collect();
        let total_count = matching.len();

        // Stable sort: ties keep insertion order.
        matching.sort_by(|a, b| request.compare(a, b));

        let items = matching
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .cloned()
            .collect();

        Ok(Paginated::new(
            items,
            request.page_number,
            request.page_size,
            total_count,
        ))
    }

    async fn exists<E, P>(
        &self,
        predicate: P,
        cancel: &CancellationToken,
    ) -> Result<bool, DataAccessError>
    where
        E: Entity,
        P: Fn(&E) -> bool + Send + Sync,
    {
        let store = self.read("exists", cancel).await?;
        Ok(store.entities::<E>().iter().any(|e| predicate(e)))
    }

    async fn count<E: Entity>(&self, cancel: &CancellationToken) -> Result<usize, DataAccessError> {
        let store = self.read("count", cancel).await?;
        Ok(store.entities::<E>().len())
    }
}
