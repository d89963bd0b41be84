//! EntityRepository - Typed handle over one entity kind of a DataAccessor.

use std::marker::PhantomData;

use tokio_util::sync::CancellationToken;

use super::{DataAccessError, DataAccessor, PageRequest};
use crate::entity::Entity;
use crate::paginated::Paginated;

/// Typed repository wrapper for accessing entities of a specific kind.
pub struct EntityRepository<'a, A, E> {
    accessor: &'a A,
    _marker: PhantomData<E>,
}

impl<'a, A: DataAccessor, E: Entity> EntityRepository<'a, A, E> {
    pub fn new(accessor: &'a A) -> Self {
        Self {
            accessor,
            _marker: PhantomData,
        }
    }

    /// Store a new entity and return its identifier.
    pub async fn add(&self, entity: E, cancel: &CancellationToken) -> Result<i32, DataAccessError> {
        self.accessor.add(entity, cancel).await
    }

    /// Store a new entity unless one satisfying `conflict` already exists.
    pub async fn add_unless<P>(
        &self,
        entity: E,
        conflict: P,
        cancel: &CancellationToken,
    ) -> Result<Option<i32>, DataAccessError>
    where
        P: Fn(&E) -> bool + Send + Sync,
    {
        self.accessor.add_unless(entity, conflict, cancel).await
    }

    /// Remove by identifier. Returns true if it existed.
    pub async fn remove(&self, id: i32, cancel: &CancellationToken) -> Result<bool, DataAccessError> {
        self.accessor.remove_by_id::<E>(id, cancel).await
    }

    pub async fn get(&self, id: i32, cancel: &CancellationToken) -> Result<Option<E>, DataAccessError> {
        self.accessor.get_by_id(id, cancel).await
    }

    /// Replace the entity under `id`. Returns false if it does not exist.
    pub async fn update(
        &self,
        id: i32,
        entity: E,
        cancel: &CancellationToken,
    ) -> Result<bool, DataAccessError> {
        self.accessor.update(id, entity, cancel).await
    }

    pub async fn page(
        &self,
        request: PageRequest<E>,
        cancel: &CancellationToken,
    ) -> Result<Paginated<E>, DataAccessError> {
        self.accessor.get_paginated(request, cancel).await
    }

    pub async fn exists<P>(&self, predicate: P, cancel: &CancellationToken) -> Result<bool, DataAccessError>
    where
        P: Fn(&E) -> bool + Send + Sync,
    {
        self.accessor.exists(predicate, cancel).await
    }

    pub async fn count(&self, cancel: &CancellationToken) -> Result<usize, DataAccessError> {
        self.accessor.count::<E>(cancel).await
    }
}

/// Extension trait for typed entity access on any DataAccessor.
pub trait EntitiesExt: DataAccessor + Sized {
    /// Get a typed entity repository.
    fn entities<E: Entity>(&self) -> EntityRepository<'_, Self, E> {
        EntityRepository::new(self)
    }
}

impl<A: DataAccessor> EntitiesExt for A {}
