//! DataAccessor - Abstract CRUD and pagination over entities of any kind.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{DataAccessError, PageRequest};
use crate::entity::Entity;
use crate::paginated::Paginated;

/// Abstract store for entities, parameterized by entity kind at each call.
///
/// Every operation takes a [`CancellationToken`]. A cancelled operation
/// returns [`DataAccessError::Cancelled`] and leaves the store untouched;
/// once an operation has applied its effect it always reports success.
#[async_trait]
pub trait DataAccessor: Send + Sync {
    /// Store a new entity, assigning and returning its identifier.
    ///
    /// Any identifier already set on `entity` is overwritten.
    async fn add<E: Entity>(
        &self,
        entity: E,
        cancel: &CancellationToken,
    ) -> Result<i32, DataAccessError>;

    /// Store a new entity unless one of the same kind satisfies `conflict`.
    ///
    /// The check and the insert happen under one write guard. Returns the
    /// assigned identifier, or `None` if a conflicting entity exists.
    async fn add_unless<E, P>(
        &self,
        entity: E,
        conflict: P,
        cancel: &CancellationToken,
    ) -> Result<Option<i32>, DataAccessError>
    where
        E: Entity,
        P: Fn(&E) -> bool + Send + Sync;

    /// Remove the entity with the given identifier. Returns true if it existed.
    async fn remove_by_id<E: Entity>(
        &self,
        id: i32,
        cancel: &CancellationToken,
    ) -> Result<bool, DataAccessError>;

    /// Get the entity with the given identifier. Returns None if not found.
    async fn get_by_id<E: Entity>(
        &self,
        id: i32,
        cancel: &CancellationToken,
    ) -> Result<Option<E>, DataAccessError>;

    /// Replace the entity stored under `id`, keeping `id` as its identifier.
    ///
    /// Returns false (and changes nothing) if no such entity exists.
    async fn update<E: Entity>(
        &self,
        id: i32,
        entity: E,
        cancel: &CancellationToken,
    ) -> Result<bool, DataAccessError>;

    /// Filter, count, order and page the entities of one kind.
    async fn get_paginated<E: Entity>(
        &self,
        request: PageRequest<E>,
        cancel: &CancellationToken,
    ) -> Result<Paginated<E>, DataAccessError>;

    /// True if at least one entity of the kind satisfies `predicate`.
    async fn exists<E, P>(
        &self,
        predicate: P,
        cancel: &CancellationToken,
    ) -> Result<bool, DataAccessError>
    where
        E: Entity,
        P: Fn(&E) -> bool + Send + Sync;

    /// Number of stored entities of the kind.
    async fn count<E: Entity>(&self, cancel: &CancellationToken) -> Result<usize, DataAccessError>;
}
