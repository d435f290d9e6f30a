use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use storefront_core::{DomainError, Entity};

/// Repository operation error.
///
/// `NotFound` is the translated form of the store's empty-result signal and is
/// the only translation this layer performs: driver errors (including unique
/// constraint violations on `create`) surface untouched through `Storage`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row matched the requested identifier.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    /// A row with this identifier already exists (in-memory stores only;
    /// Postgres reports the same condition as an untranslated `Storage`
    /// error).
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// A stored row failed entity validation during unmarshalling.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Untranslated driver error.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// The backend itself is unusable (e.g. a poisoned lock).
    #[error("storage backend unavailable: {0}")]
    Backend(String),
}

/// Persistence contract for one entity type.
///
/// Implementations marshal the entity to its persistence model, issue exactly
/// one round trip against the backing store per operation, and unmarshal rows
/// back into fresh entities on reads. No retries, batching, or caching happen
/// here; concurrent callers rely on the store's own per-statement guarantees.
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: Entity + Send + Sync,
    E::Id: Send + Sync,
{
    /// Insert a new row copied from the entity.
    async fn create(&self, entity: &E) -> Result<(), RepositoryError>;

    /// Update the row matching `entity.id()`.
    ///
    /// Fails with [`RepositoryError::NotFound`] when no row matches.
    async fn update(&self, entity: &E) -> Result<(), RepositoryError>;

    /// Look up one entity by id; absence is [`RepositoryError::NotFound`].
    async fn find(&self, id: &E::Id) -> Result<E, RepositoryError>;

    /// Return every stored entity, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError>;
}

#[async_trait]
impl<E, S> Repository<E> for Arc<S>
where
    E: Entity + Send + Sync,
    E::Id: Send + Sync,
    S: Repository<E> + ?Sized,
{
    async fn create(&self, entity: &E) -> Result<(), RepositoryError> {
        (**self).create(entity).await
    }

    async fn update(&self, entity: &E) -> Result<(), RepositoryError> {
        (**self).update(entity).await
    }

    async fn find(&self, id: &E::Id) -> Result<E, RepositoryError> {
        (**self).find(id).await
    }

    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        (**self).find_all().await
    }
}
