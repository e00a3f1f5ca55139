//! Store layer: the data providers every service and the recommender read from.
//!
//! `Repository<E>` is the seam: handlers and the `Recommender` hold
//! `Arc<dyn Repository<E>>`, never a concrete store. The only implementation
//! today is `InMemoryStore`, seeded from JSON at startup.

pub mod latency;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use latency::Latency;
pub use memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid record: {0}")]
    Invalid(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// A record kind a `Repository` can hold.
///
/// `New` carries the fields a caller supplies on create; the store assigns the
/// id and the creation timestamp. `Patch` carries optional fields merged on
/// update (last write wins).
pub trait Entity: Clone + Send + Sync + 'static {
    type New: Send + 'static;
    type Patch: Send + 'static;

    /// Human-readable kind, used in error messages ("Job", "Company", ...).
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn from_new(id: String, now: DateTime<Utc>, new: Self::New) -> Result<Self, StoreError>;

    fn apply(&mut self, patch: Self::Patch) -> Result<(), StoreError>;

    /// Uniqueness rule beyond the id. A create that conflicts with an existing
    /// record fails with `StoreError::Conflict`.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }
}

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Returns a copy of every record; mutating it never touches the store.
    async fn get_all(&self) -> Result<Vec<E>, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<E, StoreError>;

    async fn create(&self, new: E::New) -> Result<E, StoreError>;

    async fn update(&self, id: &str, patch: E::Patch) -> Result<E, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
