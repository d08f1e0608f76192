use async_trait::async_trait;
use thiserror::Error;

use catalog_core::domain::product::{Product, ProductDraft, ProductId};
use catalog_core::errors::{ApplicationError, DomainError};

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("constraint violation: {0}")]
    Constraint(#[from] DomainError),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Constraint(error) => Self::Domain(error),
            other => Self::Persistence(other.to_string()),
        }
    }
}

/// Result of a keyed write against the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    NotFound,
}

/// Owns the product records.
///
/// Listings come back ordered by ascending id. Prices are normalized by the
/// store on every write, so callers may pass any scale.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Case-insensitive substring match on `category`; empty `text` matches all.
    async fn find_by_category(&self, text: &str) -> Result<Vec<Product>, RepositoryError>;

    /// Persists `draft` under a freshly assigned id that is never handed out again.
    async fn insert(&self, draft: ProductDraft) -> Result<Product, RepositoryError>;

    /// Overwrites every field of the record stored under `id`.
    async fn replace_by_id(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<WriteOutcome, RepositoryError>;

    async fn delete_by_id(&self, id: ProductId) -> Result<WriteOutcome, RepositoryError>;

    async fn ping(&self) -> Result<(), RepositoryError>;
}
