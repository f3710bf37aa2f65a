//! Canonical store port
//!
//! Keyed storage with a uniqueness constraint on the normalized website
//! host. The merger relies on `UniqueViolation` being distinguishable so it
//! can recover from concurrent inserts of the same host by re-reading.

use async_trait::async_trait;
use canonica_domain::CanonicalRecord;
use thiserror::Error;

/// Errors from the canonical store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The uniqueness constraint on the canonical host fired — another
    /// writer inserted the same host concurrently.
    #[error("Unique constraint violation on canonical host")]
    UniqueViolation,

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Keyed relational storage for canonical records.
#[async_trait]
pub trait CanonicalStorePort: Send + Sync {
    /// Primary lookup by normalized canonical host.
    async fn find_by_host(&self, host: &str) -> Result<Option<CanonicalRecord>, StoreError>;

    /// Secondary lookup by normalized domain — catches re-identification of
    /// an existing record under a different casing or path.
    async fn find_by_domain(&self, domain: &str) -> Result<Option<CanonicalRecord>, StoreError>;

    /// Insert a new record; `UniqueViolation` when the host already exists.
    async fn insert(&self, record: &CanonicalRecord) -> Result<(), StoreError>;

    /// Update an existing record, matched by canonical host.
    async fn update(&self, record: &CanonicalRecord) -> Result<(), StoreError>;
}
