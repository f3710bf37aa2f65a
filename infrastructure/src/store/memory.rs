//! In-memory canonical store.
//!
//! Reference implementation of the canonical store port, used by the CLI
//! host and by tests. Mirrors the relational semantics the merger depends
//! on: a uniqueness constraint on the canonical host that surfaces as
//! [`StoreError::UniqueViolation`], and a secondary domain index.

use async_trait::async_trait;
use canonica_application::ports::canonical_store::{CanonicalStorePort, StoreError};
use canonica_domain::CanonicalRecord;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct Tables {
    /// canonical_host → record
    by_host: HashMap<String, CanonicalRecord>,
    /// normalized domain → canonical_host
    domain_index: HashMap<String, String>,
}

/// Thread-safe in-memory store with host uniqueness.
#[derive(Default)]
pub struct InMemoryCanonicalStore {
    tables: Mutex<Tables>,
}

impl InMemoryCanonicalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.tables.lock().unwrap().by_host.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CanonicalStorePort for InMemoryCanonicalStore {
    async fn find_by_host(&self, host: &str) -> Result<Option<CanonicalRecord>, StoreError> {
        Ok(self.tables.lock().unwrap().by_host.get(host).cloned())
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Option<CanonicalRecord>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .domain_index
            .get(domain)
            .and_then(|host| tables.by_host.get(host))
            .cloned())
    }

    async fn insert(&self, record: &CanonicalRecord) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.by_host.contains_key(&record.canonical_host) {
            return Err(StoreError::UniqueViolation);
        }
        debug!(host = %record.canonical_host, "inserting canonical record");
        tables
            .domain_index
            .insert(record.domain.clone(), record.canonical_host.clone());
        tables
            .by_host
            .insert(record.canonical_host.clone(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &CanonicalRecord) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.by_host.contains_key(&record.canonical_host) {
            return Err(StoreError::Backend(format!(
                "no row for host {}",
                record.canonical_host
            )));
        }
        tables
            .domain_index
            .insert(record.domain.clone(), record.canonical_host.clone());
        tables
            .by_host
            .insert(record.canonical_host.clone(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canonica_domain::CandidateRecord;

    fn record(host_part: &str) -> CanonicalRecord {
        let candidate = CandidateRecord {
            name: host_part.to_string(),
            website_url: format!("https://{host_part}.io"),
            domain: format!("{host_part}.io"),
            ..Default::default()
        };
        CanonicalRecord::from_candidate(&candidate).unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_lookup_both_keys() {
        let store = InMemoryCanonicalStore::new();
        let r = record("acme");
        store.insert(&r).await.unwrap();

        assert!(
            store
                .find_by_host("https://acme.io")
                .await
                .unwrap()
                .is_some()
        );
        assert!(store.find_by_domain("acme.io").await.unwrap().is_some());
        assert!(store.find_by_domain("other.io").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_host_insert_violates() {
        let store = InMemoryCanonicalStore::new();
        let r = record("acme");
        store.insert(&r).await.unwrap();

        assert!(matches!(
            store.insert(&r).await,
            Err(StoreError::UniqueViolation)
        ));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_backend_error() {
        let store = InMemoryCanonicalStore::new();
        assert!(matches!(
            store.update(&record("acme")).await,
            Err(StoreError::Backend(_))
        ));
    }
}
