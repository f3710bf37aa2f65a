//! Record merger use case.
//!
//! Idempotent upsert of validated candidates into the canonical store.
//! Lookup order is canonical host first, then raw domain; the write race on
//! a brand-new host is handled optimistically — insert, catch the unique
//! violation, re-read the concurrent winner — because true collisions are
//! rare and locking would cost every caller.

use crate::ports::canonical_store::{CanonicalStorePort, StoreError};
use crate::ports::logo::{ImageStorePort, LogoFetcherPort};
use canonica_domain::resolution::host::{canonical_host, normalize_domain};
use canonica_domain::resolution::merge;
use canonica_domain::{CandidateRecord, CanonicalRecord};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Merges validated candidates into canonical storage.
pub struct RecordMerger {
    store: Arc<dyn CanonicalStorePort>,
    logo_fetcher: Option<Arc<dyn LogoFetcherPort>>,
    image_store: Option<Arc<dyn ImageStorePort>>,
}

impl RecordMerger {
    pub fn new(store: Arc<dyn CanonicalStorePort>) -> Self {
        Self {
            store,
            logo_fetcher: None,
            image_store: None,
        }
    }

    /// Enable the logo refresh pipeline.
    pub fn with_logo_pipeline(
        mut self,
        fetcher: Arc<dyn LogoFetcherPort>,
        image_store: Arc<dyn ImageStorePort>,
    ) -> Self {
        self.logo_fetcher = Some(fetcher);
        self.image_store = Some(image_store);
        self
    }

    /// Merge one validated candidate into the store.
    ///
    /// Returns the canonical record the candidate now maps to, or `None`
    /// when no canonical host can be derived (such a candidate is not
    /// persistable). Re-merging an identical candidate issues no write.
    pub async fn merge(
        &self,
        candidate: &CandidateRecord,
    ) -> Result<Option<CanonicalRecord>, StoreError> {
        let Some(host) = canonical_host(&candidate.website_url) else {
            warn!(
                name = %candidate.name,
                url = %candidate.website_url,
                "candidate has no derivable canonical host; skipping merge"
            );
            return Ok(None);
        };

        // Primary lookup by host, fallback by domain — the latter catches a
        // record re-identified under a different casing or path.
        let existing = match self.store.find_by_host(&host).await? {
            Some(record) => Some(record),
            None => {
                self.store
                    .find_by_domain(&normalize_domain(&candidate.domain))
                    .await?
            }
        };

        match existing {
            Some(record) => self.enrich(record, candidate).await.map(Some),
            None => self.create(host, candidate).await.map(Some),
        }
    }

    /// Merge into an existing record; write only when something changed.
    async fn enrich(
        &self,
        mut record: CanonicalRecord,
        candidate: &CandidateRecord,
    ) -> Result<CanonicalRecord, StoreError> {
        let mut changed = merge::merge_candidate(&mut record, candidate);
        changed |= self.refresh_logo(&mut record).await;

        if changed {
            debug!(host = %record.canonical_host, "updating enriched canonical record");
            self.store.update(&record).await?;
        } else {
            debug!(host = %record.canonical_host, "merge is a no-op; skipping write");
        }
        Ok(record)
    }

    /// Insert a new record, recovering from a concurrent insert of the
    /// same host by adopting the winner.
    async fn create(
        &self,
        host: String,
        candidate: &CandidateRecord,
    ) -> Result<CanonicalRecord, StoreError> {
        // from_candidate only fails when the host is underivable, which the
        // caller already ruled out
        let Some(mut record) = CanonicalRecord::from_candidate(candidate) else {
            return Err(StoreError::Backend(
                "candidate lost its canonical host during promotion".to_string(),
            ));
        };
        self.refresh_logo(&mut record).await;

        match self.store.insert(&record).await {
            Ok(()) => Ok(record),
            Err(StoreError::UniqueViolation) => {
                warn!(host = %host, "concurrent insert detected; adopting existing row");
                match self.store.find_by_host(&host).await? {
                    Some(winner) => self.enrich(winner, candidate).await,
                    None => Err(StoreError::Backend(
                        "record vanished after unique violation".to_string(),
                    )),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Download and store a fresh logo whenever one is available — even over
    /// an existing logo, since staleness costs more than a redundant upload.
    /// Failures degrade silently; returns whether the record changed.
    async fn refresh_logo(&self, record: &mut CanonicalRecord) -> bool {
        let (Some(fetcher), Some(images)) = (&self.logo_fetcher, &self.image_store) else {
            return false;
        };

        let base64_data = match fetcher.download_logo(&record.domain).await {
            Ok(Some(data)) => data,
            Ok(None) => return false,
            Err(e) => {
                debug!(domain = %record.domain, error = %e, "logo download failed");
                return false;
            }
        };

        match images.upload_image(&base64_data, &record.domain).await {
            Ok(url) => {
                let changed = record.logo_url.as_deref() != Some(url.as_str());
                record.logo_url = Some(url);
                if changed {
                    record.updated_at = Utc::now();
                }
                changed
            }
            Err(e) => {
                debug!(domain = %record.domain, error = %e, "logo upload failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::logo::LogoError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    /// In-memory store with a host uniqueness constraint and write counters.
    #[derive(Default)]
    struct MockStore {
        rows: Mutex<HashMap<String, CanonicalRecord>>,
        inserts: AtomicUsize,
        updates: AtomicUsize,
    }

    #[async_trait]
    impl CanonicalStorePort for MockStore {
        async fn find_by_host(&self, host: &str) -> Result<Option<CanonicalRecord>, StoreError> {
            Ok(self.rows.lock().unwrap().get(host).cloned())
        }

        async fn find_by_domain(
            &self,
            domain: &str,
        ) -> Result<Option<CanonicalRecord>, StoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|r| r.domain == domain)
                .cloned())
        }

        async fn insert(&self, record: &CanonicalRecord) -> Result<(), StoreError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&record.canonical_host) {
                return Err(StoreError::UniqueViolation);
            }
            self.inserts.fetch_add(1, Ordering::SeqCst);
            rows.insert(record.canonical_host.clone(), record.clone());
            Ok(())
        }

        async fn update(&self, record: &CanonicalRecord) -> Result<(), StoreError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.rows
                .lock()
                .unwrap()
                .insert(record.canonical_host.clone(), record.clone());
            Ok(())
        }
    }

    struct MockLogoFetcher {
        payload: Option<String>,
    }

    #[async_trait]
    impl LogoFetcherPort for MockLogoFetcher {
        async fn download_logo(&self, _domain: &str) -> Result<Option<String>, LogoError> {
            Ok(self.payload.clone())
        }
    }

    struct MockImageStore {
        uploads: AtomicUsize,
    }

    #[async_trait]
    impl ImageStorePort for MockImageStore {
        async fn upload_image(
            &self,
            _base64_data: &str,
            key_prefix: &str,
        ) -> Result<String, LogoError> {
            let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("https://cdn.example/{}/logo-{}.png", key_prefix, n))
        }
    }

    fn candidate() -> CandidateRecord {
        CandidateRecord {
            name: "Acme".to_string(),
            website_url: "https://www.acme.io".to_string(),
            domain: "acme.io".to_string(),
            description: Some("Roadrunner logistics".to_string()),
            confidence: 0.9,
            ..Default::default()
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_merge_creates_new_record() {
        let store = Arc::new(MockStore::default());
        let merger = RecordMerger::new(store.clone());

        let record = merger.merge(&candidate()).await.unwrap().unwrap();
        assert_eq!(record.canonical_host, "https://acme.io");
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_merge_twice_is_idempotent() {
        let store = Arc::new(MockStore::default());
        let merger = RecordMerger::new(store.clone());

        merger.merge(&candidate()).await.unwrap();
        merger.merge(&candidate()).await.unwrap();

        assert_eq!(store.rows.lock().unwrap().len(), 1);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
        // Identical second merge must not issue a write
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_second_merge_updates_only_different_fields() {
        let store = Arc::new(MockStore::default());
        let merger = RecordMerger::new(store.clone());
        merger.merge(&candidate()).await.unwrap();

        let mut enriched = candidate();
        enriched.headquarters = Some("Phoenix, AZ".to_string());
        let record = merger.merge(&enriched).await.unwrap().unwrap();

        assert_eq!(record.headquarters, Some("Phoenix, AZ".to_string()));
        assert_eq!(record.description, Some("Roadrunner logistics".to_string()));
        assert_eq!(store.rows.lock().unwrap().len(), 1);
        assert_eq!(store.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_domain_fallback_lookup_catches_reidentification() {
        let store = Arc::new(MockStore::default());
        let merger = RecordMerger::new(store.clone());
        merger.merge(&candidate()).await.unwrap();

        // Same company resolved under a different scheme/casing
        let mut variant = candidate();
        variant.website_url = "http://ACME.io/about".to_string();
        merger.merge(&variant).await.unwrap();

        // http host differs from the stored https key, but the domain
        // fallback re-identifies the row instead of creating a second one
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_insert_race_resolves_to_one_row() {
        let store = Arc::new(MockStore::default());
        let merger_a = RecordMerger::new(store.clone());
        let merger_b = RecordMerger::new(store.clone());

        let candidate_a = candidate();
        let candidate_b = candidate();
        let (a, b) = tokio::join!(merger_a.merge(&candidate_a), merger_b.merge(&candidate_b));
        let a = a.unwrap().unwrap();
        let b = b.unwrap().unwrap();

        assert_eq!(store.rows.lock().unwrap().len(), 1);
        assert_eq!(a.canonical_host, b.canonical_host);
    }

    #[tokio::test]
    async fn test_unique_violation_recovers_by_rereading_winner() {
        /// Simulates losing the race: the first host lookup misses, the
        /// insert hits the constraint, the re-read sees the winner.
        struct RacingStore {
            inner: MockStore,
            lookups: AtomicUsize,
        }

        #[async_trait]
        impl CanonicalStorePort for RacingStore {
            async fn find_by_host(
                &self,
                host: &str,
            ) -> Result<Option<CanonicalRecord>, StoreError> {
                if self.lookups.fetch_add(1, Ordering::SeqCst) == 0 {
                    return Ok(None);
                }
                self.inner.find_by_host(host).await
            }

            async fn find_by_domain(
                &self,
                _domain: &str,
            ) -> Result<Option<CanonicalRecord>, StoreError> {
                Ok(None)
            }

            async fn insert(&self, _record: &CanonicalRecord) -> Result<(), StoreError> {
                Err(StoreError::UniqueViolation)
            }

            async fn update(&self, record: &CanonicalRecord) -> Result<(), StoreError> {
                self.inner.update(record).await
            }
        }

        let inner = MockStore::default();
        let winner = CanonicalRecord::from_candidate(&candidate()).unwrap();
        inner
            .rows
            .lock()
            .unwrap()
            .insert(winner.canonical_host.clone(), winner.clone());

        let store = Arc::new(RacingStore {
            inner,
            lookups: AtomicUsize::new(0),
        });
        let merger = RecordMerger::new(store);

        let record = merger.merge(&candidate()).await.unwrap().unwrap();
        assert_eq!(record.canonical_host, winner.canonical_host);
    }

    #[tokio::test]
    async fn test_unkeyable_candidate_is_skipped() {
        let merger = RecordMerger::new(Arc::new(MockStore::default()));
        let mut c = candidate();
        c.website_url = String::new();
        assert!(merger.merge(&c).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logo_refreshed_even_over_existing_logo() {
        let store = Arc::new(MockStore::default());
        let images = Arc::new(MockImageStore {
            uploads: AtomicUsize::new(0),
        });
        let merger = RecordMerger::new(store.clone()).with_logo_pipeline(
            Arc::new(MockLogoFetcher {
                payload: Some("aGVsbG8=".to_string()),
            }),
            images.clone(),
        );

        let first = merger.merge(&candidate()).await.unwrap().unwrap();
        assert!(first.logo_url.is_some());

        let second = merger.merge(&candidate()).await.unwrap().unwrap();
        assert_eq!(images.uploads.load(Ordering::SeqCst), 2);
        assert_ne!(first.logo_url, second.logo_url);
    }

    #[tokio::test]
    async fn test_logo_failure_degrades_silently() {
        struct FailingFetcher;

        #[async_trait]
        impl LogoFetcherPort for FailingFetcher {
            async fn download_logo(&self, _domain: &str) -> Result<Option<String>, LogoError> {
                Err(LogoError::DownloadFailed("boom".to_string()))
            }
        }

        let store = Arc::new(MockStore::default());
        let merger = RecordMerger::new(store.clone()).with_logo_pipeline(
            Arc::new(FailingFetcher),
            Arc::new(MockImageStore {
                uploads: AtomicUsize::new(0),
            }),
        );

        let record = merger.merge(&candidate()).await.unwrap().unwrap();
        assert_eq!(record.logo_url, None);
    }
}
